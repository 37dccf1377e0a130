//! Repository tests against a live database (ignored by default)
