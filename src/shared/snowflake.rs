//! Snowflake ID Generator
//!
//! Twitter-style distributed unique ID generation for categories, servers and channels.

use std::time::{SystemTime, UNIX_EPOCH};

use parking_lot::Mutex;

/// Default epoch (2015-01-01T00:00:00.000Z)
pub const DEFAULT_EPOCH: u64 = 1420070400000;

/// Snowflake ID generator
pub struct SnowflakeGenerator {
    epoch: u64,
    machine_id: u64,
    node_id: u64,
    /// (last timestamp, sequence within that millisecond)
    state: Mutex<(u64, u64)>,
}

impl SnowflakeGenerator {
    /// Create a new snowflake generator using the default epoch
    pub fn new(machine_id: u64, node_id: u64) -> Self {
        Self::with_epoch(DEFAULT_EPOCH, machine_id, node_id)
    }

    /// Create a generator counting from a custom epoch (milliseconds since UNIX epoch)
    pub fn with_epoch(epoch: u64, machine_id: u64, node_id: u64) -> Self {
        Self {
            epoch,
            machine_id: machine_id & 0x1F, // 5 bits
            node_id: node_id & 0x1F,       // 5 bits
            state: Mutex::new((0, 0)),
        }
    }

    /// Generate a new snowflake ID
    pub fn generate(&self) -> i64 {
        let mut state = self.state.lock();
        let mut timestamp = current_timestamp().max(state.0);

        let sequence = if timestamp == state.0 {
            let next = (state.1 + 1) & 0xFFF;
            if next == 0 {
                // Sequence exhausted for this millisecond, borrow the next one.
                timestamp += 1;
            }
            next
        } else {
            0
        };
        *state = (timestamp, sequence);

        let id = (timestamp.saturating_sub(self.epoch) << 22)
            | (self.machine_id << 17)
            | (self.node_id << 12)
            | sequence;

        id as i64
    }

    /// Extract the creation timestamp (milliseconds since UNIX epoch) from an ID
    pub fn timestamp_of(&self, snowflake: i64) -> u64 {
        ((snowflake as u64) >> 22) + self.epoch
    }
}

fn current_timestamp() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or_default()
}
