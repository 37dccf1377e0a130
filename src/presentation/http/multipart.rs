//! Multipart form parsing for the category and channel endpoints.

use std::collections::HashMap;

use axum::extract::{multipart::MultipartError, Multipart};

use crate::domain::services::Upload;
use crate::shared::error::AppError;

/// Text fields and files of a multipart body, keyed by field name.
#[derive(Debug, Default)]
pub struct FormFields {
    texts: HashMap<String, String>,
    files: HashMap<String, Upload>,
}

impl FormFields {
    /// Read every field of the body. A repeated field keeps its last value.
    pub async fn read(mut multipart: Multipart) -> Result<Self, AppError> {
        let mut fields = Self::default();

        while let Some(field) = multipart.next_field().await.map_err(malformed)? {
            let Some(name) = field.name().map(str::to_owned) else {
                continue;
            };

            match field.file_name().map(str::to_owned) {
                Some(filename) => {
                    let bytes = field.bytes().await.map_err(malformed)?;
                    // Browsers send an empty part for an untouched file input.
                    if filename.is_empty() && bytes.is_empty() {
                        continue;
                    }
                    fields.files.insert(name, Upload { filename, bytes });
                }
                None => {
                    let text = field.text().await.map_err(malformed)?;
                    fields.texts.insert(name, text);
                }
            }
        }

        Ok(fields)
    }

    pub fn text(&mut self, name: &str) -> Option<String> {
        self.texts.remove(name)
    }

    pub fn file(&mut self, name: &str) -> Option<Upload> {
        self.files.remove(name)
    }
}

fn malformed(e: MultipartError) -> AppError {
    AppError::BadRequest(e.body_text())
}
