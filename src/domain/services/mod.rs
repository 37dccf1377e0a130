//! # Domain Services
//!
//! Rules that do not belong to a single entity:
//!
//! - **media**: image extension and icon-size validation, upload paths
//! - **file_store**: the file storage collaborator and best-effort cleanup

pub mod file_store;
pub mod media;

pub use file_store::{delete_orphaned, FileStore};
pub use media::{
    upload_path, validate_icon_image_size, validate_image_file_extension, validate_upload,
    ImageDimensions, ImageInspector, Upload, UploadKind,
};

#[cfg(test)]
pub use file_store::MockFileStore;
#[cfg(test)]
pub use media::MockImageInspector;
