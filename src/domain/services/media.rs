//! Image upload rules.
//!
//! Extension and icon-size checks applied before any upload is stored, plus
//! the media-root-relative paths uploads are written to.

use std::path::Path;

use bytes::Bytes;

use crate::shared::error::AppError;

/// Extensions accepted for banners and icons (compared case-insensitively).
pub const ALLOWED_IMAGE_EXTENSIONS: [&str; 4] = [".jpeg", ".jpg", ".png", ".gif"];

/// Icons may be at most this many pixels wide and high.
pub const MAX_ICON_DIMENSION: u32 = 70;

/// A file received from a client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upload {
    pub filename: String,
    pub bytes: Bytes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageDimensions {
    pub width: u32,
    pub height: u32,
}

/// Reads pixel dimensions out of encoded image data.
#[cfg_attr(test, mockall::automock)]
pub trait ImageInspector: Send + Sync {
    fn dimensions(&self, bytes: &[u8]) -> Result<ImageDimensions, AppError>;
}

/// Where an upload belongs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadKind {
    ChannelIcon,
    ChannelBanner,
    CategoryIcon,
}

/// Reject files whose extension is not an allowed image type.
pub fn validate_image_file_extension(filename: &str) -> Result<(), AppError> {
    let extension = Path::new(filename)
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| format!(".{}", e.to_lowercase()));

    match extension {
        Some(ext) if ALLOWED_IMAGE_EXTENSIONS.contains(&ext.as_str()) => Ok(()),
        _ => Err(AppError::UnsupportedMedia("Unsupported file extension".into())),
    }
}

/// Reject icons larger than `MAX_ICON_DIMENSION` on either side.
pub fn validate_icon_image_size(dimensions: ImageDimensions) -> Result<(), AppError> {
    if dimensions.width > MAX_ICON_DIMENSION || dimensions.height > MAX_ICON_DIMENSION {
        return Err(AppError::ImageDimension(format!(
            "The maximum allowed dimensions for the image are {max}x{max} - size of image you uploaded: ({}, {})",
            dimensions.width,
            dimensions.height,
            max = MAX_ICON_DIMENSION,
        )));
    }
    Ok(())
}

/// Run the checks an upload of this kind is subject to.
pub fn validate_upload(
    kind: UploadKind,
    upload: &Upload,
    inspector: &dyn ImageInspector,
) -> Result<(), AppError> {
    validate_image_file_extension(&upload.filename)?;
    if kind == UploadKind::ChannelIcon {
        validate_icon_image_size(inspector.dimensions(&upload.bytes)?)?;
    }
    Ok(())
}

/// Path (relative to the media root) an upload for `owner_id` is stored at.
///
/// Only the final component of the client-supplied name is kept.
pub fn upload_path(kind: UploadKind, owner_id: i64, filename: &str) -> Result<String, AppError> {
    let name = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();

    if name.is_empty() || name == "." || name == ".." {
        return Err(AppError::BadRequest(format!("Invalid file name `{}`", filename)));
    }

    Ok(match kind {
        UploadKind::ChannelIcon => format!("server/{}/server_icons/{}", owner_id, name),
        UploadKind::ChannelBanner => format!("server/{}/server_banner/{}", owner_id, name),
        UploadKind::CategoryIcon => format!("category/{}/category_icon/{}", owner_id, name),
    })
}
