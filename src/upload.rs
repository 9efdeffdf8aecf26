/// Photo intake and validation
///
/// This module is the boundary that turns a picked or dropped file into a
/// validated [`UploadedPhoto`]. Invalid files (wrong type, oversized) are
/// rejected here with a user-facing message and never reach the
/// generation flow.

use std::path::PathBuf;
use std::sync::Arc;

use image::ImageFormat;

/// Largest accepted photo, in bytes (10MB)
pub const MAX_PHOTO_BYTES: usize = 10 * 1024 * 1024;

/// Accepted input formats for the user's photo.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PhotoFormat {
    Jpeg,
    Png,
    Webp,
}

impl PhotoFormat {
    /// The MIME type sent to the generation service.
    pub fn mime_type(self) -> &'static str {
        match self {
            PhotoFormat::Jpeg => "image/jpeg",
            PhotoFormat::Png => "image/png",
            PhotoFormat::Webp => "image/webp",
        }
    }

    fn from_image_format(format: ImageFormat) -> Option<Self> {
        match format {
            ImageFormat::Jpeg => Some(PhotoFormat::Jpeg),
            ImageFormat::Png => Some(PhotoFormat::Png),
            ImageFormat::WebP => Some(PhotoFormat::Webp),
            _ => None,
        }
    }
}

/// A validated photo held for the current run.
///
/// Bytes are shared via `Arc` so the photo can be cloned into the
/// generation future without copying the payload.
#[derive(Debug, Clone)]
pub struct UploadedPhoto {
    pub bytes: Arc<Vec<u8>>,
    pub format: PhotoFormat,
}

impl UploadedPhoto {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }
}

/// Validate raw file contents and wrap them as an [`UploadedPhoto`].
///
/// The format is sniffed from the magic bytes rather than trusted from
/// the file extension. Returns a user-displayable message on rejection.
pub fn validate_photo(bytes: Vec<u8>) -> Result<UploadedPhoto, String> {
    if bytes.len() > MAX_PHOTO_BYTES {
        return Err("File size exceeds 10MB. Please choose a smaller file.".to_string());
    }

    let format = image::guess_format(&bytes)
        .ok()
        .and_then(PhotoFormat::from_image_format)
        .ok_or_else(|| "Invalid file type. Please upload a JPG, PNG, or WebP file.".to_string())?;

    Ok(UploadedPhoto {
        bytes: Arc::new(bytes),
        format,
    })
}

/// Read a picked or dropped file and validate it as a photo.
///
/// Runs off the UI thread; the returned error string is shown to the
/// user as-is.
pub async fn load_photo(path: PathBuf) -> Result<UploadedPhoto, String> {
    let bytes = tokio::fs::read(&path)
        .await
        .map_err(|e| format!("Could not read {}: {}", path.display(), e))?;

    let photo = validate_photo(bytes)?;
    tracing::debug!(
        path = %path.display(),
        size = photo.len(),
        mime = photo.format.mime_type(),
        "photo accepted"
    );
    Ok(photo)
}
