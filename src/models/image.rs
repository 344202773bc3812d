use camino::Utf8PathBuf;
use serde::Serialize;

/// A wallpaper candidate discovered by
/// [`ImageDirectoryScanner`](crate::services::images::ImageDirectoryScanner).
///
/// Content is never embedded; fetch it separately with
/// [`get_image_content`](crate::services::images::get_image_content).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImageFileDescriptor {
    pub path: Utf8PathBuf,
    pub name: String,
    /// Extension as written on disk, including the leading dot (e.g. `.JPG`)
    pub extension: String,
    pub mime_type: String,
    pub size: u64,
}

/// Encoding used for a generated thumbnail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ThumbnailFormat {
    Png,
    Jpeg,
}

impl ThumbnailFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
        }
    }
}

/// Downscaled, re-encoded copy of an image
#[derive(Debug, Clone)]
pub struct Thumbnail {
    pub bytes: Vec<u8>,
    pub format: ThumbnailFormat,
    pub width: u32,
    pub height: u32,
}
