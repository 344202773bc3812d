//! Wallpaper discovery and on-demand image access.
//!
//! [`ImageDirectoryScanner::scan`] walks a directory tree and describes every image it
//! finds without reading any pixels. Content and thumbnails are fetched separately,
//! per image, when the picker actually shows them.

use super::paths::{clean_path, expand_home, home_dir};
use crate::error::HyprError;
use crate::models::{ImageFileDescriptor, Thumbnail, ThumbnailFormat};
use crate::models::config_file::file_name_of;
use camino::{Utf8Path, Utf8PathBuf};
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::{DynamicImage, ImageFormat, ImageReader};
use std::fs;
use std::io::Cursor;
use walkdir::{DirEntry, WalkDir};

/// Recognized image extensions (lower case, with the leading dot) and their MIME types
pub const IMAGE_EXTENSIONS: &[(&str, &str)] = &[
    (".png", "image/png"),
    (".jpg", "image/jpeg"),
    (".jpeg", "image/jpeg"),
    (".gif", "image/gif"),
    (".bmp", "image/bmp"),
    (".webp", "image/webp"),
    (".tiff", "image/tiff"),
    (".svg", "image/svg+xml"),
];

/// MIME type for an extension such as `.JPG`, if it is a recognized image type.
pub fn mime_type_for(extension: &str) -> Option<&'static str> {
    let lower = extension.to_ascii_lowercase();
    IMAGE_EXTENSIONS
        .iter()
        .find(|(ext, _)| *ext == lower)
        .map(|(_, mime)| *mime)
}

/// Extension of `path` with its leading dot, as written on disk.
fn dotted_extension(path: &Utf8Path) -> Option<String> {
    path.extension().map(|ext| format!(".{ext}"))
}

/// Recursive image finder.
#[derive(Debug, Clone)]
pub struct ImageDirectoryScanner {
    home: Utf8PathBuf,
}

impl ImageDirectoryScanner {
    /// # Arguments
    /// * `home` - Directory substituted for a leading `~` in scan roots
    pub fn new(home: impl Into<Utf8PathBuf>) -> Self {
        Self { home: home.into() }
    }

    /// Scanner expanding `~` to the current user's home directory.
    pub fn for_current_user() -> Result<Self, HyprError> {
        Ok(Self::new(home_dir()?))
    }

    /// Describe every image below `root_dir`.
    ///
    /// Hidden directories (name starting with `.`) below the root are not entered.
    /// Entries that cannot be read are logged and skipped. Results are ordered by
    /// file name within each directory.
    ///
    /// # Errors
    ///
    /// [`HyprError::NotFound`] if `root_dir` does not exist.
    pub fn scan(&self, root_dir: &str) -> Result<Vec<ImageFileDescriptor>, HyprError> {
        let root = clean_path(expand_home(root_dir.trim(), &self.home));
        tracing::info!("Scanning recursively in {} (expanded: {})", root_dir, root);

        if !root.exists() {
            return Err(HyprError::NotFound { path: root });
        }

        let walker = WalkDir::new(&root)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|entry| !is_hidden_dir(entry));

        let mut images = Vec::new();
        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::debug!("Error accessing {:?}: {} (skipping)", e.path(), e);
                    continue;
                }
            };

            if entry.file_type().is_dir() {
                continue;
            }

            let Some(path) = Utf8Path::from_path(entry.path()) else {
                tracing::debug!("Skipping non UTF-8 path: {}", entry.path().display());
                continue;
            };

            let Some(extension) = dotted_extension(path) else {
                continue;
            };
            let Some(mime_type) = mime_type_for(&extension) else {
                continue;
            };

            // Follows symlinks; a dangling link fails here and is skipped.
            let metadata = match fs::metadata(path) {
                Ok(metadata) => metadata,
                Err(e) => {
                    tracing::error!("Error processing file {}: {} (skipping)", path, e);
                    continue;
                }
            };
            if !metadata.is_file() {
                continue;
            }

            tracing::debug!("Found file: {}", path);
            images.push(ImageFileDescriptor {
                path: path.to_path_buf(),
                name: file_name_of(path),
                extension,
                mime_type: mime_type.to_string(),
                size: metadata.len(),
            });
        }

        tracing::info!("Found {} image files recursively", images.len());
        Ok(images)
    }
}

fn is_hidden_dir(entry: &DirEntry) -> bool {
    entry.depth() > 0
        && entry.file_type().is_dir()
        && entry.file_name().to_string_lossy().starts_with('.')
}

/// Raw bytes of an image file.
pub fn get_image_content(path: &Utf8Path) -> Result<Vec<u8>, HyprError> {
    fs::read(path).map_err(|e| HyprError::from_read(path, e))
}

/// Scale `(width, height)` so the longest side is at most `max_side`.
///
/// Images already within bounds keep their size. Neither side drops below 1.
pub fn thumbnail_dimensions(width: u32, height: u32, max_side: u32) -> (u32, u32) {
    let longest = width.max(height);
    if longest <= max_side || longest == 0 {
        return (width, height);
    }

    let scale = |side: u32| ((u64::from(side) * u64::from(max_side)) / u64::from(longest)).max(1) as u32;
    (scale(width), scale(height))
}

/// Downscale an image with nearest-neighbor sampling and re-encode it.
///
/// PNG sources stay PNG; everything else becomes JPEG at `jpeg_quality`.
pub fn get_thumbnail(
    path: &Utf8Path,
    max_side: u32,
    jpeg_quality: u8,
) -> Result<Thumbnail, HyprError> {
    let image_error = |message: String| HyprError::Image {
        path: path.to_path_buf(),
        message,
    };

    let reader = ImageReader::open(path)
        .map_err(|e| HyprError::from_read(path, e))?
        .with_guessed_format()
        .map_err(|e| HyprError::from_read(path, e))?;
    let source_format = reader.format();
    let image = reader.decode().map_err(|e| image_error(e.to_string()))?;

    let (width, height) = thumbnail_dimensions(image.width(), image.height(), max_side);
    let resized = if (width, height) == (image.width(), image.height()) {
        image
    } else {
        image.resize_exact(width, height, FilterType::Nearest)
    };

    let mut bytes = Vec::new();
    let format = if source_format == Some(ImageFormat::Png) {
        resized
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| image_error(e.to_string()))?;
        ThumbnailFormat::Png
    } else {
        let encoder = JpegEncoder::new_with_quality(&mut bytes, jpeg_quality);
        DynamicImage::ImageRgb8(resized.to_rgb8())
            .write_with_encoder(encoder)
            .map_err(|e| image_error(e.to_string()))?;
        ThumbnailFormat::Jpeg
    };

    tracing::debug!(
        "Thumbnail for {}: {}x{} {:?}, {} bytes",
        path,
        width,
        height,
        format,
        bytes.len()
    );

    Ok(Thumbnail {
        bytes,
        format,
        width,
        height,
    })
}
