//! Integration tests for the image scanner and thumbnails
//!
//! These tests verify:
//! - Hidden directories are pruned
//! - Unreadable subdirectories don't abort a scan
//! - Extension filtering and MIME types
//! - Thumbnail sizing and output format

use camino::{Utf8Path, Utf8PathBuf};
use hyprsettings::HyprError;
use hyprsettings::models::ThumbnailFormat;
use hyprsettings::services::ImageDirectoryScanner;
use hyprsettings::services::images::{get_image_content, get_thumbnail};
use image::{ImageFormat, RgbImage};
use std::fs;
use tempfile::TempDir;

fn create_home() -> (TempDir, Utf8PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let home = Utf8PathBuf::try_from(temp_dir.path().to_path_buf()).unwrap();
    (temp_dir, home)
}

fn touch(path: &Utf8Path) {
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, b"not really an image").unwrap();
}

fn names(images: &[hyprsettings::ImageFileDescriptor]) -> Vec<&str> {
    images.iter().map(|i| i.name.as_str()).collect()
}

#[test]
fn test_hidden_subtree_is_pruned() {
    let (_temp, home) = create_home();
    touch(&home.join("pics/.hidden/z.png"));
    touch(&home.join("pics/a.jpg"));

    let images = ImageDirectoryScanner::new(&home).scan("~/pics").unwrap();

    assert_eq!(images.len(), 1);
    assert_eq!(images[0].path, home.join("pics/a.jpg"));
    assert_eq!(images[0].extension, ".jpg");
    assert_eq!(images[0].mime_type, "image/jpeg");
    assert_eq!(images[0].size, 19);
}

#[test]
fn test_non_images_are_ignored() {
    let (_temp, home) = create_home();
    touch(&home.join("pics/b.WEBP"));
    touch(&home.join("pics/notes.txt"));
    touch(&home.join("pics/noext"));
    touch(&home.join("pics/nested/c.png"));

    let images = ImageDirectoryScanner::new(&home)
        .scan(home.join("pics").as_str())
        .unwrap();

    assert_eq!(names(&images), vec!["b.WEBP", "c.png"]);
    assert_eq!(images[0].mime_type, "image/webp");
}

#[cfg(unix)]
#[test]
fn test_unreadable_subdirectory_is_skipped() {
    use std::os::unix::fs::PermissionsExt;

    let (_temp, home) = create_home();
    touch(&home.join("pics/a.png"));
    touch(&home.join("pics/locked/secret.png"));
    touch(&home.join("pics/z.jpg"));

    let locked = home.join("pics/locked");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();

    // Permission bits don't bind a privileged user; nothing to check then
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let result = ImageDirectoryScanner::new(&home).scan("~/pics");

    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();

    let images = result.unwrap();
    assert_eq!(names(&images), vec!["a.png", "z.jpg"]);
}

#[cfg(unix)]
#[test]
fn test_dangling_symlink_is_skipped() {
    let (_temp, home) = create_home();
    touch(&home.join("pics/a.png"));
    touch(&home.join("pics/z.jpg"));
    std::os::unix::fs::symlink(home.join("pics/gone.png"), home.join("pics/broken.png"))
        .unwrap();

    let images = ImageDirectoryScanner::new(&home).scan("~/pics").unwrap();

    assert_eq!(names(&images), vec!["a.png", "z.jpg"]);
}

#[test]
fn test_missing_directory_is_not_found() {
    let (_temp, home) = create_home();
    let err = ImageDirectoryScanner::new(&home)
        .scan("~/Pictures")
        .unwrap_err();
    assert!(matches!(err, HyprError::NotFound { .. }));
}

#[test]
fn test_image_content_is_raw_bytes() {
    let (_temp, home) = create_home();
    let path = home.join("a.png");
    touch(&path);

    assert_eq!(get_image_content(&path).unwrap(), b"not really an image");
    assert!(matches!(
        get_image_content(&home.join("missing.png")),
        Err(HyprError::NotFound { .. })
    ));
}

#[test]
fn test_png_thumbnail_stays_png() {
    let (_temp, home) = create_home();
    let path = home.join("wide.png");
    RgbImage::new(200, 100).save(&path).unwrap();

    let thumbnail = get_thumbnail(&path, 50, 75).unwrap();

    assert_eq!(thumbnail.format, ThumbnailFormat::Png);
    assert_eq!((thumbnail.width, thumbnail.height), (50, 25));
    assert_eq!(
        image::guess_format(&thumbnail.bytes).unwrap(),
        ImageFormat::Png
    );
}

#[test]
fn test_jpeg_thumbnail_and_small_images() {
    let (_temp, home) = create_home();
    let path = home.join("tall.jpg");
    RgbImage::new(30, 60).save(&path).unwrap();

    let thumbnail = get_thumbnail(&path, 1000, 75).unwrap();

    assert_eq!(thumbnail.format, ThumbnailFormat::Jpeg);
    assert_eq!((thumbnail.width, thumbnail.height), (30, 60));
    assert_eq!(
        image::guess_format(&thumbnail.bytes).unwrap(),
        ImageFormat::Jpeg
    );
}

#[test]
fn test_undecodable_image_is_image_error() {
    let (_temp, home) = create_home();
    let path = home.join("broken.png");
    touch(&path);

    let err = get_thumbnail(&path, 100, 75).unwrap_err();
    assert!(matches!(err, HyprError::Image { .. }));
}
