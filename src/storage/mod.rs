use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use image::RgbImage;
use thiserror::Error;

pub const EXPORT_EXTENSION: &str = "png";
const DEFAULT_EXPORT_SUBDIR: &str = "Pictures";
const DEFAULT_EXPORT_NAME: &str = "drawing.png";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("export path is empty")]
    EmptyPath,
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("png encoding failed: {0}")]
    Encode(#[from] image::ImageError),
}

pub type StorageResult<T> = std::result::Result<T, StorageError>;

/// Appends `.png` unless the path already carries it (case-insensitive).
pub fn ensure_png_extension(path: &Path) -> PathBuf {
    let has_png_extension = path
        .extension()
        .and_then(|extension| extension.to_str())
        .is_some_and(|extension| extension.eq_ignore_ascii_case(EXPORT_EXTENSION));
    if has_png_extension {
        return path.to_path_buf();
    }

    let mut file_name = path.as_os_str().to_os_string();
    file_name.push(".");
    file_name.push(EXPORT_EXTENSION);
    PathBuf::from(file_name)
}

/// Writes the raster as PNG and returns the path actually written.
pub fn export_png(image: &RgbImage, requested: &Path) -> StorageResult<PathBuf> {
    if requested.as_os_str().is_empty() {
        return Err(StorageError::EmptyPath);
    }

    let target = ensure_png_extension(requested);
    if let Some(parent) = target.parent().filter(|parent| !parent.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    image.save_with_format(&target, image::ImageFormat::Png)?;
    tracing::info!(
        path = %target.display(),
        width = image.width(),
        height = image.height(),
        "exported canvas"
    );
    Ok(target)
}

/// Initial location suggested by the save dialog.
pub fn suggested_export_path() -> PathBuf {
    let mut path = std::env::var_os("HOME")
        .map(PathBuf::from)
        .map(|home| home.join(DEFAULT_EXPORT_SUBDIR))
        .unwrap_or_else(std::env::temp_dir);
    path.push(DEFAULT_EXPORT_NAME);
    path
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scratch_dir(name: &str) -> PathBuf {
        let dir = std::env::temp_dir().join(format!("scrawl-storage-{name}-{}", std::process::id()));
        let _ = fs::remove_dir_all(&dir);
        dir
    }

    #[test]
    fn ensure_png_extension_appends_when_missing() {
        assert_eq!(
            ensure_png_extension(Path::new("/tmp/out")),
            PathBuf::from("/tmp/out.png")
        );
        assert_eq!(
            ensure_png_extension(Path::new("/tmp/out.jpg")),
            PathBuf::from("/tmp/out.jpg.png")
        );
    }

    #[test]
    fn ensure_png_extension_keeps_existing_png_suffix() {
        assert_eq!(
            ensure_png_extension(Path::new("/tmp/out.png")),
            PathBuf::from("/tmp/out.png")
        );
        assert_eq!(
            ensure_png_extension(Path::new("/tmp/out.PNG")),
            PathBuf::from("/tmp/out.PNG")
        );
    }

    #[test]
    fn export_png_writes_decodable_file_with_same_pixels() {
        let dir = scratch_dir("roundtrip");
        let mut image = RgbImage::from_pixel(4, 3, image::Rgb([255, 255, 255]));
        image.put_pixel(1, 2, image::Rgb([10, 20, 30]));

        let written = export_png(&image, &dir.join("nested").join("picture")).unwrap();
        assert_eq!(written, dir.join("nested").join("picture.png"));

        let decoded = image::open(&written).unwrap().to_rgb8();
        assert_eq!(decoded, image);
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn export_png_rejects_empty_path() {
        let image = RgbImage::new(1, 1);
        let error = export_png(&image, Path::new("")).unwrap_err();
        assert!(matches!(error, StorageError::EmptyPath));
    }

    #[test]
    fn export_png_reports_io_failures() {
        let dir = scratch_dir("blocked");
        fs::create_dir_all(&dir).unwrap();
        let blocker = dir.join("file");
        fs::write(&blocker, b"not a directory").unwrap();

        let image = RgbImage::new(1, 1);
        let error = export_png(&image, &blocker.join("child")).unwrap_err();
        assert!(matches!(error, StorageError::Io(_)));
        let _ = fs::remove_dir_all(&dir);
    }

    #[test]
    fn suggested_export_path_names_a_png() {
        assert!(suggested_export_path().ends_with(DEFAULT_EXPORT_NAME));
    }
}
