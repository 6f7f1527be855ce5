//! Product photo loading and inlining.

use crate::errors::{AppError, AppResult};
use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use std::fs;
use std::path::Path;

const PNG_MAGIC: &[u8] = b"\x89PNG\r\n\x1a\n";

/// Accepted upload extensions.
pub const IMAGE_EXTENSIONS: [&str; 3] = ["jpg", "jpeg", "png"];

/// An uploaded product photo.
#[derive(Debug, Clone)]
pub struct ProductImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

impl ProductImage {
    /// Read an image from disk, rejecting anything that is not jpg/jpeg/png.
    pub fn open(path: &Path) -> AppResult<Self> {
        let display = path.display().to_string();

        let ext_ok = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| IMAGE_EXTENSIONS.contains(&e.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        if !ext_ok {
            return Err(AppError::UnsupportedImage(display));
        }

        let bytes = fs::read(path)?;
        if bytes.is_empty() {
            return Err(AppError::UnsupportedImage(display));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or(display);

        Ok(Self { file_name, bytes })
    }

    pub fn mime(&self) -> &'static str {
        mime_for(&self.bytes)
    }

    /// `data:<mime>;base64,<payload>` URL for inline upload.
    pub fn data_url(&self) -> String {
        data_url(&self.bytes)
    }
}

/// PNG when the bytes say so, JPEG otherwise.
pub fn mime_for(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(PNG_MAGIC) {
        "image/png"
    } else {
        "image/jpeg"
    }
}

pub fn data_url(bytes: &[u8]) -> String {
    format!("data:{};base64,{}", mime_for(bytes), STANDARD.encode(bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn detects_png_and_jpeg() {
        assert_eq!(mime_for(b"\x89PNG\r\n\x1a\n...."), "image/png");
        assert_eq!(mime_for(b"\xFF\xD8\xFF\xE0...."), "image/jpeg");
        assert_eq!(mime_for(b"GIF89a"), "image/jpeg");
    }

    #[test]
    fn data_url_is_base64() {
        assert_eq!(data_url(b"\xFF\xD8\xFF"), "data:image/jpeg;base64,/9j/");
    }

    #[test]
    fn rejects_other_extensions() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("photo.gif");
        fs::write(&p, b"GIF89a").unwrap();
        assert!(matches!(
            ProductImage::open(&p),
            Err(AppError::UnsupportedImage(_))
        ));
    }

    #[test]
    fn accepts_uppercase_extension() {
        let dir = tempdir().unwrap();
        let p = dir.path().join("PHOTO.JPG");
        fs::write(&p, b"\xFF\xD8\xFF\xE0").unwrap();
        let img = ProductImage::open(&p).unwrap();
        assert_eq!(img.file_name, "PHOTO.JPG");
        assert_eq!(img.mime(), "image/jpeg");
    }
}
