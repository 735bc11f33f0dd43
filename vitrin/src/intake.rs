//! Validation and preview handling for locally supplied product photos.

use std::path::Path;

use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;
use bytes::Bytes;

use crate::error::{Error, Result};

/// Hard cap on accepted uploads: 4 MiB.
pub const MAX_UPLOAD_BYTES: usize = 4 * 1024 * 1024;

/// Media types the picker accepts.
pub const SUPPORTED_MEDIA_TYPES: &[&str] = &["image/png", "image/jpeg", "image/webp"];

/// A validated product photo, held only in memory for the current run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadedFile {
    data: Bytes,
    media_type: String,
}

impl UploadedFile {
    /// Validate and accept an upload from the picker or a drop event.
    ///
    /// # Errors
    /// Returns [`Error::Validation`] when the payload exceeds 4 MiB or
    /// carries an unsupported media type.
    pub fn new(data: impl Into<Bytes>, media_type: impl Into<String>) -> Result<Self> {
        let data = data.into();
        let media_type = media_type.into();
        if data.len() > MAX_UPLOAD_BYTES {
            return Err(Error::Validation {
                message: "Dosya boyutu 4MB'den küçük olmalıdır.".into(),
            });
        }
        if !SUPPORTED_MEDIA_TYPES.contains(&media_type.as_str()) {
            return Err(Error::Validation {
                message: format!("Desteklenmeyen dosya türü: {media_type}"),
            });
        }
        Ok(Self { data, media_type })
    }

    /// Read a file from disk, guessing the media type from its extension.
    ///
    /// # Errors
    /// Returns an IO error when the file cannot be read, or
    /// [`Error::Validation`] when it fails upload validation.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let data = std::fs::read(path)?;
        let media_type = mime_guess::from_path(path).first_or_octet_stream();
        Self::new(data, media_type.essence_str())
    }

    /// Raw file content.
    #[must_use]
    pub fn data(&self) -> &Bytes {
        &self.data
    }

    /// Declared media type.
    #[must_use]
    pub fn media_type(&self) -> &str {
        &self.media_type
    }

    /// Size in bytes.
    #[must_use]
    pub fn size(&self) -> usize {
        self.data.len()
    }

    /// Encode the file as a displayable data URI for the preview slot.
    #[must_use]
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.media_type,
            STANDARD.encode(&self.data)
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn test_accepts_file_at_limit() {
        let file = UploadedFile::new(vec![0u8; MAX_UPLOAD_BYTES], "image/jpeg").unwrap();
        assert_eq!(file.size(), MAX_UPLOAD_BYTES);
    }

    #[test]
    fn test_rejects_oversized_file() {
        let err = UploadedFile::new(vec![0u8; MAX_UPLOAD_BYTES + 1], "image/jpeg")
            .err()
            .unwrap();
        assert!(matches!(err, Error::Validation { .. }));
        assert!(err.to_string().contains("4MB"));
    }

    #[test]
    fn test_rejects_unsupported_media_type() {
        let err = UploadedFile::new(vec![0u8; 8], "application/pdf").err().unwrap();
        assert!(matches!(err, Error::Validation { .. }));
    }

    #[test]
    fn test_data_uri_prefix_and_payload() {
        let file = UploadedFile::new(vec![1, 2, 3], "image/png").unwrap();
        assert_eq!(file.data_uri(), "data:image/png;base64,AQID");
    }

    #[test]
    fn test_from_path_guesses_media_type() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("product.webp");
        let mut handle = std::fs::File::create(&path).unwrap();
        handle.write_all(&[0u8; 16]).unwrap();

        let file = UploadedFile::from_path(&path).unwrap();
        assert_eq!(file.media_type(), "image/webp");
        assert_eq!(file.size(), 16);
    }

    #[test]
    fn test_from_path_rejects_unknown_extension() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes.txt");
        std::fs::write(&path, b"hello").unwrap();

        let err = UploadedFile::from_path(&path).err().unwrap();
        assert!(matches!(err, Error::Validation { .. }));
    }
}
