use base64::Engine;
use serde::{Serialize, Serializer};
use std::fmt;
use std::path::Path;

use crate::{OcrError, Result};

/// `data:<mime>;base64,<payload>` built from a file's raw bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataUri(String);

impl DataUri {
    pub fn from_bytes(bytes: &[u8], mime_type: &str) -> Self {
        let encoded = base64::engine::general_purpose::STANDARD.encode(bytes);
        Self(format!("data:{};base64,{}", mime_type, encoded))
    }

    /// Read the whole file into memory and encode it.
    pub fn from_path(path: &Path, mime_type: &str) -> Result<Self> {
        let bytes = std::fs::read(path).map_err(|source| OcrError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        tracing::debug!(path = %path.display(), bytes = bytes.len(), "read image");
        Ok(Self::from_bytes(&bytes, mime_type))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DataUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for DataUri {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn decode_payload(uri: &DataUri) -> Vec<u8> {
        let (_, payload) = uri.as_str().split_once(";base64,").unwrap();
        base64::engine::general_purpose::STANDARD.decode(payload).unwrap()
    }

    #[test]
    fn test_format() {
        let uri = DataUri::from_bytes(b"hello", "image/png");
        assert_eq!(uri.as_str(), "data:image/png;base64,aGVsbG8=");
        assert_eq!(uri.to_string(), uri.as_str());
    }

    #[test]
    fn test_empty_file_still_encodes() {
        let uri = DataUri::from_bytes(&[], "application/octet-stream");
        assert_eq!(uri.as_str(), "data:application/octet-stream;base64,");
    }

    #[test]
    fn test_file_bytes_survive_encoding() {
        // PNG signature plus bytes that exercise every padding case
        let bytes: Vec<u8> = [0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a]
            .into_iter()
            .chain(0u8..=255)
            .collect();
        let mut file = tempfile::Builder::new().suffix(".png").tempfile().unwrap();
        file.write_all(&bytes).unwrap();

        let uri = DataUri::from_path(file.path(), "image/png").unwrap();
        assert!(uri.as_str().starts_with("data:image/png;base64,"));
        assert_eq!(decode_payload(&uri), bytes);
    }

    #[test]
    fn test_read_failure_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = DataUri::from_path(&dir.path().join("gone.png"), "image/png").unwrap_err();
        assert!(matches!(err, OcrError::Read { .. }));
    }

    #[test]
    fn test_serializes_as_string() {
        let uri = DataUri::from_bytes(b"x", "image/gif");
        assert_eq!(
            serde_json::to_string(&uri).unwrap(),
            "\"data:image/gif;base64,eA==\""
        );
    }
}
