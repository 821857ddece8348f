use std::path::Path;

use crate::{OcrError, Result};

/// Make sure `path` names an existing regular file. Nothing is read yet.
pub fn validate_image_path(path: &Path) -> Result<&Path> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(path),
        _ => Err(OcrError::FileNotFound(path.to_path_buf())),
    }
}
