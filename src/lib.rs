//! Send a local image to a GLM-OCR style service and get markdown back.
//!
//! The pipeline is linear: validate the path, resolve the media type from the
//! extension, wrap the bytes in a base64 data URI, POST it, and read
//! `markdown_result` out of the JSON reply.

use std::path::{Path, PathBuf};
use std::time::Duration;

pub mod config;
pub mod converter;
pub mod generator;

pub use config::Settings;
pub use converter::data_uri::DataUri;
pub use generator::ocr2md::{OcrClient, OcrRequest, Transport, UreqTransport};

/// Default OCR endpoint.
pub const DEFAULT_API_URL: &str = "http://localhost:5002/glmocr/parse";

/// Upper bound on how long a single OCR request may take.
pub const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Error types for OCR operations
#[derive(Debug, thiserror::Error)]
pub enum OcrError {
    #[error("File not found: {}", .0.display())]
    FileNotFound(PathBuf),

    #[error("Failed to read file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write output {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("API error: {status} {message}")]
    Api { status: u16, message: String },

    #[error("Request timed out after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Request failed: {0}")]
    Transport(String),

    #[error("Invalid JSON response: {0}")]
    InvalidResponse(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

/// Result type for OCR operations
pub type Result<T> = std::result::Result<T, OcrError>;

/// Run one image through the OCR service described by `settings`.
pub fn ocr(image_path: impl AsRef<Path>, settings: &Settings) -> Result<String> {
    let transport = UreqTransport::new(settings.timeout());
    OcrClient::new(transport, settings.api_url.clone()).recognize(image_path)
}
