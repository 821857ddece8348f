use serde::Serialize;
use std::error::Error as StdError;
use std::io;
use std::path::Path;
use std::time::Duration;

use crate::converter::data_uri::DataUri;
use crate::converter::mime::mime_from_path;
use crate::converter::path::validate_image_path;
use crate::{OcrError, Result};

/// Body sent to the OCR endpoint: `{"images": ["data:..."]}`.
#[derive(Debug, Clone, Serialize)]
pub struct OcrRequest {
    pub images: Vec<DataUri>,
}

impl OcrRequest {
    pub fn single(image: DataUri) -> Self {
        Self {
            images: vec![image],
        }
    }
}

/// Sends an [`OcrRequest`] somewhere and hands back the raw response body.
///
/// Implementations must turn non-success statuses into [`OcrError::Api`] and
/// expired deadlines into [`OcrError::Timeout`].
pub trait Transport {
    fn post_json(&self, url: &str, request: &OcrRequest) -> Result<String>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn post_json(&self, url: &str, request: &OcrRequest) -> Result<String> {
        (**self).post_json(url, request)
    }
}

/// Blocking HTTP transport on top of a `ureq` agent.
#[derive(Clone)]
pub struct UreqTransport {
    agent: ureq::Agent,
    timeout: Duration,
}

impl UreqTransport {
    /// `timeout` bounds the whole request, connect through last body byte.
    pub fn new(timeout: Duration) -> Self {
        let agent = ureq::AgentBuilder::new().timeout(timeout).build();
        Self { agent, timeout }
    }
}

impl Transport for UreqTransport {
    fn post_json(&self, url: &str, request: &OcrRequest) -> Result<String> {
        tracing::info!(url, timeout_secs = self.timeout.as_secs(), "sending OCR request");

        let response = match self.agent.post(url).send_json(request) {
            Ok(response) => response,
            Err(ureq::Error::Status(status, response)) => {
                let reason = response.status_text().to_string();
                let body = response.into_string().unwrap_or_default();
                let message = match body.trim() {
                    "" => reason,
                    body => format!("{}: {}", reason, body),
                };
                tracing::debug!(status, "OCR service returned an error status");
                return Err(OcrError::Api { status, message });
            }
            Err(ureq::Error::Transport(transport)) => {
                return Err(if is_timeout(&transport) {
                    OcrError::Timeout(self.timeout)
                } else {
                    OcrError::Transport(transport.to_string())
                });
            }
        };

        tracing::debug!(status = response.status(), "OCR service responded");

        response.into_string().map_err(|e| {
            if is_timeout(&e) {
                OcrError::Timeout(self.timeout)
            } else {
                OcrError::Transport(e.to_string())
            }
        })
    }
}

// Connect and read deadlines both surface as io errors somewhere in the chain.
fn is_timeout(err: &(dyn StdError + 'static)) -> bool {
    let mut current = Some(err);
    while let Some(err) = current {
        if let Some(io_err) = err.downcast_ref::<io::Error>() {
            if matches!(
                io_err.kind(),
                io::ErrorKind::TimedOut | io::ErrorKind::WouldBlock
            ) {
                return true;
            }
        }
        current = err.source();
    }
    false
}

/// Pull `markdown_result` out of a response body.
///
/// A missing, `null` or non-string field yields an empty string; only a body
/// that is not JSON at all is an error.
pub fn extract_markdown(body: &str) -> Result<String> {
    let response_json: serde_json::Value = serde_json::from_str(body)?;

    let markdown = response_json
        .get("markdown_result")
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string();

    if markdown.is_empty() {
        tracing::debug!("response carried no markdown_result");
    }

    Ok(markdown)
}

/// One-image OCR pipeline over a pluggable [`Transport`].
pub struct OcrClient<T> {
    transport: T,
    api_url: String,
}

impl<T: Transport> OcrClient<T> {
    pub fn new(transport: T, api_url: impl Into<String>) -> Self {
        Self {
            transport,
            api_url: api_url.into(),
        }
    }

    /// validate -> resolve type -> encode -> send -> extract.
    pub fn recognize(&self, image_path: impl AsRef<Path>) -> Result<String> {
        let path = validate_image_path(image_path.as_ref())?;

        let mime_type = mime_from_path(path);
        tracing::debug!(path = %path.display(), mime_type, "resolved media type");

        let image = DataUri::from_path(path, mime_type)?;
        let request = OcrRequest::single(image);

        let body = self.transport.post_json(&self.api_url, &request)?;
        extract_markdown(&body)
    }
}
