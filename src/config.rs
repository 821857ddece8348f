//! Configuration management
//! Settings are layered from the built-in `Config.toml`, an optional file the
//! caller names explicitly, and finally command-line overrides applied by the
//! binary. Nothing is read from the environment.
//! Usage:
//! ```rust
//! use ocrmd::config::Settings;
//! let cfg = Settings::new(None).unwrap();
//! assert_eq!(cfg.api_url, ocrmd::DEFAULT_API_URL);
//! ```

use config::{Config, ConfigError, File, FileFormat};
use serde::Deserialize;
use std::path::Path;
use std::time::Duration;

use crate::{DEFAULT_API_URL, DEFAULT_TIMEOUT_SECS};

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Settings {
    pub api_url: String,
    pub timeout_secs: u64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

impl Settings {
    pub fn new(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        // 1. built-in default config
        let mut builder = Config::builder().add_source(File::from_str(
            include_str!("../Config.toml"),
            FileFormat::Toml,
        ));

        // 2. explicitly requested config file
        if let Some(path) = config_file {
            builder = builder.add_source(
                File::from(path.to_path_buf())
                    .format(FileFormat::Toml)
                    .required(true),
            );
        }

        builder.build()?.try_deserialize()
    }

    /// Replace the endpoint, e.g. from `--api-url`.
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = api_url.into();
        self
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
