//! Session manager configuration

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::content_format::ContentFormat;
use crate::error::{Lwm2mError, Result};

/// How bootstrap sessions pick their content format
///
/// ```json
/// { "default-content-format": "application/senml+cbor",
///   "honor-preferred-content-format": true }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", default)]
pub struct SessionConfig {
    /// Used when the client expresses no usable preference
    pub default_content_format: ContentFormat,
    /// Use the client's `pct` when it names a bootstrap-write format
    pub honor_preferred_content_format: bool,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            default_content_format: ContentFormat::Tlv,
            honor_preferred_content_format: true,
        }
    }
}

impl SessionConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        Self::from_json_str(&content)
    }

    /// Parse configuration from a JSON string
    pub fn from_json_str(content: &str) -> Result<Self> {
        let config: SessionConfig = serde_json::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if !self.default_content_format.is_bootstrap_write_format() {
            return Err(Lwm2mError::UnsupportedContentFormat(
                self.default_content_format.code(),
            ));
        }
        Ok(())
    }
}

impl std::str::FromStr for SessionConfig {
    type Err = Lwm2mError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json_str(s)
    }
}
