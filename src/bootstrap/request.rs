//! Bootstrap-Request (`POST /bs?ep=...`)

use std::collections::HashMap;

use crate::content_format::ContentFormat;
use crate::error::{Lwm2mError, Result};

/// Query parameter carrying the client's preferred content format
const PREFERRED_CONTENT_FORMAT: &str = "pct";

/// A client's request to be bootstrapped
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BootstrapRequest {
    endpoint_name: String,
    preferred_content_format: Option<ContentFormat>,
    additional_attributes: HashMap<String, String>,
}

impl BootstrapRequest {
    pub fn new(endpoint_name: impl Into<String>) -> Result<Self> {
        let endpoint_name = endpoint_name.into();
        if endpoint_name.is_empty() {
            return Err(Lwm2mError::InvalidRequest(
                "endpoint name must not be empty".to_string(),
            ));
        }
        Ok(Self {
            endpoint_name,
            preferred_content_format: None,
            additional_attributes: HashMap::new(),
        })
    }

    /// Build from the endpoint name and the remaining request query
    ///
    /// `pct=<code>` sets the preferred content format; every other
    /// `key[=value]` pair is kept as an additional attribute.
    pub fn from_query(endpoint_name: impl Into<String>, query: &str) -> Result<Self> {
        let mut request = Self::new(endpoint_name)?;
        for part in query.split('&').filter(|p| !p.is_empty()) {
            let (key, value) = part.split_once('=').unwrap_or((part, ""));
            if key == PREFERRED_CONTENT_FORMAT {
                let code = value.parse::<u16>().map_err(|_| {
                    Lwm2mError::InvalidRequest(format!("invalid pct value '{}'", value))
                })?;
                request.preferred_content_format = Some(ContentFormat::try_from(code)?);
            } else {
                request
                    .additional_attributes
                    .insert(key.to_string(), value.to_string());
            }
        }
        Ok(request)
    }

    pub fn with_preferred_content_format(mut self, format: ContentFormat) -> Self {
        self.preferred_content_format = Some(format);
        self
    }

    pub fn with_attribute(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.additional_attributes.insert(key.into(), value.into());
        self
    }

    pub fn endpoint_name(&self) -> &str {
        &self.endpoint_name
    }

    pub fn preferred_content_format(&self) -> Option<ContentFormat> {
        self.preferred_content_format
    }

    pub fn additional_attributes(&self) -> &HashMap<String, String> {
        &self.additional_attributes
    }
}
