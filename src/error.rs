//! Error types for lwm2m-bootstrap

use thiserror::Error;

use crate::attributes::Attachment;

/// Main error type for attribute and bootstrap operations
#[derive(Debug, Error)]
pub enum Lwm2mError {
    /// Text rejected while parsing (grammar, numeric or range failure)
    #[error("Parse error at position {position}: {message}")]
    Parse { message: String, position: usize },

    /// Attribute value or attribute combination rejected by validation
    #[error("Invalid attribute value: {0}")]
    InvalidValue(String),

    /// No attribute model registered under this name
    #[error("Unknown attribute: {0}")]
    UnknownAttribute(String),

    /// The same attribute appears twice in one set
    #[error("Duplicate attribute: {0}")]
    DuplicateAttribute(String),

    /// Attribute used on an element it cannot annotate
    #[error("Attribute '{name}' cannot be attached to {attachment}")]
    IllegalAttachment { name: String, attachment: Attachment },

    /// Read-only attribute used in a write-attributes request (maps to CoAP 4.00)
    #[error("Attribute '{0}' is not writable")]
    NotWritable(String),

    /// Malformed endpoint URI
    #[error("Invalid endpoint URI: {0}")]
    InvalidEndpointUri(String),

    /// Malformed bootstrap request
    #[error("Invalid bootstrap request: {0}")]
    InvalidRequest(String),

    /// Unknown content format code (maps to CoAP 4.15)
    #[error("Unsupported content format: {0}")]
    UnsupportedContentFormat(u16),

    /// IO error (configuration files)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing/serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Result type alias for lwm2m-bootstrap operations
pub type Result<T> = std::result::Result<T, Lwm2mError>;
