//! LwM2M content formats
//!
//! CoAP Content-Format identifiers used by LwM2M payloads.
//! See: https://www.openmobilealliance.org/release/LightweightM2M/

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Lwm2mError, Result};

/// CoAP Content-Format identifiers for LwM2M
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "ContentFormatRepr", into = "u16")]
#[repr(u16)]
pub enum ContentFormat {
    /// text/plain
    Text = 0,
    /// application/link-format
    Link = 40,
    /// application/octet-stream
    Opaque = 42,
    /// application/cbor
    Cbor = 60,
    /// application/senml+json
    SenmlJson = 110,
    /// application/senml+cbor
    SenmlCbor = 112,
    /// Pre-registration TLV code used by LwM2M 1.0 clients
    OldTlv = 1542,
    /// Pre-registration JSON code used by LwM2M 1.0 clients
    OldJson = 1543,
    /// application/vnd.oma.lwm2m+tlv
    #[default]
    Tlv = 11542,
    /// application/vnd.oma.lwm2m+json
    Json = 11543,
    /// application/vnd.oma.lwm2m+cbor
    Lwm2mCbor = 11544,
}

const ALL: [ContentFormat; 11] = [
    ContentFormat::Text,
    ContentFormat::Link,
    ContentFormat::Opaque,
    ContentFormat::Cbor,
    ContentFormat::SenmlJson,
    ContentFormat::SenmlCbor,
    ContentFormat::OldTlv,
    ContentFormat::OldJson,
    ContentFormat::Tlv,
    ContentFormat::Json,
    ContentFormat::Lwm2mCbor,
];

impl ContentFormat {
    /// Convert from raw content-format ID
    pub fn from_code(code: u16) -> Option<Self> {
        ALL.into_iter().find(|format| format.code() == code)
    }

    /// Get the raw content-format ID
    pub fn code(self) -> u16 {
        self as u16
    }

    pub fn media_type(self) -> &'static str {
        match self {
            Self::Text => "text/plain",
            Self::Link => "application/link-format",
            Self::Opaque => "application/octet-stream",
            Self::Cbor => "application/cbor",
            Self::SenmlJson => "application/senml+json",
            Self::SenmlCbor => "application/senml+cbor",
            Self::OldTlv | Self::Tlv => "application/vnd.oma.lwm2m+tlv",
            Self::OldJson | Self::Json => "application/vnd.oma.lwm2m+json",
            Self::Lwm2mCbor => "application/vnd.oma.lwm2m+cbor",
        }
    }

    /// Look up a format by media type; legacy codes are never returned
    pub fn from_media_type(media_type: &str) -> Option<Self> {
        ALL.into_iter()
            .filter(|format| !matches!(format, Self::OldTlv | Self::OldJson))
            .find(|format| format.media_type() == media_type)
    }

    /// Whether bootstrap-write payloads can use this format
    pub fn is_bootstrap_write_format(self) -> bool {
        matches!(
            self,
            Self::Tlv
                | Self::OldTlv
                | Self::Json
                | Self::OldJson
                | Self::SenmlJson
                | Self::SenmlCbor
                | Self::Lwm2mCbor
        )
    }
}

impl fmt::Display for ContentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.media_type(), self.code())
    }
}

impl TryFrom<u16> for ContentFormat {
    type Error = Lwm2mError;

    fn try_from(code: u16) -> Result<Self> {
        Self::from_code(code).ok_or(Lwm2mError::UnsupportedContentFormat(code))
    }
}

impl From<ContentFormat> for u16 {
    fn from(format: ContentFormat) -> Self {
        format.code()
    }
}

/// Wire form accepted in configuration: numeric code or media type
#[derive(Deserialize)]
#[serde(untagged)]
enum ContentFormatRepr {
    Code(u16),
    MediaType(String),
}

impl TryFrom<ContentFormatRepr> for ContentFormat {
    type Error = String;

    fn try_from(repr: ContentFormatRepr) -> std::result::Result<Self, String> {
        match repr {
            ContentFormatRepr::Code(code) => {
                ContentFormat::try_from(code).map_err(|e| e.to_string())
            }
            ContentFormatRepr::MediaType(media_type) => ContentFormat::from_media_type(&media_type)
                .ok_or_else(|| format!("unknown media type: {}", media_type)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_format_conversion() {
        assert_eq!(ContentFormat::from_code(11542), Some(ContentFormat::Tlv));
        assert_eq!(ContentFormat::SenmlCbor.code(), 112);
        assert!(ContentFormat::from_code(9999).is_none());
        assert!(matches!(
            ContentFormat::try_from(9999),
            Err(Lwm2mError::UnsupportedContentFormat(9999))
        ));
    }

    #[test]
    fn test_media_type() {
        assert_eq!(
            ContentFormat::from_media_type("application/vnd.oma.lwm2m+tlv"),
            Some(ContentFormat::Tlv)
        );
        assert_eq!(ContentFormat::OldJson.media_type(), ContentFormat::Json.media_type());
    }

    #[test]
    fn test_bootstrap_write_formats() {
        assert!(ContentFormat::Tlv.is_bootstrap_write_format());
        assert!(ContentFormat::SenmlCbor.is_bootstrap_write_format());
        assert!(!ContentFormat::Link.is_bootstrap_write_format());
        assert!(!ContentFormat::Text.is_bootstrap_write_format());
    }

    #[test]
    fn test_serde() {
        let format: ContentFormat = serde_json::from_str("112").unwrap();
        assert_eq!(format, ContentFormat::SenmlCbor);
        let format: ContentFormat =
            serde_json::from_str(r#""application/senml+json""#).unwrap();
        assert_eq!(format, ContentFormat::SenmlJson);
        assert!(serde_json::from_str::<ContentFormat>("7").is_err());
        assert_eq!(serde_json::to_string(&ContentFormat::Tlv).unwrap(), "11542");
    }
}
