//! Attribute models: per-kind grammar, validation and serialization
//!
//! Each [`AttributeModel`] is a `'static`, immutable description of one
//! CoRE Link attribute. Models carry no mutable state, so the shared
//! instances in [`crate::attributes::registry`] can be used from any
//! number of threads at once.

use std::fmt;
use std::str::FromStr;

use bigdecimal::BigDecimal;
use bigdecimal::num_bigint::Sign;

use super::value::{Attribute, AttributeValue, Version, format_decimal};
use crate::error::Result;
use crate::parser::StringParser;

/// Link-format element an attribute may annotate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Attachment {
    /// `</>`
    Root,
    /// `</3>`
    Object,
    /// `</3/0>`
    ObjectInstance,
    /// `</3/0/1>`
    Resource,
    /// `</3/0/6/0>`
    ResourceInstance,
}

impl Attachment {
    /// Attachment for a link path of the given depth (0 = root)
    pub fn from_depth(depth: usize) -> Option<Self> {
        match depth {
            0 => Some(Self::Root),
            1 => Some(Self::Object),
            2 => Some(Self::ObjectInstance),
            3 => Some(Self::Resource),
            4 => Some(Self::ResourceInstance),
            _ => None,
        }
    }
}

impl fmt::Display for Attachment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Attachment::Root => f.write_str("root"),
            Attachment::Object => f.write_str("object"),
            Attachment::ObjectInstance => f.write_str("object instance"),
            Attachment::Resource => f.write_str("resource"),
            Attachment::ResourceInstance => f.write_str("resource instance"),
        }
    }
}

/// Whether an attribute can be read (discover) and/or written (write-attributes)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccessMode {
    Read,
    Write,
    ReadWrite,
}

impl AccessMode {
    pub fn is_readable(self) -> bool {
        matches!(self, Self::Read | Self::ReadWrite)
    }

    pub fn is_writable(self) -> bool {
        matches!(self, Self::Write | Self::ReadWrite)
    }
}

/// Logical grouping of attributes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttributeClass {
    /// Descriptive attributes reported by discover (`dim`, `ver`, ...)
    Properties,
    /// Attributes driving observe/notify behavior (`pmin`, `gt`, ...)
    Notification,
}

/// Value grammar of an attribute
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValueKind {
    /// `1*DIGIT ["." 1*DIGIT]`, never negative
    PositiveDecimal,
    /// `["-"] 1*DIGIT ["." 1*DIGIT]`
    Decimal,
    /// `1*DIGIT`, bounded to `min..=max`
    Unsigned { min: u64, max: u64 },
    /// `"0" / "1"`
    Flag,
    /// `DQUOTE *(qdtext / "\" CHAR) DQUOTE`
    QuotedString,
    /// `[DQUOTE] 1*DIGIT "." 1*DIGIT [DQUOTE]`
    Version,
}

impl ValueKind {
    fn describe(self) -> &'static str {
        match self {
            ValueKind::PositiveDecimal => "positive decimal",
            ValueKind::Decimal => "decimal",
            ValueKind::Unsigned { .. } => "unsigned integer",
            ValueKind::Flag => "0/1 flag",
            ValueKind::QuotedString => "quoted string",
            ValueKind::Version => "version",
        }
    }
}

/// Description of one CoRE Link attribute
#[derive(Debug, PartialEq, Eq)]
pub struct AttributeModel {
    name: &'static str,
    attachments: &'static [Attachment],
    access_mode: AccessMode,
    class: AttributeClass,
    kind: ValueKind,
}

impl AttributeModel {
    pub const fn new(
        name: &'static str,
        attachments: &'static [Attachment],
        access_mode: AccessMode,
        class: AttributeClass,
        kind: ValueKind,
    ) -> Self {
        Self {
            name,
            attachments,
            access_mode,
            class,
            kind,
        }
    }

    /// Wire token, e.g. `pmin`
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn attachments(&self) -> &'static [Attachment] {
        self.attachments
    }

    pub fn access_mode(&self) -> AccessMode {
        self.access_mode
    }

    pub fn class(&self) -> AttributeClass {
        self.class
    }

    pub fn kind(&self) -> ValueKind {
        self.kind
    }

    pub fn can_be_attached_to(&self, attachment: Attachment) -> bool {
        self.attachments.contains(&attachment)
    }

    /// Explain why `value` is not acceptable for this attribute, or `None` if it is
    pub fn invalid_value_cause(&self, value: &AttributeValue) -> Option<String> {
        match (self.kind, value) {
            (ValueKind::PositiveDecimal, AttributeValue::Decimal(v)) => {
                if v.sign() == Sign::Minus {
                    Some(format!("'{}' attribute value must not be negative", self.name))
                } else {
                    None
                }
            }
            (ValueKind::Decimal, AttributeValue::Decimal(_)) => None,
            (ValueKind::Unsigned { min, max }, AttributeValue::Unsigned(v)) => {
                if *v < min || *v > max {
                    Some(format!(
                        "'{}' attribute value must be between {} and {}",
                        self.name, min, max
                    ))
                } else {
                    None
                }
            }
            (ValueKind::Flag, AttributeValue::Boolean(_)) => None,
            (ValueKind::QuotedString, AttributeValue::Text(s)) => {
                if s.is_empty() {
                    Some(format!("'{}' attribute value must not be empty", self.name))
                } else {
                    None
                }
            }
            (ValueKind::Version, AttributeValue::Version(_)) => None,
            (kind, _) => Some(format!(
                "'{}' attribute expects a {} value",
                self.name,
                kind.describe()
            )),
        }
    }

    /// Parse this attribute's value at the parser's current position
    ///
    /// Trailing text after the value is left for the caller.
    pub fn consume_attribute_value(
        &'static self,
        parser: &mut StringParser<'_>,
    ) -> Result<Attribute> {
        let start = parser.position();
        let value = match self.kind {
            ValueKind::PositiveDecimal => self.consume_decimal(parser, false)?,
            ValueKind::Decimal => self.consume_decimal(parser, true)?,
            ValueKind::Unsigned { .. } => self.consume_unsigned(parser)?,
            ValueKind::Flag => self.consume_flag(parser)?,
            ValueKind::QuotedString => self.consume_quoted_string(parser)?,
            ValueKind::Version => self.consume_version(parser)?,
        };

        if let Some(cause) = self.invalid_value_cause(&value) {
            return Err(parser.error(format!(
                "{} value '{}' is invalid in {}: {}",
                self.name,
                parser.substring(start, parser.position()),
                parser.string_to_parse(),
                cause
            )));
        }
        Ok(Attribute::from_validated(self, Some(value)))
    }

    /// Attribute occurrence without a value (`pmin` alone in a write-attributes query)
    pub fn create_empty_attribute(&'static self) -> Attribute {
        Attribute::from_validated(self, None)
    }

    /// Canonical value text; empty for a valueless attribute
    pub fn to_core_link_value(&self, attribute: &Attribute) -> String {
        match attribute.value() {
            None => String::new(),
            Some(AttributeValue::Decimal(v)) => format_decimal(v),
            Some(AttributeValue::Unsigned(v)) => v.to_string(),
            Some(AttributeValue::Boolean(true)) => "1".to_string(),
            Some(AttributeValue::Boolean(false)) => "0".to_string(),
            Some(AttributeValue::Text(s)) => quote(s),
            Some(AttributeValue::Version(v)) => v.to_string(),
        }
    }

    fn consume_decimal(
        &self,
        parser: &mut StringParser<'_>,
        signed: bool,
    ) -> Result<AttributeValue> {
        let start = parser.position();
        if signed && parser.next_char_is('-') {
            parser.consume_next_char()?;
        }
        parser.consume_digit()?;
        while parser.next_char_is_digit() {
            parser.consume_next_char()?;
        }
        if parser.next_char_is('.') {
            parser.consume_next_char()?;
            parser.consume_digit()?;
            while parser.next_char_is_digit() {
                parser.consume_next_char()?;
            }
        }
        let end = parser.position();

        let text = parser.substring(start, end);
        let value = BigDecimal::from_str(text).map_err(|_| {
            parser.error(format!(
                "{} value '{}' is not a valid {} in {}",
                self.name,
                text,
                self.kind.describe(),
                parser.string_to_parse()
            ))
        })?;
        Ok(AttributeValue::Decimal(value))
    }

    fn consume_unsigned(&self, parser: &mut StringParser<'_>) -> Result<AttributeValue> {
        let start = parser.position();
        parser.consume_digit()?;
        while parser.next_char_is_digit() {
            parser.consume_next_char()?;
        }

        let text = parser.substring(start, parser.position());
        let value = text.parse::<u64>().map_err(|_| {
            parser.error(format!(
                "{} value '{}' is not a valid unsigned integer in {}",
                self.name,
                text,
                parser.string_to_parse()
            ))
        })?;
        Ok(AttributeValue::Unsigned(value))
    }

    fn consume_flag(&self, parser: &mut StringParser<'_>) -> Result<AttributeValue> {
        match parser.consume_digit()? {
            '0' => Ok(AttributeValue::Boolean(false)),
            '1' => Ok(AttributeValue::Boolean(true)),
            other => Err(parser.error(format!(
                "{} value '{}' must be 0 or 1 in {}",
                self.name,
                other,
                parser.string_to_parse()
            ))),
        }
    }

    fn consume_quoted_string(&self, parser: &mut StringParser<'_>) -> Result<AttributeValue> {
        parser.consume_char('"')?;
        let mut value = String::new();
        loop {
            match parser.next_char() {
                None => {
                    return Err(parser.error(format!(
                        "{} value is missing its closing quote in {}",
                        self.name,
                        parser.string_to_parse()
                    )));
                }
                Some('"') => {
                    parser.consume_next_char()?;
                    break;
                }
                Some('\\') => {
                    parser.consume_next_char()?;
                    value.push(parser.consume_next_char()?);
                }
                Some(_) => value.push(parser.consume_next_char()?),
            }
        }
        Ok(AttributeValue::Text(value))
    }

    fn consume_version(&self, parser: &mut StringParser<'_>) -> Result<AttributeValue> {
        let quoted = parser.next_char_is('"');
        if quoted {
            parser.consume_next_char()?;
        }
        let start = parser.position();
        parser.consume_digit()?;
        while parser.next_char_is_digit() {
            parser.consume_next_char()?;
        }
        parser.consume_char('.')?;
        parser.consume_digit()?;
        while parser.next_char_is_digit() {
            parser.consume_next_char()?;
        }
        let text = parser.substring(start, parser.position());
        if quoted {
            parser.consume_char('"')?;
        }

        let version = Version::from_str(text).map_err(|e| {
            parser.error(format!(
                "{} value '{}' is not a valid version in {}: {}",
                self.name,
                text,
                parser.string_to_parse(),
                e
            ))
        })?;
        Ok(AttributeValue::Version(version))
    }
}

fn quote(s: &str) -> String {
    let mut quoted = String::with_capacity(s.len() + 2);
    quoted.push('"');
    for c in s.chars() {
        if c == '"' || c == '\\' {
            quoted.push('\\');
        }
        quoted.push(c);
    }
    quoted.push('"');
    quoted
}
