//! Attribute values and attribute instances

use std::fmt;
use std::str::FromStr;

use bigdecimal::num_bigint::Sign;
use bigdecimal::{BigDecimal, RoundingMode};

use super::model::AttributeModel;
use crate::error::{Lwm2mError, Result};

/// Maximum number of fraction digits written for a decimal value
pub const MAX_FRACTION_DIGITS: i64 = 340;

/// Object or enabler version, `major.minor`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u8,
    pub minor: u8,
}

impl Version {
    pub const V1_0: Version = Version::new(1, 0);
    pub const V1_1: Version = Version::new(1, 1);

    pub const fn new(major: u8, minor: u8) -> Self {
        Self { major, minor }
    }
}

impl Default for Version {
    fn default() -> Self {
        Self::V1_0
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = Lwm2mError;

    fn from_str(s: &str) -> Result<Self> {
        let (major, minor) = s
            .split_once('.')
            .ok_or_else(|| Lwm2mError::InvalidValue(format!("version '{}' has no '.'", s)))?;
        let parse = |part: &str| {
            part.parse::<u8>()
                .map_err(|_| Lwm2mError::InvalidValue(format!("invalid version '{}'", s)))
        };
        Ok(Self::new(parse(major)?, parse(minor)?))
    }
}

/// Typed value carried by an [`Attribute`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AttributeValue {
    Decimal(BigDecimal),
    Unsigned(u64),
    Boolean(bool),
    Text(String),
    Version(Version),
}

impl AttributeValue {
    pub fn as_decimal(&self) -> Option<&BigDecimal> {
        match self {
            AttributeValue::Decimal(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_unsigned(&self) -> Option<u64> {
        match self {
            AttributeValue::Unsigned(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            AttributeValue::Boolean(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttributeValue::Text(v) => Some(v),
            _ => None,
        }
    }

    pub fn as_version(&self) -> Option<Version> {
        match self {
            AttributeValue::Version(v) => Some(*v),
            _ => None,
        }
    }
}

impl From<BigDecimal> for AttributeValue {
    fn from(value: BigDecimal) -> Self {
        AttributeValue::Decimal(value)
    }
}

impl From<u64> for AttributeValue {
    fn from(value: u64) -> Self {
        AttributeValue::Unsigned(value)
    }
}

impl From<bool> for AttributeValue {
    fn from(value: bool) -> Self {
        AttributeValue::Boolean(value)
    }
}

impl From<&str> for AttributeValue {
    fn from(value: &str) -> Self {
        AttributeValue::Text(value.to_string())
    }
}

impl From<String> for AttributeValue {
    fn from(value: String) -> Self {
        AttributeValue::Text(value)
    }
}

impl From<Version> for AttributeValue {
    fn from(value: Version) -> Self {
        AttributeValue::Version(value)
    }
}

/// A validated attribute: a model plus an optional value
///
/// A present value always satisfied the model's validation when the
/// attribute was built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attribute {
    model: &'static AttributeModel,
    value: Option<AttributeValue>,
}

impl Attribute {
    /// Build an attribute from application code, validating the value
    pub fn new(model: &'static AttributeModel, value: impl Into<AttributeValue>) -> Result<Self> {
        let value = value.into();
        if let Some(cause) = model.invalid_value_cause(&value) {
            return Err(Lwm2mError::InvalidValue(cause));
        }
        Ok(Self::from_validated(model, Some(value)))
    }

    pub(crate) fn from_validated(
        model: &'static AttributeModel,
        value: Option<AttributeValue>,
    ) -> Self {
        Self { model, value }
    }

    pub fn model(&self) -> &'static AttributeModel {
        self.model
    }

    pub fn name(&self) -> &'static str {
        self.model.name()
    }

    pub fn value(&self) -> Option<&AttributeValue> {
        self.value.as_ref()
    }

    pub fn has_value(&self) -> bool {
        self.value.is_some()
    }

    /// `name=value`, or just `name` when there is no value
    pub fn to_core_link(&self) -> String {
        match self.value {
            Some(_) => format!("{}={}", self.name(), self.model.to_core_link_value(self)),
            None => self.name().to_string(),
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_core_link())
    }
}

/// Render a decimal as `["-"] 1*DIGIT ["." 1*DIGIT]`
///
/// Never uses an exponent. Trailing fraction zeros are dropped and values
/// finer than [`MAX_FRACTION_DIGITS`] are rounded half-even.
pub(crate) fn format_decimal(value: &BigDecimal) -> String {
    let mut normalized = value.normalized();
    let (_, scale) = normalized.as_bigint_and_exponent();
    if scale > MAX_FRACTION_DIGITS {
        normalized = value
            .with_scale_round(MAX_FRACTION_DIGITS, RoundingMode::HalfEven)
            .normalized();
    }
    let (unscaled, scale) = normalized.into_bigint_and_exponent();
    if unscaled.sign() == Sign::NoSign {
        return "0".to_string();
    }

    let digits = unscaled.magnitude().to_string();
    let mut out = String::with_capacity(digits.len() + 3);
    if unscaled.sign() == Sign::Minus {
        out.push('-');
    }

    if scale <= 0 {
        out.push_str(&digits);
        out.extend(std::iter::repeat_n('0', scale.unsigned_abs() as usize));
    } else {
        let scale = scale as usize;
        if digits.len() > scale {
            let (int_part, fraction) = digits.split_at(digits.len() - scale);
            out.push_str(int_part);
            out.push('.');
            out.push_str(fraction);
        } else {
            out.push_str("0.");
            out.extend(std::iter::repeat_n('0', scale - digits.len()));
            out.push_str(&digits);
        }
    }
    out
}
