//! Attribute-list parsing
//!
//! Two textual forms carry attribute lists:
//! - write-attributes query: `pmin=10&pmax=60&st`
//! - CoRE Link parameters: `;pmin=10;pmax=60`
//!
//! The first bad attribute aborts the whole list and its error is returned
//! unchanged.

use tracing::debug;

use super::registry;
use super::set::AttributeSet;
use super::value::Attribute;
use crate::error::{Lwm2mError, Result};
use crate::parser::StringParser;

const QUERY_SEPARATOR: char = '&';
const PARAM_SEPARATOR: char = ';';
const LINK_SEPARATOR: char = ',';

/// Parse a write-attributes query (`attr *("&" attr)`)
pub fn parse_query(text: &str) -> Result<AttributeSet> {
    let mut set = AttributeSet::new();
    if text.is_empty() {
        return Ok(set);
    }

    let mut parser = StringParser::new(text);
    consume_query(&mut parser, &mut set)
        .inspect_err(|e| debug!(input = text, error = %e, "rejected write-attributes query"))?;
    Ok(set)
}

fn consume_query(parser: &mut StringParser<'_>, set: &mut AttributeSet) -> Result<()> {
    loop {
        let attribute = consume_attribute(parser, &[QUERY_SEPARATOR])?;
        set.insert(attribute)?;
        if !parser.has_more_chars() {
            return Ok(());
        }
        parser.consume_char(QUERY_SEPARATOR)?;
    }
}

/// Parse CoRE Link parameters (`*(";" attr)`) making up the whole input
pub fn parse_link_params(text: &str) -> Result<AttributeSet> {
    let mut parser = StringParser::new(text);
    let set = consume_link_params(&mut parser)?;
    if parser.has_more_chars() {
        let err = parser.error(format!(
            "unexpected '{}' at index {} in {}",
            parser.next_char().unwrap_or_default(),
            parser.position(),
            text
        ));
        debug!(input = text, error = %err, "rejected link parameters");
        return Err(err);
    }
    Ok(set)
}

/// Consume `*(";" attr)`, stopping before a `,` or at end of input
pub(crate) fn consume_link_params(parser: &mut StringParser<'_>) -> Result<AttributeSet> {
    let mut set = AttributeSet::new();
    while parser.next_char_is(PARAM_SEPARATOR) {
        parser.consume_next_char()?;
        let attribute = consume_attribute(parser, &[PARAM_SEPARATOR, LINK_SEPARATOR])
            .inspect_err(|e| {
                debug!(input = parser.string_to_parse(), error = %e, "rejected link parameter")
            })?;
        set.insert(attribute)?;
    }
    Ok(set)
}

/// `name ["=" value]`, followed by a terminator or end of input
fn consume_attribute(parser: &mut StringParser<'_>, terminators: &[char]) -> Result<Attribute> {
    let name = consume_name(parser)?;
    let model = registry::find(name).ok_or_else(|| Lwm2mError::UnknownAttribute(name.to_string()))?;

    let attribute = if parser.next_char_is('=') {
        parser.consume_next_char()?;
        model.consume_attribute_value(parser)?
    } else {
        model.create_empty_attribute()
    };

    if let Some(c) = parser.next_char()
        && !terminators.contains(&c)
    {
        return Err(parser.error(format!(
            "unexpected '{}' after '{}' attribute at index {} in {}",
            c,
            name,
            parser.position(),
            parser.string_to_parse()
        )));
    }
    Ok(attribute)
}

fn consume_name<'a>(parser: &mut StringParser<'a>) -> Result<&'a str> {
    let start = parser.position();
    parser.consume_alpha_digit()?;
    while parser.next_char_is_alpha()
        || parser.next_char_is_digit()
        || parser.next_char_is('_')
        || parser.next_char_is('-')
    {
        parser.consume_next_char()?;
    }
    Ok(parser.substring(start, parser.position()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::AttributeValue;

    #[test]
    fn test_parse_query() {
        let set = parse_query("pmin=10&pmax=60&st=0.5").unwrap();
        assert_eq!(set.len(), 3);
        assert_eq!(
            set.get("pmax").and_then(|a| a.value()),
            Some(&AttributeValue::Unsigned(60))
        );
        assert_eq!(set.to_query(), "pmin=10&pmax=60&st=0.5");
    }

    #[test]
    fn test_parse_query_valueless() {
        let set = parse_query("pmin&gt=-2.5").unwrap();
        assert!(!set.get("pmin").unwrap().has_value());
        assert_eq!(set.get("gt").unwrap().to_core_link(), "gt=-2.5");
    }

    #[test]
    fn test_parse_query_empty() {
        assert!(parse_query("").unwrap().is_empty());
    }

    #[test]
    fn test_parse_query_errors() {
        assert!(matches!(
            parse_query("foo=1"),
            Err(Lwm2mError::UnknownAttribute(name)) if name == "foo"
        ));
        assert!(matches!(
            parse_query("pmin=1&pmin=2"),
            Err(Lwm2mError::DuplicateAttribute(_))
        ));
        assert!(matches!(parse_query("st=12x"), Err(Lwm2mError::Parse { .. })));
        assert!(matches!(parse_query("pmin=1&"), Err(Lwm2mError::Parse { .. })));
        assert!(matches!(parse_query("st=-1"), Err(Lwm2mError::Parse { .. })));
    }

    #[test]
    fn test_parse_link_params() {
        let set = parse_link_params(r#";ssid=101;uri="coaps://bs.example:5684""#).unwrap();
        assert_eq!(set.get("ssid").unwrap().value(), Some(&AttributeValue::Unsigned(101)));
        assert_eq!(
            set.get("uri").and_then(|a| a.value()).and_then(|v| v.as_text()),
            Some("coaps://bs.example:5684")
        );
    }

    #[test]
    fn test_parse_link_params_trailing() {
        assert!(parse_link_params("").unwrap().is_empty());
        assert!(parse_link_params("pmin=1").is_err());
        assert!(parse_link_params(";pmin=1,").is_err());
    }
}
