//! CoRE Link format (RFC 6690) as used by LwM2M discover responses
//!
//! Only the LwM2M subset is handled: link targets are object paths
//! (`</>`, `</3>`, `</3/0>`, `</3/0/1>`, `</3/0/6/0>`) followed by
//! standard attributes.

use std::fmt;

use crate::attributes::{Attachment, AttributeSet, list};
use crate::error::{Lwm2mError, Result};
use crate::parser::StringParser;

/// One `<path>;attr;attr` link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    path: Vec<u16>,
    attributes: AttributeSet,
}

impl Link {
    /// Build a link, checking the attributes are legal on this path
    pub fn new(path: Vec<u16>, attributes: AttributeSet) -> Result<Self> {
        let attachment = Attachment::from_depth(path.len())
            .ok_or_else(|| Lwm2mError::InvalidValue(format!("path too deep: {:?}", path)))?;
        attributes.validate(attachment)?;
        Ok(Self { path, attributes })
    }

    /// Path segments; empty for the root link
    pub fn path(&self) -> &[u16] {
        &self.path
    }

    pub fn attributes(&self) -> &AttributeSet {
        &self.attributes
    }

    pub fn attachment(&self) -> Attachment {
        // depth is checked in `new`
        Attachment::from_depth(self.path.len()).unwrap_or(Attachment::ResourceInstance)
    }

    pub fn object_id(&self) -> Option<u16> {
        self.path.first().copied()
    }
}

impl fmt::Display for Link {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("</")?;
        let segments: Vec<String> = self.path.iter().map(u16::to_string).collect();
        f.write_str(&segments.join("/"))?;
        f.write_str(">")?;
        f.write_str(&self.attributes.to_link_params())
    }
}

/// Parse a `,`-separated list of links
pub fn parse_links(text: &str) -> Result<Vec<Link>> {
    let mut links = Vec::new();
    if text.is_empty() {
        return Ok(links);
    }

    let mut parser = StringParser::new(text);
    loop {
        let path = consume_path(&mut parser)?;
        let attributes = list::consume_link_params(&mut parser)?;
        links.push(Link::new(path, attributes)?);

        if !parser.has_more_chars() {
            return Ok(links);
        }
        parser.consume_char(',')?;
    }
}

/// Format links back into link-format text
pub fn format_links(links: &[Link]) -> String {
    links
        .iter()
        .map(Link::to_string)
        .collect::<Vec<_>>()
        .join(",")
}

/// `"<" "/" [ segment *("/" segment) ] ">"`
fn consume_path(parser: &mut StringParser<'_>) -> Result<Vec<u16>> {
    parser.consume_char('<')?;
    parser.consume_char('/')?;

    let mut path = Vec::new();
    if parser.next_char_is('>') {
        parser.consume_next_char()?;
        return Ok(path);
    }
    loop {
        let start = parser.position();
        parser.consume_digit()?;
        while parser.next_char_is_digit() {
            parser.consume_next_char()?;
        }
        let text = parser.substring(start, parser.position());
        let segment = text.parse::<u16>().map_err(|_| {
            parser.error(format!(
                "path segment '{}' is out of range in {}",
                text,
                parser.string_to_parse()
            ))
        })?;
        path.push(segment);

        if parser.next_char_is('>') {
            parser.consume_next_char()?;
            return Ok(path);
        }
        parser.consume_char('/')?;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attributes::{AttributeValue, Version};

    #[test]
    fn test_parse_discover_response() {
        let text = r#"</>;lwm2m=1.1,</0/1>;ssid=101;uri="coaps://lwm2m.example:5684",</1>;ver=1.1,</3/0>"#;
        let links = parse_links(text).unwrap();
        assert_eq!(links.len(), 4);

        assert_eq!(links[0].attachment(), Attachment::Root);
        assert_eq!(
            links[0].attributes().get("lwm2m").and_then(|a| a.value()),
            Some(&AttributeValue::Version(Version::V1_1))
        );
        assert_eq!(links[1].path(), &[0, 1]);
        assert_eq!(links[2].object_id(), Some(1));
        assert!(links[3].attributes().is_empty());

        assert_eq!(format_links(&links), text);
    }

    #[test]
    fn test_illegal_attachment() {
        let err = parse_links("</3>;ssid=1").unwrap_err();
        assert!(matches!(err, Lwm2mError::IllegalAttachment { .. }));
    }

    #[test]
    fn test_bad_paths() {
        assert!(parse_links("<3/0>").is_err());
        assert!(parse_links("</3/>").is_err());
        assert!(parse_links("</70000>").is_err());
        assert!(parse_links("</1/2/3/4/5>").is_err());
        assert!(parse_links("</1>,").is_err());
    }
}
