//! Integration tests covering a bootstrap exchange end to end
//!
//! These self-contained tests drive the public API the way a bootstrap
//! server handler would.

use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Arc;
use std::thread;

use bigdecimal::BigDecimal;
use lwm2m_bootstrap::attributes::{Attachment, AttributeValue, Version, list, registry};
use lwm2m_bootstrap::bootstrap::{
    Authorization, BootstrapRequest, BootstrapSessionManager, ClientPeer, Identity, LwM2mModel,
    StaticModel,
};
use lwm2m_bootstrap::{ContentFormat, Lwm2mError, SessionConfig, StringParser, link};

const DISCOVER_RESPONSE: &str = r#"</>;lwm2m=1.1,</0>;ver=1.1,</0/0>;uri="coaps://bs.example:5684",</0/1>;ssid=101;uri="coaps://dm.example:5684",</1>;ver=1.1,</1/0>;ssid=101,</3/0>"#;

#[test]
fn test_positive_decimal_end_to_end() {
    let mut parser = StringParser::new("42.750000");
    let attr = registry::STEP.consume_attribute_value(&mut parser).unwrap();

    assert!(!parser.has_more_chars());
    assert_eq!(
        attr.value().and_then(|v| v.as_decimal()),
        Some(&BigDecimal::from_str("42.75").unwrap())
    );
    assert_eq!(registry::STEP.to_core_link_value(&attr), "42.75");
    assert_eq!(attr.to_string(), "st=42.75");
}

#[test]
fn test_trailing_characters_left_to_caller() {
    let mut parser = StringParser::new("12x");
    let attr = registry::STEP.consume_attribute_value(&mut parser).unwrap();
    assert_eq!(attr.value(), Some(&AttributeValue::Decimal(BigDecimal::from(12))));
    assert_eq!(parser.position(), 2);

    // the list parser is the one rejecting it
    let err = list::parse_query("st=12x").unwrap_err();
    assert!(err.to_string().contains("'x'"));
}

#[test]
fn test_parse_error_carries_context() {
    let err = list::parse_query("pmin=10&st=.5").unwrap_err();
    match err {
        Lwm2mError::Parse { message, position } => {
            assert_eq!(position, 11);
            assert!(message.contains("pmin=10&st=.5"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_write_attributes_flow() {
    let current = list::parse_query("pmin=10&pmax=60").unwrap();
    let update = list::parse_query("pmin&gt=30.5&lt=10&st=2").unwrap();

    update.validate_writable().unwrap();
    let merged = current.merge(&update);
    merged.validate(Attachment::Resource).unwrap();
    assert_eq!(merged.to_query(), "pmax=60&gt=30.5&lt=10&st=2");

    let read_only = list::parse_query("dim=3").unwrap();
    assert!(matches!(
        read_only.validate_writable(),
        Err(Lwm2mError::NotWritable(_))
    ));
}

#[test]
fn test_discover_response_populates_session_model() {
    let links = link::parse_links(DISCOVER_RESPONSE).unwrap();
    assert_eq!(link::format_links(&links), DISCOVER_RESPONSE);

    let manager = BootstrapSessionManager::new(
        |request: &BootstrapRequest, peer: &ClientPeer| {
            if peer.identity.is_secure() {
                let data = HashMap::from([(
                    "profile".to_string(),
                    format!("default-{}", request.endpoint_name()),
                )]);
                Authorization::approved_with(data)
            } else {
                Authorization::refused()
            }
        },
    );
    let request = BootstrapRequest::from_query("urn:imei:1234", "pct=110").unwrap();
    let client = ClientPeer::new(
        "203.0.113.5:61000".parse().unwrap(),
        Identity::Psk {
            identity: "urn:imei:1234".into(),
        },
    );
    let session = manager.begin(request, client, "coaps://0.0.0.0:5684".parse().unwrap());

    assert!(session.is_authorized());
    assert_eq!(session.content_format(), ContentFormat::SenmlJson);
    assert_eq!(session.application_data()["profile"], "default-urn:imei:1234");
    assert!(session.model().is_none());

    assert!(session.set_model(Arc::new(StaticModel::from_links(&links))));
    let model = session.model().unwrap();
    assert_eq!(model.object_version(0), Some(Version::V1_1));
    assert_eq!(model.object_version(3), Some(Version::V1_0));
    assert!(!model.supports(5));
}

#[test]
fn test_cancel_visible_across_threads() {
    let manager = BootstrapSessionManager::with_config(
        lwm2m_bootstrap::bootstrap::AcceptAll,
        SessionConfig::default(),
    );
    let session = Arc::new(manager.begin(
        BootstrapRequest::new("dev").unwrap(),
        ClientPeer::unsecure("127.0.0.1:5683".parse().unwrap()),
        "coap://127.0.0.1:5683".parse().unwrap(),
    ));
    let id = session.id().to_string();
    let created = session.creation_time();

    let cancellers: Vec<_> = (0..4)
        .map(|_| {
            let session = Arc::clone(&session);
            thread::spawn(move || session.cancel())
        })
        .collect();
    for handle in cancellers {
        handle.join().unwrap();
    }

    let reader = {
        let session = Arc::clone(&session);
        thread::spawn(move || session.is_cancelled())
    };
    assert!(reader.join().unwrap());
    assert_eq!(session.id(), id);
    assert_eq!(session.creation_time(), created);
}
