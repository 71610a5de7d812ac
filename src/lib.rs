//! lwm2m-bootstrap - LwM2M attribute codec and bootstrap session model
//!
//! This library provides the CoRE Link attribute model used by LwM2M
//! discover and write-attributes exchanges (parsing, validation and
//! canonical serialization of each attribute kind), plus the state of a
//! single device's bootstrap session: identity, authorization outcome,
//! negotiated content format, application data and cancellation.
//!
//! Transport (CoAP/DTLS) is not included; plug the types into any CoAP stack.
//!
//! # Example
//!
//! ```no_run
//! use lwm2m_bootstrap::attributes::list;
//! use lwm2m_bootstrap::bootstrap::{AcceptAll, BootstrapRequest, BootstrapSessionManager, ClientPeer};
//!
//! // Parse write-attributes from a request query
//! let attributes = list::parse_query("pmin=10&pmax=60&st=0.5").unwrap();
//! attributes.validate_writable().unwrap();
//!
//! // Open a bootstrap session for an incoming request
//! let manager = BootstrapSessionManager::new(AcceptAll);
//! let request = BootstrapRequest::from_query("urn:imei:4938", "pct=112").unwrap();
//! let client = ClientPeer::unsecure("192.0.2.1:5683".parse().unwrap());
//! let session = manager.begin(request, client, "coap://0.0.0.0:5683".parse().unwrap());
//! assert!(session.is_authorized());
//! ```

pub mod attributes;
pub mod bootstrap;
mod config;
pub mod content_format;
mod error;
pub mod link;
pub mod parser;

pub use attributes::{Attribute, AttributeModel, AttributeSet, AttributeValue};
pub use bootstrap::{BootstrapSession, BootstrapSessionManager};
pub use config::SessionConfig;
pub use content_format::ContentFormat;
pub use error::{Lwm2mError, Result};
pub use parser::StringParser;
