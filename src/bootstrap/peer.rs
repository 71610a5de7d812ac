//! Transport-level identity of a bootstrapping client

use std::fmt;
use std::net::SocketAddr;
use std::str::FromStr;

use crate::error::{Lwm2mError, Result};

/// How the client authenticated at the transport layer
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    /// Plain CoAP, no DTLS/TLS
    Unsecure,
    /// Pre-shared key
    Psk { identity: String },
    /// Raw public key
    Rpk { public_key: Vec<u8> },
    /// X.509 certificate
    X509 { common_name: String },
}

impl Identity {
    pub fn is_secure(&self) -> bool {
        !matches!(self, Identity::Unsecure)
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Identity::Unsecure => f.write_str("unsecure"),
            Identity::Psk { identity } => write!(f, "psk:{}", identity),
            Identity::Rpk { public_key } => write!(f, "rpk:{} bytes", public_key.len()),
            Identity::X509 { common_name } => write!(f, "x509:{}", common_name),
        }
    }
}

/// Peer seen by the transport: socket address plus authenticated identity
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientPeer {
    pub address: SocketAddr,
    pub identity: Identity,
}

impl ClientPeer {
    pub fn new(address: SocketAddr, identity: Identity) -> Self {
        Self { address, identity }
    }

    pub fn unsecure(address: SocketAddr) -> Self {
        Self::new(address, Identity::Unsecure)
    }
}

impl fmt::Display for ClientPeer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.address, self.identity)
    }
}

const SCHEMES: [(&str, u16); 4] = [
    ("coap", 5683),
    ("coaps", 5684),
    ("coap+tcp", 5683),
    ("coaps+tcp", 5684),
];

/// Local server endpoint a request arrived on, e.g. `coaps://0.0.0.0:5684`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EndpointUri {
    scheme: String,
    host: String,
    port: u16,
}

impl EndpointUri {
    pub fn new(scheme: &str, host: impl Into<String>, port: u16) -> Result<Self> {
        if default_port(scheme).is_none() {
            return Err(Lwm2mError::InvalidEndpointUri(format!(
                "unsupported scheme '{}'",
                scheme
            )));
        }
        let host = host.into();
        if host.is_empty() {
            return Err(Lwm2mError::InvalidEndpointUri("empty host".to_string()));
        }
        Ok(Self {
            scheme: scheme.to_string(),
            host,
            port,
        })
    }

    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn is_secure(&self) -> bool {
        self.scheme.starts_with("coaps")
    }
}

fn default_port(scheme: &str) -> Option<u16> {
    SCHEMES
        .iter()
        .find(|(name, _)| *name == scheme)
        .map(|(_, port)| *port)
}

impl FromStr for EndpointUri {
    type Err = Lwm2mError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = |reason: &str| Lwm2mError::InvalidEndpointUri(format!("{}: {}", reason, s));

        let (scheme, authority) = s.split_once("://").ok_or_else(|| invalid("missing scheme"))?;
        let authority = authority.strip_suffix('/').unwrap_or(authority);
        if authority.contains('/') {
            return Err(invalid("path not allowed"));
        }

        let (host, port) = if let Some(rest) = authority.strip_prefix('[') {
            let (host, after) = rest.split_once(']').ok_or_else(|| invalid("unclosed '['"))?;
            match after {
                "" => (host, None),
                _ => {
                    let port = after.strip_prefix(':').ok_or_else(|| invalid("bad port"))?;
                    (host, Some(port))
                }
            }
        } else {
            match authority.rsplit_once(':') {
                Some((host, port)) => (host, Some(port)),
                None => (authority, None),
            }
        };

        let port = match port {
            Some(port) => port.parse::<u16>().map_err(|_| invalid("bad port"))?,
            None => default_port(scheme).ok_or_else(|| invalid("unsupported scheme"))?,
        };
        EndpointUri::new(scheme, host, port)
    }
}

impl fmt::Display for EndpointUri {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.host.contains(':') {
            write!(f, "{}://[{}]:{}", self.scheme, self.host, self.port)
        } else {
            write!(f, "{}://{}:{}", self.scheme, self.host, self.port)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_endpoint_uri() {
        let uri: EndpointUri = "coaps://0.0.0.0:5684".parse().unwrap();
        assert_eq!(uri.scheme(), "coaps");
        assert_eq!(uri.host(), "0.0.0.0");
        assert_eq!(uri.port(), 5684);
        assert!(uri.is_secure());
        assert_eq!(uri.to_string(), "coaps://0.0.0.0:5684");
    }

    #[test]
    fn test_default_port_and_ipv6() {
        let uri: EndpointUri = "coap://[::1]".parse().unwrap();
        assert_eq!(uri.host(), "::1");
        assert_eq!(uri.port(), 5683);
        assert_eq!(uri.to_string(), "coap://[::1]:5683");

        let uri: EndpointUri = "coaps+tcp://bs.example/".parse().unwrap();
        assert_eq!(uri.port(), 5684);
    }

    #[test]
    fn test_invalid_endpoint_uri() {
        for input in [
            "bs.example:5683",
            "http://bs.example",
            "coap://:5683",
            "coap://bs.example:99999",
            "coap://bs.example/bs",
            "coap://[::1",
        ] {
            assert!(
                matches!(input.parse::<EndpointUri>(), Err(Lwm2mError::InvalidEndpointUri(_))),
                "{input}"
            );
        }
    }

    #[test]
    fn test_identity() {
        assert!(!Identity::Unsecure.is_secure());
        let psk = Identity::Psk {
            identity: "client-1".into(),
        };
        assert!(psk.is_secure());
        assert_eq!(psk.to_string(), "psk:client-1");
    }
}
