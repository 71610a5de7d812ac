//! Bootstrap authorization seam

use std::collections::HashMap;

use super::peer::ClientPeer;
use super::request::BootstrapRequest;

/// Outcome of authorizing a bootstrap request
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Authorization {
    approved: bool,
    application_data: HashMap<String, String>,
}

impl Authorization {
    pub fn approved() -> Self {
        Self {
            approved: true,
            application_data: HashMap::new(),
        }
    }

    /// Approve and attach data for the rest of the session
    pub fn approved_with(application_data: HashMap<String, String>) -> Self {
        Self {
            approved: true,
            application_data,
        }
    }

    pub fn refused() -> Self {
        Self::default()
    }

    pub fn is_approved(&self) -> bool {
        self.approved
    }

    pub fn application_data(&self) -> &HashMap<String, String> {
        &self.application_data
    }

    pub(crate) fn into_parts(self) -> (bool, HashMap<String, String>) {
        (self.approved, self.application_data)
    }
}

/// Decides whether a client may be bootstrapped
pub trait BootstrapAuthorizer: Send + Sync {
    fn authorize(&self, request: &BootstrapRequest, peer: &ClientPeer) -> Authorization;
}

impl<F> BootstrapAuthorizer for F
where
    F: Fn(&BootstrapRequest, &ClientPeer) -> Authorization + Send + Sync,
{
    fn authorize(&self, request: &BootstrapRequest, peer: &ClientPeer) -> Authorization {
        self(request, peer)
    }
}

/// Approves every request
#[derive(Debug, Clone, Copy, Default)]
pub struct AcceptAll;

impl BootstrapAuthorizer for AcceptAll {
    fn authorize(&self, _request: &BootstrapRequest, _peer: &ClientPeer) -> Authorization {
        Authorization::approved()
    }
}

/// Approves only clients that authenticated at the transport layer
#[derive(Debug, Clone, Copy, Default)]
pub struct SecureOnly;

impl BootstrapAuthorizer for SecureOnly {
    fn authorize(&self, _request: &BootstrapRequest, peer: &ClientPeer) -> Authorization {
        if peer.identity.is_secure() {
            Authorization::approved()
        } else {
            Authorization::refused()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::peer::Identity;

    fn peer(identity: Identity) -> ClientPeer {
        ClientPeer::new("127.0.0.1:56830".parse().unwrap(), identity)
    }

    #[test]
    fn test_secure_only() {
        let request = BootstrapRequest::new("dev").unwrap();
        assert!(!SecureOnly.authorize(&request, &peer(Identity::Unsecure)).is_approved());
        let psk = Identity::Psk {
            identity: "dev".into(),
        };
        assert!(SecureOnly.authorize(&request, &peer(psk)).is_approved());
    }

    #[test]
    fn test_closure_authorizer() {
        let authorizer = |request: &BootstrapRequest, _: &ClientPeer| {
            if request.endpoint_name().starts_with("urn:imei:") {
                let data = HashMap::from([("tenant".to_string(), "acme".to_string())]);
                Authorization::approved_with(data)
            } else {
                Authorization::refused()
            }
        };
        let granted = authorizer.authorize(
            &BootstrapRequest::new("urn:imei:123").unwrap(),
            &peer(Identity::Unsecure),
        );
        assert!(granted.is_approved());
        assert_eq!(granted.application_data()["tenant"], "acme");

        let denied = authorizer.authorize(
            &BootstrapRequest::new("other").unwrap(),
            &peer(Identity::Unsecure),
        );
        assert!(!denied.is_approved());
        assert!(denied.application_data().is_empty());
    }
}
