//! Bootstrap session creation
//!
//! The manager turns an incoming Bootstrap-Request into a
//! [`BootstrapSession`]: it assigns an id, asks the authorizer and picks
//! the content format. Storing, indexing and timing out sessions is left
//! to the caller.

use tracing::{info, warn};
use uuid::Uuid;

use super::authorizer::BootstrapAuthorizer;
use super::peer::{ClientPeer, EndpointUri};
use super::request::BootstrapRequest;
use super::session::BootstrapSession;
use crate::config::SessionConfig;
use crate::content_format::ContentFormat;

/// Creates and closes bootstrap sessions
#[derive(Debug)]
pub struct BootstrapSessionManager<A> {
    authorizer: A,
    config: SessionConfig,
}

impl<A: BootstrapAuthorizer> BootstrapSessionManager<A> {
    pub fn new(authorizer: A) -> Self {
        Self::with_config(authorizer, SessionConfig::default())
    }

    pub fn with_config(authorizer: A, config: SessionConfig) -> Self {
        Self { authorizer, config }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Open a session for an incoming Bootstrap-Request
    ///
    /// A refused client still gets a session, with
    /// [`BootstrapSession::is_authorized`] returning `false`.
    pub fn begin(
        &self,
        request: BootstrapRequest,
        client: ClientPeer,
        endpoint_used: EndpointUri,
    ) -> BootstrapSession {
        let authorization = self.authorizer.authorize(&request, &client);
        let content_format = self.content_format_for(&request);
        let session = BootstrapSession::new(
            Uuid::new_v4().to_string(),
            request,
            client,
            endpoint_used,
            authorization,
            content_format,
        );

        if session.is_authorized() {
            info!(
                session = %session.id(),
                endpoint = %session.endpoint(),
                client = %session.client_transport_data(),
                content_format = %session.content_format(),
                "bootstrap session started"
            );
        } else {
            warn!(
                session = %session.id(),
                endpoint = %session.endpoint(),
                client = %session.client_transport_data(),
                "bootstrap request refused"
            );
        }
        session
    }

    /// Content format used for bootstrap writes with this client
    pub fn content_format_for(&self, request: &BootstrapRequest) -> ContentFormat {
        match request.preferred_content_format() {
            Some(format)
                if self.config.honor_preferred_content_format
                    && format.is_bootstrap_write_format() =>
            {
                format
            }
            _ => self.config.default_content_format,
        }
    }

    /// Close a session which completed
    pub fn end(&self, session: &BootstrapSession) {
        info!(
            session = %session.id(),
            endpoint = %session.endpoint(),
            "bootstrap session finished"
        );
        session.cancel();
    }

    /// Close a session which failed
    pub fn failed(&self, session: &BootstrapSession, cause: &str) {
        warn!(
            session = %session.id(),
            endpoint = %session.endpoint(),
            cause,
            "bootstrap session failed"
        );
        session.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::authorizer::{AcceptAll, Authorization, SecureOnly};

    fn client() -> ClientPeer {
        ClientPeer::unsecure("192.0.2.10:5683".parse().unwrap())
    }

    fn endpoint() -> EndpointUri {
        "coap://0.0.0.0:5683".parse().unwrap()
    }

    #[test]
    fn test_begin_authorized() {
        let manager = BootstrapSessionManager::new(AcceptAll);
        let session = manager.begin(BootstrapRequest::new("dev-1").unwrap(), client(), endpoint());

        assert!(session.is_authorized());
        assert!(!session.is_cancelled());
        assert_eq!(session.endpoint(), "dev-1");
        assert_eq!(session.content_format(), ContentFormat::Tlv);
        assert!(Uuid::parse_str(session.id()).is_ok());
    }

    #[test]
    fn test_begin_refused() {
        let manager = BootstrapSessionManager::new(SecureOnly);
        let session = manager.begin(BootstrapRequest::new("dev-1").unwrap(), client(), endpoint());
        assert!(!session.is_authorized());
        assert!(session.application_data().is_empty());
    }

    #[test]
    fn test_preferred_content_format() {
        let manager = BootstrapSessionManager::new(AcceptAll);

        let request = BootstrapRequest::new("dev")
            .unwrap()
            .with_preferred_content_format(ContentFormat::SenmlJson);
        assert_eq!(manager.content_format_for(&request), ContentFormat::SenmlJson);

        let request = BootstrapRequest::new("dev")
            .unwrap()
            .with_preferred_content_format(ContentFormat::Link);
        assert_eq!(manager.content_format_for(&request), ContentFormat::Tlv);
    }

    #[test]
    fn test_preference_ignored_by_config() {
        let config = SessionConfig {
            default_content_format: ContentFormat::SenmlCbor,
            honor_preferred_content_format: false,
        };
        let manager = BootstrapSessionManager::with_config(AcceptAll, config);
        let request = BootstrapRequest::new("dev")
            .unwrap()
            .with_preferred_content_format(ContentFormat::SenmlJson);
        assert_eq!(manager.content_format_for(&request), ContentFormat::SenmlCbor);
    }

    #[test]
    fn test_end_and_failed_cancel() {
        let manager = BootstrapSessionManager::new(|_: &BootstrapRequest, _: &ClientPeer| {
            Authorization::approved()
        });
        let first = manager.begin(BootstrapRequest::new("a").unwrap(), client(), endpoint());
        let second = manager.begin(BootstrapRequest::new("b").unwrap(), client(), endpoint());
        assert_ne!(first.id(), second.id());

        manager.end(&first);
        manager.failed(&second, "write timeout");
        assert!(first.is_cancelled());
        assert!(second.is_cancelled());
    }
}
