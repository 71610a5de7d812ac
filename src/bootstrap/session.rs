//! A single bootstrapping session
//!
//! Everything except the cancellation flag and the lazily-known object
//! model is fixed at construction, so sessions can be shared between
//! handler paths (`Arc<BootstrapSession>`) without locking.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};
use std::time::{SystemTime, UNIX_EPOCH};

use tracing::debug;

use super::authorizer::Authorization;
use super::model::LwM2mModel;
use super::peer::{ClientPeer, EndpointUri};
use super::request::BootstrapRequest;
use crate::content_format::ContentFormat;

/// State of one client's bootstrap attempt
///
/// Reading fields after [`BootstrapSession::cancel`] is allowed; callers
/// check [`BootstrapSession::is_cancelled`] before acting on them.
#[derive(Debug)]
pub struct BootstrapSession {
    id: String,
    endpoint: String,
    request: BootstrapRequest,
    client: ClientPeer,
    endpoint_used: EndpointUri,
    authorized: bool,
    content_format: ContentFormat,
    application_data: HashMap<String, String>,
    creation_time: i64,
    cancelled: AtomicBool,
    model: OnceLock<Arc<dyn LwM2mModel>>,
}

impl BootstrapSession {
    /// Create a session stamped with the current time
    pub fn new(
        id: impl Into<String>,
        request: BootstrapRequest,
        client: ClientPeer,
        endpoint_used: EndpointUri,
        authorization: Authorization,
        content_format: ContentFormat,
    ) -> Self {
        let (authorized, application_data) = authorization.into_parts();
        Self {
            id: id.into(),
            endpoint: request.endpoint_name().to_string(),
            request,
            client,
            endpoint_used,
            authorized,
            content_format,
            application_data,
            creation_time: now_millis(),
            cancelled: AtomicBool::new(false),
            model: OnceLock::new(),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    /// Endpoint name of the client
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// The request which opened this session
    pub fn bootstrap_request(&self) -> &BootstrapRequest {
        &self.request
    }

    pub fn client_transport_data(&self) -> &ClientPeer {
        &self.client
    }

    /// Server endpoint the request arrived on
    pub fn endpoint_used(&self) -> &EndpointUri {
        &self.endpoint_used
    }

    pub fn is_authorized(&self) -> bool {
        self.authorized
    }

    /// Content format for bootstrap-write requests in this session
    pub fn content_format(&self) -> ContentFormat {
        self.content_format
    }

    /// Data attached by the authorizer
    pub fn application_data(&self) -> &HashMap<String, String> {
        &self.application_data
    }

    /// Creation time, milliseconds since the Unix epoch
    pub fn creation_time(&self) -> i64 {
        self.creation_time
    }

    /// Client object model, once known
    pub fn model(&self) -> Option<&Arc<dyn LwM2mModel>> {
        self.model.get()
    }

    /// Record the client object model; only the first call has an effect
    pub fn set_model(&self, model: Arc<dyn LwM2mModel>) -> bool {
        self.model.set(model).is_ok()
    }

    /// Stop taking protocol actions for this session
    pub fn cancel(&self) {
        if !self.cancelled.swap(true, Ordering::AcqRel) {
            debug!(session = %self.id, endpoint = %self.endpoint, "bootstrap session cancelled");
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.load(Ordering::Acquire)
    }
}

fn now_millis() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}
