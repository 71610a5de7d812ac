//! Bootstrap sessions
//!
//! A [`BootstrapSession`] records who is being bootstrapped, whether they
//! were authorized, which content format writes will use and whether the
//! session was cancelled. The [`BootstrapSessionManager`] creates sessions
//! through a pluggable [`BootstrapAuthorizer`].

mod authorizer;
mod manager;
mod model;
mod peer;
mod request;
mod session;

pub use authorizer::{AcceptAll, Authorization, BootstrapAuthorizer, SecureOnly};
pub use manager::BootstrapSessionManager;
pub use model::{LwM2mModel, StaticModel};
pub use peer::{ClientPeer, EndpointUri, Identity};
pub use request::BootstrapRequest;
pub use session::BootstrapSession;
