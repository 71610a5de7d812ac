//! Object model supported by a client

use std::collections::BTreeMap;
use std::fmt;

use crate::attributes::{Attachment, Version, registry};
use crate::error::Result;
use crate::link::{self, Link};

/// Objects (and their versions) a client supports
///
/// Provided by an external collaborator once the client's objects are
/// known, typically after a bootstrap-discover.
pub trait LwM2mModel: Send + Sync + fmt::Debug {
    /// Version of an object, or `None` if the client does not support it
    fn object_version(&self, object_id: u16) -> Option<Version>;

    fn supports(&self, object_id: u16) -> bool {
        self.object_version(object_id).is_some()
    }
}

/// Fixed set of objects
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticModel {
    objects: BTreeMap<u16, Version>,
}

impl StaticModel {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_object(mut self, object_id: u16, version: Version) -> Self {
        self.objects.insert(object_id, version);
        self
    }

    /// Collect objects from discover links
    ///
    /// An object appears as soon as any path under it is listed. Its
    /// version comes from the object link's `ver` attribute, 1.0 otherwise.
    pub fn from_links(links: &[Link]) -> Self {
        let mut model = Self::new();
        for link in links {
            let Some(object_id) = link.object_id() else {
                continue;
            };
            let version = (link.attachment() == Attachment::Object)
                .then(|| link.attributes().get(registry::OBJECT_VERSION.name()))
                .flatten()
                .and_then(|attr| attr.value())
                .and_then(|value| value.as_version());
            match version {
                Some(version) => {
                    model.objects.insert(object_id, version);
                }
                None => {
                    model.objects.entry(object_id).or_default();
                }
            }
        }
        model
    }

    /// Parse a bootstrap-discover payload into a model
    pub fn from_discover_response(text: &str) -> Result<Self> {
        Ok(Self::from_links(&link::parse_links(text)?))
    }

    pub fn object_ids(&self) -> impl Iterator<Item = u16> + '_ {
        self.objects.keys().copied()
    }
}

impl LwM2mModel for StaticModel {
    fn object_version(&self, object_id: u16) -> Option<Version> {
        self.objects.get(&object_id).copied()
    }
}
