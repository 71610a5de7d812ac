//! LwM2M attributes carried as CoRE Link parameters
//!
//! Every attribute kind is an [`AttributeModel`]: a static description
//! that parses, validates and serializes values of that kind. Parsed
//! values come back as [`Attribute`]s, which can only hold values the
//! model accepted.
//!
//! ```
//! use lwm2m_bootstrap::attributes::{list, registry, Attachment};
//!
//! let set = list::parse_query("pmin=10&pmax=60&st=0.5").unwrap();
//! set.validate(Attachment::Resource).unwrap();
//! assert_eq!(set.get("st").unwrap().to_core_link(), "st=0.5");
//! assert!(registry::find("pmin").is_some());
//! ```

pub mod list;
mod model;
pub mod registry;
mod set;
mod value;

pub use model::{AccessMode, Attachment, AttributeClass, AttributeModel, ValueKind};
pub use set::AttributeSet;
pub use value::{Attribute, AttributeValue, MAX_FRACTION_DIGITS, Version};
