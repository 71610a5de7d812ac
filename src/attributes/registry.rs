//! Standard LwM2M attribute models

use super::model::{AccessMode, Attachment, AttributeClass, AttributeModel, ValueKind};

const NOTIFICATION_TARGETS: &[Attachment] = &[
    Attachment::Object,
    Attachment::ObjectInstance,
    Attachment::Resource,
    Attachment::ResourceInstance,
];
const RESOURCE_TARGETS: &[Attachment] = &[Attachment::Resource, Attachment::ResourceInstance];

const PERIOD: ValueKind = ValueKind::Unsigned {
    min: 0,
    max: u32::MAX as u64,
};

/// `dim`: number of instances of a multiple resource
pub static DIMENSION: AttributeModel = AttributeModel::new(
    "dim",
    &[Attachment::Resource],
    AccessMode::Read,
    AttributeClass::Properties,
    ValueKind::Unsigned { min: 0, max: 255 },
);

/// `ssid`: short server ID of a Security/Server object instance
pub static SHORT_SERVER_ID: AttributeModel = AttributeModel::new(
    "ssid",
    &[Attachment::ObjectInstance],
    AccessMode::Read,
    AttributeClass::Properties,
    ValueKind::Unsigned { min: 1, max: 65534 },
);

/// `uri`: server URI of a Security object instance
pub static SERVER_URI: AttributeModel = AttributeModel::new(
    "uri",
    &[Attachment::ObjectInstance],
    AccessMode::Read,
    AttributeClass::Properties,
    ValueKind::QuotedString,
);

/// `ver`: object version
pub static OBJECT_VERSION: AttributeModel = AttributeModel::new(
    "ver",
    &[Attachment::Object],
    AccessMode::Read,
    AttributeClass::Properties,
    ValueKind::Version,
);

/// `lwm2m`: enabler version supported by the client
pub static ENABLER_VERSION: AttributeModel = AttributeModel::new(
    "lwm2m",
    &[Attachment::Root],
    AccessMode::Read,
    AttributeClass::Properties,
    ValueKind::Version,
);

/// `pmin`: minimum period between notifications, in seconds
pub static MINIMUM_PERIOD: AttributeModel = AttributeModel::new(
    "pmin",
    NOTIFICATION_TARGETS,
    AccessMode::ReadWrite,
    AttributeClass::Notification,
    PERIOD,
);

/// `pmax`: maximum period between notifications, in seconds
pub static MAXIMUM_PERIOD: AttributeModel = AttributeModel::new(
    "pmax",
    NOTIFICATION_TARGETS,
    AccessMode::ReadWrite,
    AttributeClass::Notification,
    PERIOD,
);

/// `gt`: notify when the value crosses above this threshold
pub static GREATER_THAN: AttributeModel = AttributeModel::new(
    "gt",
    RESOURCE_TARGETS,
    AccessMode::ReadWrite,
    AttributeClass::Notification,
    ValueKind::Decimal,
);

/// `lt`: notify when the value crosses below this threshold
pub static LESS_THAN: AttributeModel = AttributeModel::new(
    "lt",
    RESOURCE_TARGETS,
    AccessMode::ReadWrite,
    AttributeClass::Notification,
    ValueKind::Decimal,
);

/// `st`: minimum change between two notifications
pub static STEP: AttributeModel = AttributeModel::new(
    "st",
    RESOURCE_TARGETS,
    AccessMode::ReadWrite,
    AttributeClass::Notification,
    ValueKind::PositiveDecimal,
);

pub static EVALUATE_MINIMUM_PERIOD: AttributeModel = AttributeModel::new(
    "epmin",
    NOTIFICATION_TARGETS,
    AccessMode::ReadWrite,
    AttributeClass::Notification,
    PERIOD,
);

pub static EVALUATE_MAXIMUM_PERIOD: AttributeModel = AttributeModel::new(
    "epmax",
    NOTIFICATION_TARGETS,
    AccessMode::ReadWrite,
    AttributeClass::Notification,
    PERIOD,
);

/// `edge`: notify on rising (1) or falling (0) edge of a boolean resource
pub static EDGE: AttributeModel = AttributeModel::new(
    "edge",
    RESOURCE_TARGETS,
    AccessMode::ReadWrite,
    AttributeClass::Notification,
    ValueKind::Flag,
);

/// `con`: send notifications as confirmable messages
pub static CONFIRMABLE_NOTIFICATION: AttributeModel = AttributeModel::new(
    "con",
    NOTIFICATION_TARGETS,
    AccessMode::ReadWrite,
    AttributeClass::Notification,
    ValueKind::Flag,
);

/// `hqmax`: maximum number of queued historical notifications
pub static MAXIMUM_HISTORICAL_QUEUE: AttributeModel = AttributeModel::new(
    "hqmax",
    NOTIFICATION_TARGETS,
    AccessMode::ReadWrite,
    AttributeClass::Notification,
    PERIOD,
);

static ALL: [&AttributeModel; 15] = [
    &DIMENSION,
    &SHORT_SERVER_ID,
    &SERVER_URI,
    &OBJECT_VERSION,
    &ENABLER_VERSION,
    &MINIMUM_PERIOD,
    &MAXIMUM_PERIOD,
    &GREATER_THAN,
    &LESS_THAN,
    &STEP,
    &EVALUATE_MINIMUM_PERIOD,
    &EVALUATE_MAXIMUM_PERIOD,
    &EDGE,
    &CONFIRMABLE_NOTIFICATION,
    &MAXIMUM_HISTORICAL_QUEUE,
];

/// Every standard attribute model
pub fn all() -> &'static [&'static AttributeModel] {
    &ALL
}

/// Look up a standard model by its wire name
pub fn find(name: &str) -> Option<&'static AttributeModel> {
    ALL.iter().copied().find(|model| model.name() == name)
}
