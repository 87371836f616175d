//! Shipment booking backend.
//!
//! Layout follows a hexagonal split: [`domain`] holds entities, services and
//! ports; [`inbound`] adapts HTTP requests onto driving ports; [`outbound`]
//! implements driven ports against the availability authority and the
//! booking store.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;
#[cfg(any(test, feature = "test-support"))]
pub mod test_support;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
