//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **availability**: reqwest-backed client for the availability authority
//! - **persistence**: in-process booking store
//!
//! Adapters are thin translators between domain types and wire or storage
//! representations. They contain no business logic.

pub mod availability;
pub mod persistence;
