//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **catalogue**: the JSON adventure registry, embedded or on disk
//! - **reference**: Natural Earth GeoJSON layers fetched over HTTP
//!
//! Adapters are thin translators that convert between domain types and
//! infrastructure-specific representations. They contain no business logic.

pub mod catalogue;
pub mod reference;
