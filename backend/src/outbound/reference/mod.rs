//! Natural Earth reference data adapters.
//!
//! This module provides a thin HTTP implementation of the
//! `ReferenceDataSource` port.

mod dto;
mod http_source;

pub use http_source::{NaturalEarthEndpoints, NaturalEarthHttpSource};
