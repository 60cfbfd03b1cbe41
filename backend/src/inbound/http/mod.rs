//! HTTP inbound adapter exposing REST endpoints.

pub mod adventures;
pub mod cache_control;
pub mod error;
pub mod explorer;
pub mod health;
pub mod map;
pub mod schemas;
pub mod search;
pub mod session;
pub mod session_config;
pub mod state;
#[cfg(test)]
pub mod test_utils;

pub use error::ApiResult;
