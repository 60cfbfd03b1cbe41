//! Inbound adapters that translate external requests into explorer
//! operations while keeping framework details at the edge.
//!
//! REST handlers live under [`http`]; the streaming explorer session lives
//! under [`ws`].

pub mod http;
pub mod ws;
