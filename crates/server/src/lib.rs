//! HTTP server for the packing assistant.
//!
//! Exposed as a library so integration tests can build the router in-process
//! with mock dependencies; the `packflow` binary lives in `main.rs`.

pub mod api;
pub mod metrics;
pub mod state;
