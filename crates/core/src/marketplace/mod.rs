//! Marketplace supplier API abstraction.
//!
//! This module provides a `MarketplaceApi` trait covering the fulfillment
//! operations the packing floor needs (orders, supplies, stickers, order
//! metadata, access passes) plus an HTTP binding against the supplier REST
//! API. Every operation is a single blocking call from the caller's point of
//! view; retries and idempotence belong to the remote service.

mod http;
mod types;

pub use http::HttpMarketplaceClient;
pub use types::*;
