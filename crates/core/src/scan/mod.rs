//! Barcode scan parsing.
//!
//! An operator scans one line per packing cycle: either a bare order id or
//! `<orderId>|<payload>` where the payload is a regulatory identifier
//! (SGTIN, UIN, IMEI or GTIN). This module turns that line into a
//! `ClassifiedScan` without any I/O.

mod classifier;
mod types;

pub use classifier::classify;
pub use types::*;
