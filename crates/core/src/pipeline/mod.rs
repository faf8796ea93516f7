//! Scan-driven packing pipeline.
//!
//! One scan event maps to one pipeline run: parse the scanned line, write
//! its payload as order metadata, attach the order to the active supply, and
//! fetch its sticker. Runs are fully independent; there is no shared state
//! between invocations and nothing is retried or rolled back.

mod sequencer;
mod types;

pub use sequencer::process_scan;
pub use types::*;
