//! Types for the packing pipeline.

use serde::{Deserialize, Serialize};

use crate::marketplace::{LabelBlob, LabelFormat, StickerSize};
use crate::scan::ScanPayload;

/// One packing cycle request, built from transient operator session state.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineRequest {
    /// Raw scanned line, `<orderId>` or `<orderId>|<payload>`.
    pub scan: String,
    /// Active supply id. Empty or absent means the attach step is skipped
    /// for this cycle, not retried later.
    #[serde(default)]
    pub supply_id: Option<String>,
    /// Write metadata before attaching the order to the supply.
    #[serde(default = "default_true")]
    pub write_metadata_first: bool,
    /// Fetch the order sticker at the end of the cycle.
    #[serde(default = "default_true")]
    pub auto_sticker: bool,
    #[serde(default = "default_sticker_format")]
    pub sticker_format: LabelFormat,
    #[serde(default)]
    pub sticker_size: StickerSize,
}

fn default_true() -> bool {
    true
}

fn default_sticker_format() -> LabelFormat {
    LabelFormat::Png
}

/// A remote step of the packing cycle.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStep {
    WriteMeta,
    AddToSupply,
    FetchSticker,
}

/// Why a step was not executed.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The scan carried no payload to write.
    NoPayload,
    /// No active supply was set for this cycle.
    NoSupplyId,
    /// The caller did not request this step.
    NotRequested,
    /// An earlier step failed and stopped the sequence.
    PriorStepFailed,
}

/// Outcome of a single step.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum StepOutcome {
    Completed,
    Skipped { reason: SkipReason },
    Failed { error: String },
}

/// One step with its outcome, in execution order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StepReport {
    pub step: PipelineStep,
    #[serde(flatten)]
    pub outcome: StepOutcome,
}

/// Terminal status of a run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PipelineStatus {
    Completed,
    Failed {
        failed_step: PipelineStep,
        error: String,
    },
}

/// Result of one packing cycle.
#[derive(Debug, Clone, Serialize)]
pub struct PipelineReport {
    pub order_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<ScanPayload>,
    pub status: PipelineStatus,
    /// Steps in the order they were sequenced.
    pub steps: Vec<StepReport>,
    /// Fetched sticker, present when the fetch step completed.
    #[serde(skip_serializing)]
    pub sticker: Option<LabelBlob>,
}

impl PipelineReport {
    /// Outcome recorded for a step, if it was part of this run's sequence.
    pub fn step_outcome(&self, step: PipelineStep) -> Option<&StepOutcome> {
        self.steps
            .iter()
            .find(|report| report.step == step)
            .map(|report| &report.outcome)
    }
}
