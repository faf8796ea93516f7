//! Packing pipeline sequencing.

use tracing::{debug, warn};

use crate::marketplace::{MarketplaceApi, MetaKind};
use crate::scan::{classify, ScanError};

use super::types::{
    PipelineReport, PipelineRequest, PipelineStatus, PipelineStep, SkipReason, StepOutcome,
    StepReport,
};

/// Run one packing cycle against the marketplace API.
///
/// Returns `Err` only when the scanned line fails local parsing; no remote
/// call is made in that case. Remote failures are reported per step: the
/// failing step stops the sequence and the remaining steps are marked as
/// skipped. The metadata step runs before or after the attach step depending
/// on `write_metadata_first`; the sticker fetch, when requested, always
/// comes last.
pub async fn process_scan(
    request: &PipelineRequest,
    api: &dyn MarketplaceApi,
) -> Result<PipelineReport, ScanError> {
    let scan = classify(&request.scan)?;

    let supply_id = request
        .supply_id
        .as_deref()
        .map(str::trim)
        .filter(|id| !id.is_empty());

    let plan = if request.write_metadata_first {
        [
            PipelineStep::WriteMeta,
            PipelineStep::AddToSupply,
            PipelineStep::FetchSticker,
        ]
    } else {
        [
            PipelineStep::AddToSupply,
            PipelineStep::WriteMeta,
            PipelineStep::FetchSticker,
        ]
    };

    let mut steps = Vec::with_capacity(plan.len());
    let mut failure: Option<(PipelineStep, String)> = None;
    let mut sticker = None;

    for step in plan {
        if failure.is_some() {
            steps.push(StepReport {
                step,
                outcome: StepOutcome::Skipped {
                    reason: SkipReason::PriorStepFailed,
                },
            });
            continue;
        }

        let outcome = match step {
            PipelineStep::WriteMeta => match &scan.payload {
                None => StepOutcome::Skipped {
                    reason: SkipReason::NoPayload,
                },
                Some(payload) => {
                    let kind = MetaKind::from(payload.kind);
                    match api.write_meta(scan.order_id, kind, &payload.value).await {
                        Ok(()) => StepOutcome::Completed,
                        Err(e) => StepOutcome::Failed {
                            error: e.to_string(),
                        },
                    }
                }
            },
            PipelineStep::AddToSupply => match supply_id {
                None => StepOutcome::Skipped {
                    reason: SkipReason::NoSupplyId,
                },
                Some(supply_id) => {
                    match api.add_order_to_supply(supply_id, scan.order_id).await {
                        Ok(()) => StepOutcome::Completed,
                        Err(e) => StepOutcome::Failed {
                            error: e.to_string(),
                        },
                    }
                }
            },
            PipelineStep::FetchSticker => {
                if !request.auto_sticker {
                    StepOutcome::Skipped {
                        reason: SkipReason::NotRequested,
                    }
                } else {
                    match api
                        .order_stickers(
                            &[scan.order_id],
                            request.sticker_format,
                            request.sticker_size,
                        )
                        .await
                    {
                        Ok(blob) => {
                            sticker = Some(blob);
                            StepOutcome::Completed
                        }
                        Err(e) => StepOutcome::Failed {
                            error: e.to_string(),
                        },
                    }
                }
            }
        };

        if let StepOutcome::Failed { error } = &outcome {
            warn!(
                order_id = scan.order_id,
                step = ?step,
                error = %error,
                "Packing step failed"
            );
            failure = Some((step, error.clone()));
        }

        steps.push(StepReport { step, outcome });
    }

    let status = match failure {
        None => PipelineStatus::Completed,
        Some((failed_step, error)) => PipelineStatus::Failed { failed_step, error },
    };

    debug!(
        order_id = scan.order_id,
        status = ?status,
        "Packing cycle finished"
    );

    Ok(PipelineReport {
        order_id: scan.order_id,
        payload: scan.payload,
        status,
        steps,
        sticker,
    })
}
