// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Durable persistence of the checkpoint row (and the HumanReview it
//! enqueues) is the Graph Runtime's job, via `CheckpointRepository`, once
//! this stage's delta is merged -- this function only computes the fields
//! the delta owns.

use workflow_domain::services::generate_review_url;
use workflow_domain::state::{CheckpointOutputs, StageDelta, WorkflowState};
use workflow_domain::value_objects::checkpoint_id;
use workflow_domain::WorkflowError;

use super::StageContext;

pub async fn run(ctx: &StageContext, state: &WorkflowState) -> Result<StageDelta, WorkflowError> {
    let id = checkpoint_id(&state.workflow_id);
    let review_url = generate_review_url(&ctx.settings.frontend_base_url, &id);

    let evidence = state.match_two_way.as_ref().map(|m| &m.match_evidence);
    let paused_reason = match evidence {
        Some(e) => format!(
            "Two-way match failed: score {:.2} below threshold {:.2} (difference {:.1}%)",
            state.match_two_way.as_ref().map(|m| m.match_score).unwrap_or(0.0),
            e.threshold_used,
            e.difference_pct,
        ),
        None => "Two-way match failed".to_string(),
    };

    Ok(StageDelta::CheckpointHitl(CheckpointOutputs { checkpoint_id: id, review_url, paused_reason }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::AbilityRouter;
    use crate::tools::{Selector, ToolRegistry};
    use std::sync::Arc;
    use workflow_domain::state::{MatchEvidence, MatchOutputs};
    use workflow_domain::value_objects::MatchResult;

    fn ctx() -> StageContext {
        StageContext {
            router: Arc::new(AbilityRouter::new()),
            selector: Arc::new(Selector::new(Arc::new(ToolRegistry::with_default_providers()), None)),
            settings: Arc::new(crate::config::WorkflowSettings::default()),
        }
    }

    #[tokio::test]
    async fn paused_reason_mentions_the_score_and_threshold() {
        let mut state = WorkflowState::new("wf_1", "INV-1", serde_json::json!({}));
        state.match_two_way = Some(MatchOutputs {
            match_score: 0.72,
            match_result: MatchResult::Failed,
            tolerance_pct: 5.0,
            match_evidence: MatchEvidence {
                invoice_amount: rust_decimal::Decimal::new(50000, 0),
                po_total: rust_decimal::Decimal::new(40000, 0),
                pos_count: 1,
                threshold_used: 0.90,
                difference_pct: 20.0,
            },
        });
        let delta = run(&ctx(), &state).await.unwrap();
        match delta {
            StageDelta::CheckpointHitl(out) => {
                assert!(out.paused_reason.contains("0.9"));
                assert!(out.paused_reason.contains("threshold"));
                assert!(out.checkpoint_id.starts_with("cp_wf_1_"));
            }
            _ => panic!("wrong delta variant"),
        }
    }
}
