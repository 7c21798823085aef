// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The only stage the Graph Runtime re-enters after an interrupt. The
//! decision itself never lives in a stage output slot until this function
//! runs -- the Review Service deposits it into `raw_payload` before calling
//! `Resume`, and this is where it crosses into the typed record.

use workflow_domain::state::{HitlDecisionOutputs, StageDelta, WorkflowState};
use workflow_domain::value_objects::{resume_token, HumanDecision, StageId};
use workflow_domain::WorkflowError;

use super::StageContext;

pub async fn run(ctx: &StageContext, state: &WorkflowState) -> Result<StageDelta, WorkflowError> {
    let decision_str = state.raw_payload.get("human_decision").and_then(|v| v.as_str()).unwrap_or("REJECT");
    let human_decision = if decision_str.eq_ignore_ascii_case("ACCEPT") { HumanDecision::Accept } else { HumanDecision::Reject };
    let reviewer_id = state.raw_payload.get("reviewer_id").and_then(|v| v.as_str()).unwrap_or("unknown").to_string();
    let reviewer_notes = state.raw_payload.get("reviewer_notes").and_then(|v| v.as_str()).map(str::to_string);

    let checkpoint_id = state.checkpoint_hitl.as_ref().map(|c| c.checkpoint_id.clone()).unwrap_or_default();
    ctx.router
        .call(
            "human_review_action",
            serde_json::json!({
                "checkpoint_id": checkpoint_id,
                "human_decision": human_decision,
                "reviewer_id": reviewer_id,
            }),
        )
        .await;

    let next_stage = match human_decision {
        HumanDecision::Accept => StageId::Reconcile,
        HumanDecision::Reject => StageId::Complete,
    };

    Ok(StageDelta::HitlDecision(HitlDecisionOutputs {
        human_decision,
        reviewer_id,
        reviewer_notes,
        resume_token: resume_token(),
        next_stage,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::AbilityRouter;
    use crate::tools::{Selector, ToolRegistry};
    use std::sync::Arc;

    fn ctx() -> StageContext {
        StageContext {
            router: Arc::new(AbilityRouter::new()),
            selector: Arc::new(Selector::new(Arc::new(ToolRegistry::with_default_providers()), None)),
            settings: Arc::new(crate::config::WorkflowSettings::default()),
        }
    }

    #[tokio::test]
    async fn accept_routes_to_reconcile() {
        let state = WorkflowState::new("wf_1", "INV-1", serde_json::json!({"human_decision": "ACCEPT", "reviewer_id": "alice"}));
        let delta = run(&ctx(), &state).await.unwrap();
        match delta {
            StageDelta::HitlDecision(out) => {
                assert_eq!(out.human_decision, HumanDecision::Accept);
                assert_eq!(out.next_stage, StageId::Reconcile);
                assert_eq!(out.reviewer_id, "alice");
            }
            _ => panic!("wrong delta variant"),
        }
    }

    #[tokio::test]
    async fn reject_routes_to_complete() {
        let state = WorkflowState::new("wf_1", "INV-1", serde_json::json!({"human_decision": "REJECT", "reviewer_id": "bob"}));
        let delta = run(&ctx(), &state).await.unwrap();
        match delta {
            StageDelta::HitlDecision(out) => {
                assert_eq!(out.human_decision, HumanDecision::Reject);
                assert_eq!(out.next_stage, StageId::Complete);
            }
            _ => panic!("wrong delta variant"),
        }
    }
}
