// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use workflow_domain::state::{PostingOutputs, StageDelta, WorkflowState};
use workflow_domain::value_objects::{erp_txn_id, scheduled_payment_id, Capability};
use workflow_domain::WorkflowError;

use super::StageContext;

/// The backend-returned id wins when the external call supplies one; a
/// locally minted id is the fallback for providers that don't echo one back.
/// A `post_to_erp` result carrying an `error` key is a hard stage failure,
/// not a fallback case -- the connector is telling us nothing was posted.
pub async fn run(ctx: &StageContext, state: &WorkflowState) -> Result<StageDelta, WorkflowError> {
    let connector = ctx
        .selector
        .select(Capability::ErpConnector, &serde_json::json!({"is_development": ctx.settings.is_development()}))
        .await;

    let post_result = ctx
        .router
        .call(
            "post_to_erp",
            serde_json::json!({
                "workflow_id": state.workflow_id,
                "connector": connector,
                "simulate_erp_failure": state.raw_payload.get("simulate_erp_failure"),
            }),
        )
        .await;
    if let Some(error) = post_result.get("error").and_then(|v| v.as_str()) {
        return Err(WorkflowError::stage_failed("POSTING", error));
    }
    let posted_txn_id = post_result.get("erp_txn_id").and_then(|v| v.as_str()).map(str::to_string).unwrap_or_else(erp_txn_id);

    let schedule_result = ctx.router.call("schedule_payment", serde_json::json!({"workflow_id": state.workflow_id})).await;
    let payment_id =
        schedule_result.get("scheduled_payment_id").and_then(|v| v.as_str()).map(str::to_string).unwrap_or_else(scheduled_payment_id);

    Ok(StageDelta::Posting(PostingOutputs { posted: true, erp_txn_id: posted_txn_id, scheduled_payment_id: payment_id }))
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
    async fn posting_mints_both_ids() {
        let state = WorkflowState::new("wf_1", "INV-1", serde_json::json!({}));
        let delta = run(&ctx(), &state).await.unwrap();
        match delta {
            StageDelta::Posting(out) => {
                assert!(out.posted);
                assert!(out.erp_txn_id.starts_with("ERP-TXN_"));
                assert!(out.scheduled_payment_id.starts_with("PAY_"));
            }
            _ => panic!("wrong delta variant"),
        }
    }

    #[tokio::test]
    async fn an_erp_outage_fails_the_stage_instead_of_minting_a_fallback_id() {
        let state = WorkflowState::new("wf_1", "INV-1", serde_json::json!({"simulate_erp_failure": true}));
        let err = run(&ctx(), &state).await.unwrap_err();
        assert_eq!(err.category(), "stage");
        assert!(err.to_string().contains("down"));
    }
}
