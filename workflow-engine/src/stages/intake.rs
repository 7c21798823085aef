// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use chrono::Utc;
use workflow_domain::state::{IntakeOutputs, StageDelta, WorkflowState};
use workflow_domain::value_objects::{raw_invoice_id, Capability};
use workflow_domain::WorkflowError;

use super::StageContext;

pub async fn run(ctx: &StageContext, state: &WorkflowState) -> Result<StageDelta, WorkflowError> {
    let raw_id = raw_invoice_id();

    let validation = ctx
        .router
        .call(
            "validate_schema",
            serde_json::json!({
                "invoice_id": state.invoice_id,
                "vendor_name": state.raw_payload.get("vendor_name"),
                "amount": state.raw_payload.get("amount"),
            }),
        )
        .await;

    ctx.router
        .call("persist_raw_invoice", serde_json::json!({"workflow_id": state.workflow_id, "raw_id": raw_id}))
        .await;

    // Storage selection is logged for audit; the actual persistence path is
    // the ability call above.
    let _storage_tool = ctx.selector.select(Capability::Storage, &serde_json::json!({"is_development": ctx.settings.is_development()})).await;

    let validated = validation.get("valid").and_then(|v| v.as_bool()).unwrap_or(false);

    Ok(StageDelta::Intake(IntakeOutputs { raw_id, ingest_ts: Utc::now(), validated }))
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
    async fn intake_marks_a_complete_invoice_as_validated() {
        let state = WorkflowState::new("wf_1", "INV-1", serde_json::json!({"vendor_name": "Acme", "amount": 100.0}));
        let delta = run(&ctx(), &state).await.unwrap();
        match delta {
            StageDelta::Intake(out) => assert!(out.validated),
            _ => panic!("wrong delta variant"),
        }
    }

    #[tokio::test]
    async fn intake_flags_a_missing_vendor_name_as_invalid() {
        let state = WorkflowState::new("wf_1", "INV-1", serde_json::json!({"amount": 100.0}));
        let delta = run(&ctx(), &state).await.unwrap();
        match delta {
            StageDelta::Intake(out) => assert!(!out.validated),
            _ => panic!("wrong delta variant"),
        }
    }
}
