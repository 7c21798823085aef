// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use workflow_domain::state::{PrepareOutputs, StageDelta, WorkflowState};
use workflow_domain::value_objects::Capability;
use workflow_domain::WorkflowError;

use super::StageContext;

pub async fn run(ctx: &StageContext, state: &WorkflowState) -> Result<StageDelta, WorkflowError> {
    let vendor_name = state.raw_payload.get("vendor_name").and_then(|v| v.as_str()).unwrap_or("");
    let normalize_result = ctx.router.call("normalize_vendor", serde_json::json!({"vendor_name": vendor_name})).await;
    let normalized_name = normalize_result.get("normalized_name").and_then(|v| v.as_str()).unwrap_or("").to_string();

    let provider = ctx
        .selector
        .select(Capability::Enrichment, &serde_json::json!({"vendor_type": state.raw_payload.get("vendor_type")}))
        .await;
    let enrichment = ctx
        .router
        .call("enrich_vendor", serde_json::json!({"vendor_name": vendor_name, "vendor_tax_id": state.raw_payload.get("vendor_tax_id")}))
        .await;

    let understood = state.understand.as_ref();
    let amount = state.raw_payload.get("amount").cloned().unwrap_or(serde_json::Value::Null);

    let missing_info: Vec<String> = [
        ("vendor_tax_id", state.raw_payload.get("vendor_tax_id")),
        ("invoice_date", state.raw_payload.get("invoice_date")),
        ("due_date", state.raw_payload.get("due_date")),
    ]
    .into_iter()
    .filter(|(_, v)| v.map(|v| v.is_null()).unwrap_or(true))
    .map(|(name, _)| name.to_string())
    .collect();

    let flags_result = ctx
        .router
        .call("compute_flags", serde_json::json!({"missing_info": missing_info, "amount": amount}))
        .await;
    let risk_score = flags_result.get("risk_score").and_then(|v| v.as_f64()).unwrap_or(0.0);

    let vendor_profile = serde_json::json!({
        "normalized_name": normalized_name,
        "tax_id": state.raw_payload.get("vendor_tax_id"),
        "enrichment_meta": enrichment.get("enrichment_meta"),
    });
    let normalized_invoice = serde_json::json!({
        "amount": amount,
        "currency": state.raw_payload.get("currency").and_then(|v| v.as_str()).unwrap_or("USD"),
        "line_items": understood.map(|u| u.parsed_line_items.clone()).unwrap_or_else(|| serde_json::json!([])),
    });
    let flags = serde_json::json!({ "missing_info": missing_info, "risk_score": risk_score });

    Ok(StageDelta::Prepare(PrepareOutputs {
        vendor_profile,
        normalized_invoice,
        flags,
        enrichment_provider_used: provider,
        normalized_name,
        risk_score,
        missing_info,
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
    async fn prepare_normalizes_the_vendor_name() {
        let state = WorkflowState::new("wf_1", "INV-1", serde_json::json!({"vendor_name": "  acme  corp "}));
        let delta = run(&ctx(), &state).await.unwrap();
        match delta {
            StageDelta::Prepare(out) => assert_eq!(out.normalized_name, "ACME CORP"),
            _ => panic!("wrong delta variant"),
        }
    }

    #[tokio::test]
    async fn prepare_flags_missing_optional_fields() {
        let state = WorkflowState::new("wf_1", "INV-1", serde_json::json!({"vendor_name": "Acme", "amount": 100.0}));
        let delta = run(&ctx(), &state).await.unwrap();
        match delta {
            StageDelta::Prepare(out) => assert_eq!(out.missing_info.len(), 3),
            _ => panic!("wrong delta variant"),
        }
    }
}
