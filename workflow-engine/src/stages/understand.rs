// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use workflow_domain::state::{StageDelta, UnderstandOutputs, WorkflowState};
use workflow_domain::value_objects::Capability;
use workflow_domain::WorkflowError;

use super::StageContext;

pub async fn run(ctx: &StageContext, state: &WorkflowState) -> Result<StageDelta, WorkflowError> {
    let attachments = state.raw_payload.get("attachments").cloned().unwrap_or_else(|| serde_json::json!([]));

    let provider = ctx
        .selector
        .select(Capability::Ocr, &serde_json::json!({"document_type": "invoice"}))
        .await;

    let ocr_result = ctx
        .router
        .call("ocr_extract", serde_json::json!({"attachments": attachments, "provider": provider}))
        .await;
    let invoice_text = ocr_result.get("extracted_text").and_then(|v| v.as_str()).unwrap_or("").to_string();

    let parsed = ctx
        .router
        .call("parse_line_items", serde_json::json!({"invoice_text": invoice_text, "line_items": state.raw_payload.get("line_items")}))
        .await;
    let parsed_line_items = parsed.get("line_items").cloned().unwrap_or_else(|| serde_json::json!([]));
    let detected_pos: Vec<String> = parsed
        .get("detected_pos")
        .and_then(|v| v.as_array())
        .map(|a| a.iter().filter_map(|v| v.as_str().map(str::to_string)).collect())
        .unwrap_or_default();

    let parsed_dates = serde_json::json!({
        "invoice_date": state.raw_payload.get("invoice_date"),
        "due_date": state.raw_payload.get("due_date"),
    });

    let parsed_invoice = serde_json::json!({
        "invoice_text": invoice_text,
        "parsed_line_items": parsed_line_items,
        "detected_pos": detected_pos,
        "currency": state.raw_payload.get("currency").and_then(|v| v.as_str()).unwrap_or("USD"),
        "parsed_dates": parsed_dates,
        "amount": state.raw_payload.get("amount"),
    });

    Ok(StageDelta::Understand(UnderstandOutputs {
        parsed_invoice,
        ocr_provider_used: provider,
        invoice_text,
        parsed_line_items,
        detected_pos,
        parsed_dates,
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
    async fn understand_extracts_detected_pos_from_ocr_text() {
        let state = WorkflowState::new("wf_1", "INV-1", serde_json::json!({}));
        let delta = run(&ctx(), &state).await.unwrap();
        match delta {
            StageDelta::Understand(out) => assert!(out.detected_pos.iter().any(|p| p.starts_with("PO"))),
            _ => panic!("wrong delta variant"),
        }
    }
}
