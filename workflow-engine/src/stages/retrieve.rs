// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use workflow_domain::state::{GoodsReceiptNote, PurchaseOrder, RetrieveOutputs, StageDelta, WorkflowState};
use workflow_domain::value_objects::Capability;
use workflow_domain::WorkflowError;

use super::StageContext;

pub async fn run(ctx: &StageContext, state: &WorkflowState) -> Result<StageDelta, WorkflowError> {
    let vendor_name = state.raw_payload.get("vendor_name").and_then(|v| v.as_str()).unwrap_or("");
    let detected_pos = state.understand.as_ref().map(|u| u.detected_pos.clone()).unwrap_or_default();
    let invoice_amount = state.raw_payload.get("amount").and_then(|v| v.as_f64()).unwrap_or(0.0);

    let connector = ctx
        .selector
        .select(Capability::ErpConnector, &serde_json::json!({"is_development": ctx.settings.is_development()}))
        .await;

    let po_result = ctx
        .router
        .call(
            "fetch_po",
            serde_json::json!({
                "vendor_name": vendor_name,
                "po_numbers": detected_pos,
                "connector": connector,
                "invoice_amount": invoice_amount,
            }),
        )
        .await;

    let matched_pos: Vec<PurchaseOrder> = po_result
        .get("purchase_orders")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(|v| serde_json::from_value(v.clone()).ok()).collect())
        .unwrap_or_default();

    let po_ids: Vec<String> = matched_pos.iter().map(|po| po.po_id.clone()).collect();
    let grn_result = ctx.router.call("fetch_grn", serde_json::json!({"po_ids": po_ids})).await;
    let matched_grns: Vec<GoodsReceiptNote> = grn_result
        .get("goods_receipt_notes")
        .and_then(|v| v.as_array())
        .map(|arr| arr.iter().filter_map(|v| serde_json::from_value(v.clone()).ok()).collect())
        .unwrap_or_default();

    let history = ctx.router.call("fetch_history", serde_json::json!({"vendor_name": vendor_name})).await;

    Ok(StageDelta::Retrieve(RetrieveOutputs {
        matched_pos,
        matched_grns,
        history,
        erp_connector_used: connector,
    }))
}
