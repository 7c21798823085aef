// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use rust_decimal::Decimal;
use rust_decimal::prelude::FromPrimitive;
use workflow_domain::state::{ApproveOutputs, StageDelta, WorkflowState};
use workflow_domain::value_objects::ApprovalStatus;
use workflow_domain::WorkflowError;

use super::StageContext;

pub async fn run(ctx: &StageContext, state: &WorkflowState) -> Result<StageDelta, WorkflowError> {
    let amount = state
        .raw_payload
        .get("amount")
        .and_then(|v| v.as_f64())
        .and_then(Decimal::from_f64)
        .unwrap_or(Decimal::ZERO);
    let risk_score = state.prepare.as_ref().map(|p| p.risk_score).unwrap_or(0.0);

    let result = ctx
        .router
        .call(
            "apply_approval_policy",
            serde_json::json!({
                "amount": amount,
                "risk_score": risk_score,
                "auto_approve_threshold": ctx.settings.auto_approve_threshold,
            }),
        )
        .await;

    let approval_status: ApprovalStatus = serde_json::from_value(result["approval_status"].clone()).unwrap_or(ApprovalStatus::Escalated);
    let approver_id = result.get("approver_id").and_then(|v| v.as_str()).unwrap_or("finance_manager").to_string();

    Ok(StageDelta::Approve(ApproveOutputs { approval_status, approver_id }))
}
