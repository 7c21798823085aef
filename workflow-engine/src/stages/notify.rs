// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use workflow_domain::state::{NotifyOutputs, StageDelta, WorkflowState};
use workflow_domain::value_objects::Capability;
use workflow_domain::WorkflowError;

use super::StageContext;

pub async fn run(ctx: &StageContext, state: &WorkflowState) -> Result<StageDelta, WorkflowError> {
    let provider = ctx.selector.select(Capability::Email, &serde_json::json!({"is_transactional": true})).await;

    ctx.router
        .call("notify_vendor", serde_json::json!({"workflow_id": state.workflow_id, "provider": provider}))
        .await;
    ctx.router
        .call("notify_finance_team", serde_json::json!({"workflow_id": state.workflow_id, "provider": provider}))
        .await;

    Ok(StageDelta::Notify(NotifyOutputs {
        notify_status: "sent".to_string(),
        notified_parties: vec!["vendor".to_string(), "finance_team".to_string()],
        email_provider_used: provider,
    }))
}
