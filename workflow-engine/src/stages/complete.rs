// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Terminal stage, reached either after NOTIFY (happy path) or directly from
//! HITL_DECISION on a rejection. Whichever status the Graph Runtime has
//! already set on the identity field wins -- COMPLETE never turns a
//! MANUAL_HANDOFF run back into COMPLETED.

use workflow_domain::state::{AuditLogSummary, CompleteOutputs, StageDelta, WorkflowState};
use workflow_domain::value_objects::{StageId, WorkflowStatus};
use workflow_domain::WorkflowError;

use super::StageContext;

pub async fn run(_ctx: &StageContext, state: &WorkflowState) -> Result<StageDelta, WorkflowError> {
    let audit_log = completed_stages(state);

    let final_payload = serde_json::json!({
        "workflow_id": state.workflow_id,
        "invoice_id": state.invoice_id,
        "status": final_status(state),
        "approval_status": state.approve.as_ref().map(|a| a.approval_status),
        "erp_txn_id": state.posting.as_ref().map(|p| p.erp_txn_id.clone()),
        "scheduled_payment_id": state.posting.as_ref().map(|p| p.scheduled_payment_id.clone()),
    });

    Ok(StageDelta::Complete(CompleteOutputs { final_payload, audit_log }))
}

fn final_status(state: &WorkflowState) -> WorkflowStatus {
    if state.status == WorkflowStatus::ManualHandoff {
        WorkflowStatus::ManualHandoff
    } else {
        WorkflowStatus::Completed
    }
}

fn completed_stages(state: &WorkflowState) -> Vec<AuditLogSummary> {
    let mut log = Vec::new();
    if state.intake.is_some() {
        log.push(AuditLogSummary { stage: StageId::Intake, status: "completed".into() });
    }
    if state.understand.is_some() {
        log.push(AuditLogSummary { stage: StageId::Understand, status: "completed".into() });
    }
    if state.prepare.is_some() {
        log.push(AuditLogSummary { stage: StageId::Prepare, status: "completed".into() });
    }
    if state.retrieve.is_some() {
        log.push(AuditLogSummary { stage: StageId::Retrieve, status: "completed".into() });
    }
    if state.match_two_way.is_some() {
        log.push(AuditLogSummary { stage: StageId::MatchTwoWay, status: "completed".into() });
    }
    if state.checkpoint_hitl.is_some() {
        log.push(AuditLogSummary { stage: StageId::CheckpointHitl, status: "completed".into() });
    }
    if state.hitl_decision.is_some() {
        log.push(AuditLogSummary { stage: StageId::HitlDecision, status: "completed".into() });
    }
    if state.reconcile.is_some() {
        log.push(AuditLogSummary { stage: StageId::Reconcile, status: "completed".into() });
    }
    if state.approve.is_some() {
        log.push(AuditLogSummary { stage: StageId::Approve, status: "completed".into() });
    }
    if state.posting.is_some() {
        log.push(AuditLogSummary { stage: StageId::Posting, status: "completed".into() });
    }
    if state.notify.is_some() {
        log.push(AuditLogSummary { stage: StageId::Notify, status: "completed".into() });
    }
    log
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::router::AbilityRouter;
    use crate::tools::{Selector, ToolRegistry};
    use std::sync::Arc;
    use workflow_domain::state::{HitlDecisionOutputs, IntakeOutputs};
    use workflow_domain::value_objects::HumanDecision;

    fn ctx() -> StageContext {
        StageContext {
            router: Arc::new(AbilityRouter::new()),
            selector: Arc::new(Selector::new(Arc::new(ToolRegistry::with_default_providers()), None)),
            settings: Arc::new(crate::config::WorkflowSettings::default()),
        }
    }

    #[tokio::test]
    async fn completed_run_reports_completed_status() {
        let mut state = WorkflowState::new("wf_1", "INV-1", serde_json::json!({}));
        state.status = WorkflowStatus::Running;
        state.intake =
            Some(IntakeOutputs { raw_id: "raw_1".into(), ingest_ts: chrono::Utc::now(), validated: true });
        let delta = run(&ctx(), &state).await.unwrap();
        match delta {
            StageDelta::Complete(out) => {
                assert_eq!(out.final_payload["status"], "COMPLETED");
                assert_eq!(out.audit_log.len(), 1);
            }
            _ => panic!("wrong delta variant"),
        }
    }

    #[tokio::test]
    async fn manual_handoff_status_is_preserved() {
        let mut state = WorkflowState::new("wf_1", "INV-1", serde_json::json!({}));
        state.status = WorkflowStatus::ManualHandoff;
        state.hitl_decision = Some(HitlDecisionOutputs {
            human_decision: HumanDecision::Reject,
            reviewer_id: "alice".into(),
            reviewer_notes: None,
            resume_token: "rt_1".into(),
            next_stage: StageId::Complete,
        });
        let delta = run(&ctx(), &state).await.unwrap();
        match delta {
            StageDelta::Complete(out) => assert_eq!(out.final_payload["status"], "MANUAL_HANDOFF"),
            _ => panic!("wrong delta variant"),
        }
    }
}
