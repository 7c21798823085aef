// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! End-to-end scenarios driving the Graph Runtime through `submit`/`resume`
//! against the in-memory Checkpoint & Review Store, exercising the
//! happy-path / HITL-accept / HITL-reject / validation-failure /
//! stage-failure / stale-review branches.

use std::sync::Arc;

use workflow_domain::entities::Workflow;
use workflow_domain::value_objects::{ApprovalStatus, HumanDecision, MatchResult, ReviewStatus, WorkflowStatus};
use workflow_engine::config::WorkflowSettings;
use workflow_engine::router::AbilityRouter;
use workflow_engine::runtime::{GraphRuntime, RunOutcome};
use workflow_engine::stages::StageContext;
use workflow_engine::storage::in_memory::{
    InMemoryAuditLogRepository, InMemoryCheckpointRepository, InMemoryReviewRepository, InMemoryWorkflowRepository,
};
use workflow_engine::tools::{Selector, ToolRegistry};

fn runtime() -> GraphRuntime {
    GraphRuntime::new(
        StageContext {
            router: Arc::new(AbilityRouter::new()),
            selector: Arc::new(Selector::new(Arc::new(ToolRegistry::with_default_providers()), None)),
            settings: Arc::new(WorkflowSettings::default()),
        },
        Arc::new(InMemoryWorkflowRepository::new()),
        Arc::new(InMemoryCheckpointRepository::new()),
        Arc::new(InMemoryReviewRepository::new()),
        Arc::new(InMemoryAuditLogRepository::new()),
    )
}

/// A minimal invoice payload that carries every optional field, so PREPARE
/// reports zero missing_info and APPROVE's risk_score stays low.
fn full_invoice(invoice_id: &str, amount: f64) -> serde_json::Value {
    serde_json::json!({
        "invoice_id": invoice_id,
        "vendor_name": "Acme",
        "vendor_tax_id": "TAX-1",
        "invoice_date": "2026-07-01",
        "due_date": "2026-07-31",
        "amount": amount,
        "currency": "USD",
    })
}

async fn workflow(rt: &GraphRuntime, workflow_id: &str) -> Workflow {
    rt.workflows.find_by_id(workflow_id).await.unwrap().unwrap()
}

/// S1 -- happy path: an invoice amount matching the fixed "amount on file"
/// the external backend's fabricated PO lookup always returns (10000.00)
/// runs straight through to completion, auto-approved since amount <=
/// 10000 and risk stays low with every optional field present.
#[tokio::test]
async fn s1_happy_path_auto_matched() {
    let rt = runtime();
    let (workflow_id, outcome) = rt.submit("INV-1", full_invoice("INV-1", 10000.0)).await.unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    let wf = workflow(&rt, &workflow_id).await;
    assert_eq!(wf.status, WorkflowStatus::Completed);
    assert_eq!(wf.match_result, Some(MatchResult::Matched));
    assert!(wf.match_score.unwrap() >= 0.9);
    assert_eq!(wf.state_data.approve.as_ref().unwrap().approval_status, ApprovalStatus::AutoApproved);
    assert!(wf.state_data.posting.as_ref().unwrap().posted);
    assert_eq!(wf.state_data.notify.as_ref().unwrap().notified_parties, vec!["vendor", "finance_team"]);

    assert!(rt.checkpoints.load_latest(&workflow_id).await.unwrap().is_none());
    assert!(rt.reviews.list(None).await.unwrap().is_empty());
}

/// S2 -- a mismatched invoice pauses for review; an ACCEPT decision resumes
/// to completion with an escalated approval (amount well above 10000).
#[tokio::test]
async fn s2_low_confidence_match_then_accept() {
    let rt = runtime();
    let (workflow_id, outcome) = rt.submit("INV-2", full_invoice("INV-2", 50000.0)).await.unwrap();

    let checkpoint_id = match outcome {
        RunOutcome::AwaitingReview { checkpoint_id } => checkpoint_id,
        other => panic!("expected AwaitingReview, got {other:?}"),
    };
    assert_eq!(workflow(&rt, &workflow_id).await.status, WorkflowStatus::Paused);

    let review = rt.reviews.find_by_checkpoint(&checkpoint_id).await.unwrap().unwrap();
    assert_eq!(review.status, ReviewStatus::Pending);
    assert!(!review.reason_for_hold.is_empty());

    rt.checkpoints.resolve(&checkpoint_id, HumanDecision::Accept, "ops_1", Some("verified by phone".into())).await.unwrap();
    let outcome = rt.resume(&workflow_id).await.unwrap();

    assert_eq!(outcome, RunOutcome::Completed);
    let wf = workflow(&rt, &workflow_id).await;
    assert_eq!(wf.status, WorkflowStatus::Completed);
    assert_eq!(wf.state_data.approve.as_ref().unwrap().approval_status, ApprovalStatus::Escalated);
    assert!(wf.state_data.reconcile.as_ref().unwrap().reconciliation_report.balanced);
    assert!(wf.state_data.notify.is_some());
}

/// S3 -- as S2 but the reviewer rejects; the workflow ends in
/// MANUAL_HANDOFF without posting or notifying.
#[tokio::test]
async fn s3_low_confidence_match_then_reject() {
    let rt = runtime();
    let (workflow_id, outcome) = rt.submit("INV-3", full_invoice("INV-3", 50000.0)).await.unwrap();

    let checkpoint_id = match outcome {
        RunOutcome::AwaitingReview { checkpoint_id } => checkpoint_id,
        other => panic!("expected AwaitingReview, got {other:?}"),
    };

    rt.checkpoints.resolve(&checkpoint_id, HumanDecision::Reject, "ops_1", None).await.unwrap();
    let outcome = rt.resume(&workflow_id).await.unwrap();

    assert_eq!(outcome, RunOutcome::ManualHandoff);
    let wf = workflow(&rt, &workflow_id).await;
    assert_eq!(wf.status, WorkflowStatus::ManualHandoff);
    assert!(wf.state_data.posting.is_none());
    assert!(wf.state_data.notify.is_none());
}

/// S5 -- a simulated ERP outage at POSTING fails the workflow with no
/// NOTIFY side effects. `submit` surfaces the stage error to the caller,
/// but the Workflow row it already wrote is left behind in FAILED so the
/// failure is inspectable after the fact.
#[tokio::test]
async fn s5_posting_stage_failure() {
    let rt = runtime();
    let mut payload = full_invoice("INV-5", 10000.0);
    payload["simulate_erp_failure"] = serde_json::json!(true);
    let err = rt.submit("INV-5", payload).await.unwrap_err();
    assert_eq!(err.category(), "stage");

    let workflows = rt.workflows.list(None, 0, 10).await.unwrap();
    let wf = workflows.into_iter().find(|w| w.invoice_id == "INV-5").unwrap();
    assert_eq!(wf.status, WorkflowStatus::Failed);
    assert!(wf.error_message.as_deref().unwrap().contains("down"));
    assert!(wf.state_data.notify.is_none());
}

/// S4 -- a payload missing `vendor_name` is rejected at the boundary
/// before any workflow row is created.
#[tokio::test]
async fn s4_validation_failure_creates_no_workflow() {
    let rt = runtime();
    let err = rt.submit("INV-4", serde_json::json!({"invoice_id": "INV-4", "amount": 1000.0})).await.unwrap_err();

    assert_eq!(err.category(), "validation");
    assert!(rt.workflows.list(None, 0, 10).await.unwrap().is_empty());
}

/// S6 -- an unresolved checkpoint older than the expiry threshold moves its
/// review to EXPIRED and fails the owning workflow.
#[tokio::test]
async fn s6_stale_review_expiration() {
    let rt = runtime();
    let (workflow_id, outcome) = rt.submit("INV-6", full_invoice("INV-6", 50000.0)).await.unwrap();
    let checkpoint_id = match outcome {
        RunOutcome::AwaitingReview { checkpoint_id } => checkpoint_id,
        other => panic!("expected AwaitingReview, got {other:?}"),
    };

    {
        let mut review = rt.reviews.find_by_checkpoint(&checkpoint_id).await.unwrap().unwrap();
        review.created_at = chrono::Utc::now() - chrono::Duration::hours(73);
        rt.reviews.enqueue(review).await.unwrap();
    }

    let uc = workflow_engine::application::ExpireReviewsUseCase::new(rt.reviews.clone(), rt.checkpoints.clone(), rt.workflows.clone());
    let count = uc.execute(72).await.unwrap();
    assert_eq!(count, 1);

    let review = rt.reviews.find_by_checkpoint(&checkpoint_id).await.unwrap().unwrap();
    assert_eq!(review.status, ReviewStatus::Expired);

    let wf = workflow(&rt, &workflow_id).await;
    assert_eq!(wf.status, WorkflowStatus::Failed);
    assert_eq!(wf.error_message.as_deref(), Some("Review expired after 72 hours"));
}

/// Resume idempotence: resolving an already-resolved checkpoint a second
/// time is rejected rather than silently repeating the decision.
#[tokio::test]
async fn resolving_an_already_resolved_checkpoint_is_rejected() {
    let rt = runtime();
    let (_workflow_id, outcome) = rt.submit("INV-7", full_invoice("INV-7", 50000.0)).await.unwrap();
    let checkpoint_id = match outcome {
        RunOutcome::AwaitingReview { checkpoint_id } => checkpoint_id,
        other => panic!("expected AwaitingReview, got {other:?}"),
    };

    rt.checkpoints.resolve(&checkpoint_id, HumanDecision::Accept, "ops_1", None).await.unwrap();
    let err = rt.checkpoints.resolve(&checkpoint_id, HumanDecision::Accept, "ops_1", None).await.unwrap_err();
    assert_eq!(err.category(), "checkpoint");
}

/// Cancelling an already-completed workflow is rejected; no state change.
#[tokio::test]
async fn cancelling_a_completed_workflow_is_rejected() {
    let rt = runtime();
    let (workflow_id, outcome) = rt.submit("INV-8", full_invoice("INV-8", 10000.0)).await.unwrap();
    assert_eq!(outcome, RunOutcome::Completed);

    let err = rt.cancel(&workflow_id).await.unwrap_err();
    assert_eq!(err.category(), "workflow");
    assert_eq!(workflow(&rt, &workflow_id).await.status, WorkflowStatus::Completed);
}
