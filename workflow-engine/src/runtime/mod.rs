// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Graph Runtime (C4)
//!
//! Executes the fixed twelve-node DAG one stage at a time: run the stage
//! function, merge its delta, persist a checkpoint row, append audit
//! events, and ask the routing table in `graph` for the next node. The only
//! interrupt gate is CHECKPOINT_HITL -- reaching it terminates the task
//! instead of suspending it in memory, so the only way forward is a
//! separate `resume` call once a decision has been deposited.

mod graph;

use std::sync::Arc;

use tracing::{debug, error, info};
use workflow_domain::entities::{AuditLog, AuditEventType, Checkpoint, HumanReview, Workflow};
use workflow_domain::repositories::{AuditLogRepository, CheckpointRepository, ReviewRepository, WorkflowRepository};
use workflow_domain::services::generate_review_url;
use workflow_domain::state::WorkflowState;
use workflow_domain::value_objects::{ActorType, ReviewStatus, StageId};
use workflow_domain::WorkflowError;

use crate::stages::{self, StageContext};

/// Constructor-injected collaborators for a running engine instance: the
/// stage context (router, selector, settings) plus the four Checkpoint &
/// Review Store ports.
pub struct GraphRuntime {
    pub stage_ctx: StageContext,
    pub workflows: Arc<dyn WorkflowRepository>,
    pub checkpoints: Arc<dyn CheckpointRepository>,
    pub reviews: Arc<dyn ReviewRepository>,
    pub audit: Arc<dyn AuditLogRepository>,
}

/// What a run call returns once it stops, one way or another.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    Completed,
    AwaitingReview { checkpoint_id: String },
    ManualHandoff,
}

impl GraphRuntime {
    pub fn new(
        stage_ctx: StageContext,
        workflows: Arc<dyn WorkflowRepository>,
        checkpoints: Arc<dyn CheckpointRepository>,
        reviews: Arc<dyn ReviewRepository>,
        audit: Arc<dyn AuditLogRepository>,
    ) -> Self {
        GraphRuntime { stage_ctx, workflows, checkpoints, reviews, audit }
    }

    /// Starts a brand-new workflow for `raw_payload` and runs it until it
    /// either completes or hits the HITL interrupt gate.
    ///
    /// Rejects a payload missing a required field before anything is
    /// persisted -- no Invoice, Workflow, or AuditLog row is written for a
    /// submission that never clears the boundary.
    pub async fn submit(&self, invoice_id: &str, raw_payload: serde_json::Value) -> Result<(String, RunOutcome), WorkflowError> {
        validate_submission(&raw_payload)?;

        let mut workflow = Workflow::start(invoice_id, raw_payload);
        workflow.status = workflow_domain::value_objects::WorkflowStatus::Running;
        self.workflows.create(&workflow).await?;
        self.audit
            .append(AuditLog::new(
                &workflow.workflow_id,
                AuditEventType::WorkflowStarted,
                None,
                "workflow submitted",
                serde_json::json!({"invoice_id": invoice_id}),
                ActorType::System,
                None,
            ))
            .await?;

        let outcome = self.run_from(&mut workflow, StageId::Intake).await?;
        Ok((workflow.workflow_id, outcome))
    }

    /// Re-enters a paused workflow at HITL_DECISION after the Review
    /// Service has deposited a decision onto the checkpoint's state blob.
    pub async fn resume(&self, workflow_id: &str) -> Result<RunOutcome, WorkflowError> {
        let mut workflow =
            self.workflows.find_by_id(workflow_id).await?.ok_or_else(|| WorkflowError::workflow_not_found(workflow_id))?;

        let checkpoint = self
            .checkpoints
            .load_latest(workflow_id)
            .await?
            .ok_or_else(|| WorkflowError::checkpoint_not_found(workflow_id))?;
        if !checkpoint.is_resolved {
            return Err(WorkflowError::invalid_transition("cannot resume: checkpoint is not yet resolved"));
        }

        workflow.state_data = checkpoint.state_blob;
        workflow.status = workflow_domain::value_objects::WorkflowStatus::Running;
        self.run_from(&mut workflow, StageId::HitlDecision).await
    }

    /// Marks a cancellable workflow `FAILED` without running any further
    /// stages. Legal only while `Workflow::can_cancel` holds.
    pub async fn cancel(&self, workflow_id: &str) -> Result<(), WorkflowError> {
        let mut workflow =
            self.workflows.find_by_id(workflow_id).await?.ok_or_else(|| WorkflowError::workflow_not_found(workflow_id))?;
        if !workflow.can_cancel() {
            return Err(WorkflowError::invalid_transition("workflow is already in a terminal state"));
        }
        workflow.status = workflow_domain::value_objects::WorkflowStatus::Failed;
        self.workflows.update(&workflow).await?;
        self.audit
            .append(AuditLog::new(
                &workflow.workflow_id,
                AuditEventType::WorkflowCancelled,
                Some(workflow.current_stage),
                "workflow cancelled",
                serde_json::json!({}),
                ActorType::User,
                None,
            ))
            .await
    }

    async fn run_from(&self, workflow: &mut Workflow, start: StageId) -> Result<RunOutcome, WorkflowError> {
        let mut stage = start;

        loop {
            workflow.state_data.advance_to(stage);
            workflow.current_stage = stage;
            debug!(stage = stage.as_str(), workflow_id = %workflow.workflow_id, "stage starting");
            self.audit
                .append(AuditLog::new(
                    &workflow.workflow_id,
                    AuditEventType::StageStart,
                    Some(stage),
                    format!("{stage} starting"),
                    serde_json::json!({}),
                    ActorType::System,
                    None,
                ))
                .await?;

            let delta = match stages::run(stage, &self.stage_ctx, &workflow.state_data).await {
                Ok(delta) => delta,
                Err(err) => {
                    error!(stage = stage.as_str(), error = %err, "stage failed");
                    workflow.status = workflow_domain::value_objects::WorkflowStatus::Failed;
                    workflow.error_message = Some(err.to_string());
                    self.workflows.update(workflow).await?;
                    self.audit
                        .append(AuditLog::new(
                            &workflow.workflow_id,
                            AuditEventType::StageError,
                            Some(stage),
                            err.to_string(),
                            serde_json::json!({}),
                            ActorType::System,
                            None,
                        ))
                        .await?;
                    return Err(err);
                }
            };

            workflow.state_data.merge(delta)?;
            if let Some(outputs) = workflow.state_data.match_two_way.as_ref() {
                workflow.match_score = Some(outputs.match_score);
                workflow.match_result = Some(outputs.match_result);
            }

            self.audit
                .append(AuditLog::new(
                    &workflow.workflow_id,
                    AuditEventType::StageComplete,
                    Some(stage),
                    format!("{stage} completed"),
                    serde_json::json!({}),
                    ActorType::System,
                    None,
                ))
                .await?;

            if graph::is_interrupt(stage) {
                return self.pause_for_review(workflow).await;
            }

            if stage == StageId::Complete {
                workflow.completed_at = Some(chrono::Utc::now());
                if workflow.status != workflow_domain::value_objects::WorkflowStatus::ManualHandoff {
                    workflow.status = workflow_domain::value_objects::WorkflowStatus::Completed;
                }
                self.workflows.update(workflow).await?;
                info!(workflow_id = %workflow.workflow_id, "workflow completed");
                return Ok(if workflow.status == workflow_domain::value_objects::WorkflowStatus::ManualHandoff {
                    RunOutcome::ManualHandoff
                } else {
                    RunOutcome::Completed
                });
            }

            let next = graph::successor(stage, &workflow.state_data)
                .ok_or_else(|| WorkflowError::internal(format!("no successor defined for {stage}")))?;
            if next == StageId::Complete && stage == StageId::HitlDecision {
                // A rejected review skips straight to COMPLETE with MANUAL_HANDOFF.
                workflow.status = workflow_domain::value_objects::WorkflowStatus::ManualHandoff;
            }
            stage = next;
        }
    }

    async fn pause_for_review(&self, workflow: &mut Workflow) -> Result<RunOutcome, WorkflowError> {
        let checkpoint = workflow.state_data.checkpoint_hitl.as_ref().expect("checkpoint_hitl delta was just merged");
        let checkpoint_id = checkpoint.checkpoint_id.clone();
        let review_url = checkpoint.review_url.clone();
        let paused_reason = checkpoint.paused_reason.clone();

        workflow.status = workflow_domain::value_objects::WorkflowStatus::Paused;
        self.workflows.update(workflow).await?;

        self.checkpoints
            .save_checkpoint(&workflow.workflow_id, StageId::CheckpointHitl, workflow.state_data.clone(), &paused_reason, &review_url)
            .await?;

        let review = HumanReview {
            checkpoint_id: checkpoint_id.clone(),
            invoice_id: workflow.invoice_id.clone(),
            vendor_name: workflow
                .state_data
                .raw_payload
                .get("vendor_name")
                .and_then(|v| v.as_str())
                .unwrap_or("")
                .to_string(),
            amount: workflow.state_data.raw_payload.get("amount").and_then(|v| v.as_f64()).and_then(rust_decimal::Decimal::from_f64_retain).unwrap_or_default(),
            currency: workflow.state_data.raw_payload.get("currency").and_then(|v| v.as_str()).unwrap_or("USD").to_string(),
            match_score: workflow.match_score,
            reason_for_hold: paused_reason,
            status: ReviewStatus::Pending,
            priority: 0,
            assigned_to: None,
            review_url: review_url.clone(),
            created_at: chrono::Utc::now(),
            expires_at: None,
        };
        self.reviews.enqueue(review).await?;

        self.audit
            .append(AuditLog::new(
                &workflow.workflow_id,
                AuditEventType::CheckpointCreated,
                Some(StageId::CheckpointHitl),
                "workflow paused for human review",
                serde_json::json!({"checkpoint_id": checkpoint_id, "review_url": review_url}),
                ActorType::System,
                None,
            ))
            .await?;

        Ok(RunOutcome::AwaitingReview { checkpoint_id })
    }
}

/// Convenience used by the Review Service when recording a decision: builds
/// the review URL for a checkpoint the same way CHECKPOINT_HITL did.
pub fn review_url_for(frontend_base_url: &str, checkpoint_id: &str) -> String {
    generate_review_url(frontend_base_url, checkpoint_id)
}

const REQUIRED_SUBMISSION_FIELDS: [&str; 2] = ["vendor_name", "amount"];

/// Same required-field rule INTAKE's `validate_schema` ability applies, run
/// before a workflow ever gets created so a malformed submission never
/// produces a row.
fn validate_submission(raw_payload: &serde_json::Value) -> Result<(), WorkflowError> {
    let missing: Vec<&str> = REQUIRED_SUBMISSION_FIELDS
        .iter()
        .copied()
        .filter(|field| !raw_payload.get(field).map(|v| !v.is_null()).unwrap_or(false))
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(WorkflowError::validation(format!("invoice payload missing required field(s): {}", missing.join(", "))))
    }
}

#[allow(dead_code)]
fn _assert_checkpoint_shape(_c: &Checkpoint) {}
