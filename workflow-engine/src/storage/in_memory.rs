// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! In-memory adapters for the four Checkpoint & Review Store ports. Used by
//! the Graph Runtime's own tests and by `workflow-bootstrap` when no SQLite
//! path is configured. The single-unresolved-checkpoint invariant is
//! enforced with a plain check under the write lock rather than a database
//! constraint.

use std::collections::HashMap;

use async_trait::async_trait;
use parking_lot::RwLock;
use workflow_domain::entities::{AuditLog, AuditEventType, Checkpoint, HumanReview, Workflow};
use workflow_domain::repositories::{AuditLogRepository, CheckpointRepository, ReviewRepository, WorkflowRepository};
use workflow_domain::state::WorkflowState;
use workflow_domain::value_objects::{HumanDecision, ReviewStatus, StageId, WorkflowStatus};
use workflow_domain::WorkflowError;

#[derive(Default)]
pub struct InMemoryWorkflowRepository {
    rows: RwLock<HashMap<String, Workflow>>,
}

impl InMemoryWorkflowRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl WorkflowRepository for InMemoryWorkflowRepository {
    async fn create(&self, workflow: &Workflow) -> Result<(), WorkflowError> {
        self.rows.write().insert(workflow.workflow_id.clone(), workflow.clone());
        Ok(())
    }

    async fn find_by_id(&self, workflow_id: &str) -> Result<Option<Workflow>, WorkflowError> {
        Ok(self.rows.read().get(workflow_id).cloned())
    }

    async fn update(&self, workflow: &Workflow) -> Result<(), WorkflowError> {
        self.rows.write().insert(workflow.workflow_id.clone(), workflow.clone());
        Ok(())
    }

    async fn list(&self, status: Option<WorkflowStatus>, offset: usize, limit: usize) -> Result<Vec<Workflow>, WorkflowError> {
        let rows = self.rows.read();
        let mut matching: Vec<Workflow> =
            rows.values().filter(|w| status.map(|s| w.status == s).unwrap_or(true)).cloned().collect();
        matching.sort_by_key(|w| w.started_at);
        Ok(matching.into_iter().skip(offset).take(limit).collect())
    }

    async fn delete(&self, workflow_id: &str) -> Result<bool, WorkflowError> {
        Ok(self.rows.write().remove(workflow_id).is_some())
    }
}

#[derive(Default)]
pub struct InMemoryCheckpointRepository {
    rows: RwLock<HashMap<String, Checkpoint>>,
}

impl InMemoryCheckpointRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CheckpointRepository for InMemoryCheckpointRepository {
    async fn save_checkpoint(
        &self,
        workflow_id: &str,
        stage_id: StageId,
        state_blob: WorkflowState,
        paused_reason: &str,
        review_url: &str,
    ) -> Result<String, WorkflowError> {
        let mut rows = self.rows.write();
        if rows.values().any(|c| c.workflow_id == workflow_id && !c.is_resolved) {
            return Err(WorkflowError::concurrency(format!("workflow {workflow_id} already has an unresolved checkpoint")));
        }
        let checkpoint = Checkpoint::new(workflow_id, stage_id, state_blob, paused_reason, review_url);
        let id = checkpoint.checkpoint_id.clone();
        rows.insert(id.clone(), checkpoint);
        Ok(id)
    }

    async fn find_by_id(&self, checkpoint_id: &str) -> Result<Option<Checkpoint>, WorkflowError> {
        Ok(self.rows.read().get(checkpoint_id).cloned())
    }

    async fn load_latest(&self, workflow_id: &str) -> Result<Option<Checkpoint>, WorkflowError> {
        Ok(self.rows.read().values().filter(|c| c.workflow_id == workflow_id).max_by_key(|c| c.created_at).cloned())
    }

    async fn resolve(
        &self,
        checkpoint_id: &str,
        decision: HumanDecision,
        resolver_id: &str,
        notes: Option<String>,
    ) -> Result<Checkpoint, WorkflowError> {
        let mut rows = self.rows.write();
        let checkpoint = rows.get_mut(checkpoint_id).ok_or_else(|| WorkflowError::checkpoint_not_found(checkpoint_id))?;
        if checkpoint.is_resolved {
            return Err(WorkflowError::already_resolved(checkpoint_id));
        }
        checkpoint.resolve(decision, resolver_id, notes.clone());
        let decision_str = match decision {
            HumanDecision::Accept => "ACCEPT",
            HumanDecision::Reject => "REJECT",
        };
        checkpoint.state_blob.deposit_decision(serde_json::json!({
            "human_decision": decision_str,
            "reviewer_id": resolver_id,
            "reviewer_notes": notes,
        }));
        Ok(checkpoint.clone())
    }
}

#[derive(Default)]
pub struct InMemoryReviewRepository {
    rows: RwLock<HashMap<String, HumanReview>>,
}

impl InMemoryReviewRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ReviewRepository for InMemoryReviewRepository {
    async fn enqueue(&self, review: HumanReview) -> Result<(), WorkflowError> {
        self.rows.write().insert(review.checkpoint_id.clone(), review);
        Ok(())
    }

    async fn find_by_checkpoint(&self, checkpoint_id: &str) -> Result<Option<HumanReview>, WorkflowError> {
        Ok(self.rows.read().get(checkpoint_id).cloned())
    }

    async fn list(&self, status: Option<ReviewStatus>) -> Result<Vec<HumanReview>, WorkflowError> {
        let rows = self.rows.read();
        let mut matching: Vec<HumanReview> =
            rows.values().filter(|r| status.map(|s| r.status == s).unwrap_or(true)).cloned().collect();
        matching.sort_by_key(workflow_domain::entities::pending_order_key);
        Ok(matching)
    }

    async fn mark_reviewed(&self, checkpoint_id: &str) -> Result<(), WorkflowError> {
        let mut rows = self.rows.write();
        let review = rows.get_mut(checkpoint_id).ok_or_else(|| WorkflowError::checkpoint_not_found(checkpoint_id))?;
        review.status = ReviewStatus::Reviewed;
        Ok(())
    }

    async fn expire_stale(&self, expiry_hours: i64) -> Result<Vec<String>, WorkflowError> {
        let now = chrono::Utc::now();
        let mut rows = self.rows.write();
        let mut expired = Vec::new();
        for review in rows.values_mut() {
            if review.is_stale(now, expiry_hours) {
                review.status = ReviewStatus::Expired;
                expired.push(review.checkpoint_id.clone());
            }
        }
        Ok(expired)
    }
}

#[derive(Default)]
pub struct InMemoryAuditLogRepository {
    rows: RwLock<Vec<AuditLog>>,
}

impl InMemoryAuditLogRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AuditLogRepository for InMemoryAuditLogRepository {
    async fn append(&self, entry: AuditLog) -> Result<(), WorkflowError> {
        self.rows.write().push(entry);
        Ok(())
    }

    async fn for_workflow(&self, workflow_id: &str) -> Result<Vec<AuditLog>, WorkflowError> {
        Ok(self.rows.read().iter().filter(|e| e.workflow_id == workflow_id).cloned().collect())
    }

    async fn for_workflow_by_event(&self, workflow_id: &str, event_type: AuditEventType) -> Result<Vec<AuditLog>, WorkflowError> {
        Ok(self.rows.read().iter().filter(|e| e.workflow_id == workflow_id && e.event_type == event_type).cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> WorkflowState {
        WorkflowState::new("wf_1", "INV-1", serde_json::json!({}))
    }

    #[tokio::test]
    async fn a_second_unresolved_checkpoint_is_rejected() {
        let repo = InMemoryCheckpointRepository::new();
        repo.save_checkpoint("wf_1", StageId::CheckpointHitl, state(), "low score", "http://x").await.unwrap();
        let err = repo.save_checkpoint("wf_1", StageId::CheckpointHitl, state(), "low score again", "http://x").await.unwrap_err();
        assert_eq!(err.category(), "concurrency");
    }

    #[tokio::test]
    async fn resolving_twice_errors() {
        let repo = InMemoryCheckpointRepository::new();
        let id = repo.save_checkpoint("wf_1", StageId::CheckpointHitl, state(), "low score", "http://x").await.unwrap();
        repo.resolve(&id, HumanDecision::Accept, "alice", None).await.unwrap();
        let err = repo.resolve(&id, HumanDecision::Accept, "alice", None).await.unwrap_err();
        assert_eq!(err.category(), "checkpoint");
    }

    #[tokio::test]
    async fn resolve_deposits_the_decision_into_the_state_blob() {
        let repo = InMemoryCheckpointRepository::new();
        let id = repo.save_checkpoint("wf_1", StageId::CheckpointHitl, state(), "low score", "http://x").await.unwrap();
        let resolved = repo.resolve(&id, HumanDecision::Reject, "bob", Some("bad vendor".into())).await.unwrap();
        assert_eq!(resolved.state_blob.raw_payload["human_decision"], "REJECT");
        assert_eq!(resolved.state_blob.raw_payload["reviewer_id"], "bob");
    }
}
