// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Decide Review Use Case
//!
//! Resolves a checkpoint with a reviewer's decision. This is the Review
//! Service's half of the HITL protocol; the Graph Runtime's `resume` is a
//! separate call the caller makes afterward.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use workflow_domain::entities::{AuditLog, AuditEventType, Checkpoint};
use workflow_domain::value_objects::{ActorType, HumanDecision};

use crate::runtime::GraphRuntime;

pub struct DecideReviewUseCase {
    runtime: Arc<GraphRuntime>,
}

impl DecideReviewUseCase {
    pub fn new(runtime: Arc<GraphRuntime>) -> Self {
        Self { runtime }
    }

    pub async fn execute(
        &self,
        checkpoint_id: &str,
        decision: HumanDecision,
        reviewer_id: &str,
        notes: Option<String>,
    ) -> Result<Checkpoint> {
        info!(checkpoint_id, reviewer_id, ?decision, "recording review decision");
        let checkpoint = self.runtime.checkpoints.resolve(checkpoint_id, decision, reviewer_id, notes).await?;
        self.runtime.reviews.mark_reviewed(checkpoint_id).await?;
        self.runtime
            .audit
            .append(AuditLog::new(
                &checkpoint.workflow_id,
                AuditEventType::HumanDecision,
                Some(checkpoint.stage_id),
                format!("reviewer {reviewer_id} recorded a decision"),
                serde_json::json!({"checkpoint_id": checkpoint_id, "decision": decision}),
                ActorType::User,
                Some(reviewer_id.to_string()),
            ))
            .await?;
        println!("Checkpoint {checkpoint_id} resolved. Run `resume {}` to continue the workflow.", checkpoint.workflow_id);
        Ok(checkpoint)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkflowSettings;
    use crate::router::AbilityRouter;
    use crate::stages::StageContext;
    use crate::storage::in_memory::{InMemoryAuditLogRepository, InMemoryCheckpointRepository, InMemoryReviewRepository, InMemoryWorkflowRepository};
    use crate::tools::{Selector, ToolRegistry};

    fn runtime() -> Arc<GraphRuntime> {
        Arc::new(GraphRuntime::new(
            StageContext {
                router: Arc::new(AbilityRouter::new()),
                selector: Arc::new(Selector::new(Arc::new(ToolRegistry::with_default_providers()), None)),
                settings: Arc::new(WorkflowSettings::default()),
            },
            Arc::new(InMemoryWorkflowRepository::new()),
            Arc::new(InMemoryCheckpointRepository::new()),
            Arc::new(InMemoryReviewRepository::new()),
            Arc::new(InMemoryAuditLogRepository::new()),
        ))
    }

    #[tokio::test]
    async fn deciding_resolves_the_checkpoint_and_marks_the_review_reviewed() {
        let rt = runtime();
        let (_id, outcome) = rt
            .submit("INV-1", serde_json::json!({"invoice_id": "INV-1", "vendor_name": "Acme", "amount": 50000.0}))
            .await
            .unwrap();
        let checkpoint_id = match outcome {
            crate::runtime::RunOutcome::AwaitingReview { checkpoint_id } => checkpoint_id,
            other => panic!("expected AwaitingReview, got {other:?}"),
        };

        let uc = DecideReviewUseCase::new(rt.clone());
        let checkpoint = uc.execute(&checkpoint_id, HumanDecision::Accept, "alice", None).await.unwrap();
        assert!(checkpoint.is_resolved);

        let review = rt.reviews.find_by_checkpoint(&checkpoint_id).await.unwrap().unwrap();
        assert_eq!(review.status, workflow_domain::value_objects::ReviewStatus::Reviewed);
    }
}
