// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use async_trait::async_trait;

use crate::entities::Checkpoint;
use crate::error::WorkflowError;
use crate::state::WorkflowState;
use crate::value_objects::HumanDecision;

/// Repository interface for the durable checkpoint/resume protocol (C5).
///
/// Exactly zero or one unresolved checkpoint per workflow is an invariant
/// implementations must enforce, not merely document -- the SQLite adapter
/// does it with a partial unique index, the in-memory adapter with an
/// assertion.
#[async_trait]
pub trait CheckpointRepository: Send + Sync {
    /// Persists `state_blob` for `workflow_id` at `stage_id`. When
    /// `stage_id` is CHECKPOINT_HITL, the adapter additionally enqueues a
    /// HumanReview row -- see `ReviewRepository`.
    async fn save_checkpoint(
        &self,
        workflow_id: &str,
        stage_id: crate::value_objects::StageId,
        state_blob: WorkflowState,
        paused_reason: &str,
        review_url: &str,
    ) -> Result<String, WorkflowError>;

    async fn find_by_id(&self, checkpoint_id: &str) -> Result<Option<Checkpoint>, WorkflowError>;

    async fn load_latest(&self, workflow_id: &str) -> Result<Option<Checkpoint>, WorkflowError>;

    /// Atomically resolves the checkpoint: marks it resolved, writes the
    /// decision fields into its `state_blob`, and returns the updated
    /// snapshot for the caller to persist back onto the workflow row.
    ///
    /// Errors `AlreadyResolved` if already resolved, `CheckpointNotFound` if
    /// absent.
    async fn resolve(
        &self,
        checkpoint_id: &str,
        decision: HumanDecision,
        resolver_id: &str,
        notes: Option<String>,
    ) -> Result<Checkpoint, WorkflowError>;
}
