// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use async_trait::async_trait;

use crate::entities::HumanReview;
use crate::error::WorkflowError;
use crate::value_objects::ReviewStatus;

/// Repository interface for the human review queue. A single review's state
/// transitions (PENDING -> REVIEWED or PENDING -> EXPIRED) are atomic and
/// mutually exclusive.
#[async_trait]
pub trait ReviewRepository: Send + Sync {
    async fn enqueue(&self, review: HumanReview) -> Result<(), WorkflowError>;

    async fn find_by_checkpoint(
        &self,
        checkpoint_id: &str,
    ) -> Result<Option<HumanReview>, WorkflowError>;

    /// Lists reviews in a given status, ordered by priority descending then
    /// `created_at` ascending for the PENDING case.
    async fn list(&self, status: Option<ReviewStatus>) -> Result<Vec<HumanReview>, WorkflowError>;

    async fn mark_reviewed(&self, checkpoint_id: &str) -> Result<(), WorkflowError>;

    /// Marks every PENDING review older than `expiry_hours` as EXPIRED.
    /// Returns the checkpoint ids of the reviews transitioned, so the caller
    /// can fail the owning workflows.
    async fn expire_stale(&self, expiry_hours: i64) -> Result<Vec<String>, WorkflowError>;
}
