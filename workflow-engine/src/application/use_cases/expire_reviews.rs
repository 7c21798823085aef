// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Expire Stale Reviews Use Case
//!
//! Expiring a review also fails its owning workflow -- a PENDING review
//! that ages out means nobody is ever going to resolve the checkpoint it
//! belongs to, so the workflow can't make further progress either.

use std::sync::Arc;

use anyhow::Result;
use tracing::info;
use workflow_domain::repositories::{CheckpointRepository, ReviewRepository, WorkflowRepository};
use workflow_domain::value_objects::WorkflowStatus;

pub struct ExpireReviewsUseCase {
    reviews: Arc<dyn ReviewRepository>,
    checkpoints: Arc<dyn CheckpointRepository>,
    workflows: Arc<dyn WorkflowRepository>,
}

impl ExpireReviewsUseCase {
    pub fn new(
        reviews: Arc<dyn ReviewRepository>,
        checkpoints: Arc<dyn CheckpointRepository>,
        workflows: Arc<dyn WorkflowRepository>,
    ) -> Self {
        Self { reviews, checkpoints, workflows }
    }

    /// Marks every PENDING review older than `expiry_hours` as EXPIRED and
    /// fails each owning workflow. Returns the number transitioned.
    pub async fn execute(&self, expiry_hours: i64) -> Result<usize> {
        let expired_checkpoint_ids = self.reviews.expire_stale(expiry_hours).await?;

        for checkpoint_id in &expired_checkpoint_ids {
            let Some(checkpoint) = self.checkpoints.find_by_id(checkpoint_id).await? else { continue };
            let Some(mut workflow) = self.workflows.find_by_id(&checkpoint.workflow_id).await? else { continue };
            workflow.status = WorkflowStatus::Failed;
            workflow.error_message = Some(format!("Review expired after {expiry_hours} hours"));
            self.workflows.update(&workflow).await?;
        }

        let count = expired_checkpoint_ids.len();
        info!(count, expiry_hours, "expired stale reviews");
        println!("Expired {count} review(s) older than {expiry_hours}h.");
        Ok(count)
    }
}
