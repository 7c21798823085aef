// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Resume Workflow Use Case

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::runtime::{GraphRuntime, RunOutcome};

pub struct ResumeWorkflowUseCase {
    runtime: Arc<GraphRuntime>,
}

impl ResumeWorkflowUseCase {
    pub fn new(runtime: Arc<GraphRuntime>) -> Self {
        Self { runtime }
    }

    /// Re-enters `workflow_id` at HITL_DECISION. The caller must have
    /// resolved its checkpoint first (see `DecideReviewUseCase`).
    pub async fn execute(&self, workflow_id: &str) -> Result<RunOutcome> {
        info!(workflow_id, "resuming workflow");
        let outcome = self.runtime.resume(workflow_id).await?;
        match &outcome {
            RunOutcome::Completed => println!("Workflow {workflow_id} completed."),
            RunOutcome::ManualHandoff => println!("Workflow {workflow_id} ended in manual handoff."),
            RunOutcome::AwaitingReview { checkpoint_id } => {
                println!("Workflow {workflow_id} is awaiting review at checkpoint {checkpoint_id}.")
            }
        }
        Ok(outcome)
    }
}
