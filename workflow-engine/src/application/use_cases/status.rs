// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Workflow Status Use Case

use std::sync::Arc;

use anyhow::Result;
use workflow_domain::entities::Workflow;
use workflow_domain::repositories::WorkflowRepository;
use workflow_domain::WorkflowError;

pub struct WorkflowStatusUseCase {
    workflows: Arc<dyn WorkflowRepository>,
}

impl WorkflowStatusUseCase {
    pub fn new(workflows: Arc<dyn WorkflowRepository>) -> Self {
        Self { workflows }
    }

    pub async fn execute(&self, workflow_id: &str) -> Result<Workflow> {
        let workflow = self
            .workflows
            .find_by_id(workflow_id)
            .await?
            .ok_or_else(|| WorkflowError::workflow_not_found(workflow_id))?;
        println!("Workflow {}: {:?} at stage {}", workflow.workflow_id, workflow.status, workflow.current_stage);
        if let Some(err) = &workflow.error_message {
            println!("  error: {err}");
        }
        Ok(workflow)
    }
}
