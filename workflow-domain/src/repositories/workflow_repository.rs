// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use async_trait::async_trait;

use crate::entities::Workflow;
use crate::error::WorkflowError;
use crate::value_objects::WorkflowStatus;

/// Repository interface for workflow aggregate persistence. Implementations
/// must be thread-safe (`Send + Sync`); all mutations to a single workflow
/// row are expected to be serialized by the adapter.
#[async_trait]
pub trait WorkflowRepository: Send + Sync {
    async fn create(&self, workflow: &Workflow) -> Result<(), WorkflowError>;

    async fn find_by_id(&self, workflow_id: &str) -> Result<Option<Workflow>, WorkflowError>;

    async fn update(&self, workflow: &Workflow) -> Result<(), WorkflowError>;

    async fn list(
        &self,
        status: Option<WorkflowStatus>,
        offset: usize,
        limit: usize,
    ) -> Result<Vec<Workflow>, WorkflowError>;

    async fn delete(&self, workflow_id: &str) -> Result<bool, WorkflowError>;
}
