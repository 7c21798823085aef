// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use async_trait::async_trait;

use crate::entities::{AuditLog, AuditEventType};
use crate::error::WorkflowError;

/// Repository interface for the append-only audit trail. Entries are never
/// mutated or deleted after `append`.
#[async_trait]
pub trait AuditLogRepository: Send + Sync {
    async fn append(&self, entry: AuditLog) -> Result<(), WorkflowError>;

    async fn for_workflow(&self, workflow_id: &str) -> Result<Vec<AuditLog>, WorkflowError>;

    async fn for_workflow_by_event(
        &self,
        workflow_id: &str,
        event_type: AuditEventType,
    ) -> Result<Vec<AuditLog>, WorkflowError>;
}
