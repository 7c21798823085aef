// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::value_objects::{ActorType, StageId};

/// Minimum set of events the Graph Runtime and Review Service must emit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AuditEventType {
    WorkflowStarted,
    StageStart,
    StageComplete,
    StageError,
    BigtoolSelection,
    McpCall,
    CheckpointCreated,
    HumanDecision,
    WorkflowCancelled,
}

/// An append-only audit trail entry. Never mutated after creation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuditLog {
    pub id: String,
    pub workflow_id: String,
    pub event_type: AuditEventType,
    pub stage_id: Option<StageId>,
    pub message: String,
    pub details: serde_json::Value,
    pub actor_type: ActorType,
    pub actor_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl AuditLog {
    pub fn new(
        workflow_id: &str,
        event_type: AuditEventType,
        stage_id: Option<StageId>,
        message: impl Into<String>,
        details: serde_json::Value,
        actor_type: ActorType,
        actor_id: Option<String>,
    ) -> Self {
        AuditLog {
            id: uuid::Uuid::new_v4().to_string(),
            workflow_id: workflow_id.to_string(),
            event_type,
            stage_id,
            message: message.into(),
            details,
            actor_type,
            actor_id,
            created_at: Utc::now(),
        }
    }
}
