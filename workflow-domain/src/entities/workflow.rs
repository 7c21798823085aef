// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Workflow
//!
//! The central aggregate. A `Workflow` links an `Invoice` to its accumulated
//! `WorkflowState`; the Graph Runtime and the Review Service are the only
//! writers of `status`, the runtime is the only writer of `state_data`.

use chrono::{DateTime, Utc};

use crate::state::WorkflowState;
use crate::value_objects::{workflow_id, MatchResult, StageId, WorkflowStatus};

#[derive(Debug, Clone)]
pub struct Workflow {
    pub workflow_id: String,
    pub invoice_id: String,
    pub status: WorkflowStatus,
    pub current_stage: StageId,
    pub state_data: WorkflowState,
    pub match_score: Option<f64>,
    pub match_result: Option<MatchResult>,
    pub error_message: Option<String>,
    pub retry_count: u32,
    pub started_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}

impl Workflow {
    /// Creates a new workflow in `PENDING` status for the given invoice.
    /// `raw_payload` is whatever the caller submitted, retained verbatim in
    /// identity state for audit/debug purposes.
    pub fn start(invoice_id: &str, raw_payload: serde_json::Value) -> Self {
        let id = workflow_id(invoice_id);
        let state_data = WorkflowState::new(id.clone(), invoice_id, raw_payload);
        Workflow {
            workflow_id: id,
            invoice_id: invoice_id.to_string(),
            status: WorkflowStatus::Pending,
            current_stage: StageId::Intake,
            state_data,
            match_score: None,
            match_result: None,
            error_message: None,
            retry_count: 0,
            started_at: Utc::now(),
            completed_at: None,
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.status.is_terminal()
    }

    /// Legal in `{PENDING, RUNNING, PAUSED}`. See the concurrency model's
    /// cancellation rule.
    pub fn can_cancel(&self) -> bool {
        matches!(
            self.status,
            WorkflowStatus::Pending | WorkflowStatus::Running | WorkflowStatus::Paused
        )
    }
}
