// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::state::WorkflowState;
use crate::value_objects::{checkpoint_id, HumanDecision, StageId};

/// A durable snapshot of a workflow's state at the instant it suspended.
/// Created only by CHECKPOINT_HITL; mutated only by the Review Service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Checkpoint {
    pub checkpoint_id: String,
    pub workflow_id: String,
    pub stage_id: StageId,
    pub state_blob: WorkflowState,
    pub paused_reason: String,
    pub review_url: String,
    pub is_resolved: bool,
    pub resolved_at: Option<DateTime<Utc>>,
    pub resolution: Option<HumanDecision>,
    pub resolver_id: Option<String>,
    pub resolver_notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Checkpoint {
    pub fn new(
        workflow_id: &str,
        stage_id: StageId,
        state_blob: WorkflowState,
        paused_reason: impl Into<String>,
        review_url: impl Into<String>,
    ) -> Self {
        Checkpoint {
            checkpoint_id: checkpoint_id(workflow_id),
            workflow_id: workflow_id.to_string(),
            stage_id,
            state_blob,
            paused_reason: paused_reason.into(),
            review_url: review_url.into(),
            is_resolved: false,
            resolved_at: None,
            resolution: None,
            resolver_id: None,
            resolver_notes: None,
            created_at: Utc::now(),
        }
    }

    pub fn resolve(&mut self, decision: HumanDecision, resolver_id: impl Into<String>, notes: Option<String>) {
        self.is_resolved = true;
        self.resolution = Some(decision);
        self.resolver_id = Some(resolver_id.into());
        self.resolver_notes = notes;
        self.resolved_at = Some(Utc::now());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state() -> WorkflowState {
        WorkflowState::new("wf_1", "INV-1", serde_json::json!({}))
    }

    #[test]
    fn new_checkpoint_is_unresolved() {
        let cp = Checkpoint::new("wf_1", StageId::CheckpointHitl, state(), "low score", "http://x/review/cp_1");
        assert!(!cp.is_resolved);
        assert!(cp.checkpoint_id.starts_with("cp_wf_1_"));
    }

    #[test]
    fn resolve_records_decision_and_timestamp() {
        let mut cp = Checkpoint::new("wf_1", StageId::CheckpointHitl, state(), "low score", "http://x");
        cp.resolve(HumanDecision::Accept, "ops_1", Some("verified".into()));
        assert!(cp.is_resolved);
        assert_eq!(cp.resolution, Some(HumanDecision::Accept));
        assert!(cp.resolved_at.is_some());
    }
}
