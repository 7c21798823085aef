// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Workflow State
//!
//! `WorkflowState` is the closed, typed record each stage function reads and
//! contributes a delta to. It replaces a flat, untyped state bag with a
//! struct of `Option<_>` slots, one per stage -- merging a delta is a single
//! assignment into the owning stage's slot, and assigning into an
//! already-populated slot is a `WorkflowError`, not a silent overwrite. This
//! is what makes "a stage may only write its own declared outputs" (the
//! accumulation invariant) an enforced property instead of a convention.

use serde::{Deserialize, Serialize};

use super::stage_outputs::{
    ApproveOutputs, CheckpointOutputs, CompleteOutputs, HitlDecisionOutputs, IntakeOutputs,
    MatchOutputs, NotifyOutputs, PostingOutputs, PrepareOutputs, ReconcileOutputs, RetrieveOutputs,
    UnderstandOutputs,
};
use crate::value_objects::{StageId, WorkflowStatus};
use crate::WorkflowError;

/// A stage function's return value: exactly the fields that stage owns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum StageDelta {
    Intake(IntakeOutputs),
    Understand(UnderstandOutputs),
    Prepare(PrepareOutputs),
    Retrieve(RetrieveOutputs),
    MatchTwoWay(MatchOutputs),
    CheckpointHitl(CheckpointOutputs),
    HitlDecision(HitlDecisionOutputs),
    Reconcile(ReconcileOutputs),
    Approve(ApproveOutputs),
    Posting(PostingOutputs),
    Notify(NotifyOutputs),
    Complete(CompleteOutputs),
}

impl StageDelta {
    pub fn stage(&self) -> StageId {
        match self {
            StageDelta::Intake(_) => StageId::Intake,
            StageDelta::Understand(_) => StageId::Understand,
            StageDelta::Prepare(_) => StageId::Prepare,
            StageDelta::Retrieve(_) => StageId::Retrieve,
            StageDelta::MatchTwoWay(_) => StageId::MatchTwoWay,
            StageDelta::CheckpointHitl(_) => StageId::CheckpointHitl,
            StageDelta::HitlDecision(_) => StageId::HitlDecision,
            StageDelta::Reconcile(_) => StageId::Reconcile,
            StageDelta::Approve(_) => StageId::Approve,
            StageDelta::Posting(_) => StageId::Posting,
            StageDelta::Notify(_) => StageId::Notify,
            StageDelta::Complete(_) => StageId::Complete,
        }
    }
}

/// The running state accumulator: identity fields owned by the runtime, plus
/// one closed slot per stage.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    pub workflow_id: String,
    pub invoice_id: String,
    pub current_stage: StageId,
    pub status: WorkflowStatus,
    pub raw_payload: serde_json::Value,

    pub intake: Option<IntakeOutputs>,
    pub understand: Option<UnderstandOutputs>,
    pub prepare: Option<PrepareOutputs>,
    pub retrieve: Option<RetrieveOutputs>,
    pub match_two_way: Option<MatchOutputs>,
    pub checkpoint_hitl: Option<CheckpointOutputs>,
    pub hitl_decision: Option<HitlDecisionOutputs>,
    pub reconcile: Option<ReconcileOutputs>,
    pub approve: Option<ApproveOutputs>,
    pub posting: Option<PostingOutputs>,
    pub notify: Option<NotifyOutputs>,
    pub complete: Option<CompleteOutputs>,
}

impl WorkflowState {
    pub fn new(workflow_id: impl Into<String>, invoice_id: impl Into<String>, raw_payload: serde_json::Value) -> Self {
        WorkflowState {
            workflow_id: workflow_id.into(),
            invoice_id: invoice_id.into(),
            current_stage: StageId::Intake,
            status: WorkflowStatus::Pending,
            raw_payload,
            intake: None,
            understand: None,
            prepare: None,
            retrieve: None,
            match_two_way: None,
            checkpoint_hitl: None,
            hitl_decision: None,
            reconcile: None,
            approve: None,
            posting: None,
            notify: None,
            complete: None,
        }
    }

    /// Applies a stage's delta. Errors if the owning slot is already
    /// populated -- the append-only invariant from the data model section.
    pub fn merge(&mut self, delta: StageDelta) -> Result<(), WorkflowError> {
        macro_rules! fill {
            ($slot:expr, $value:expr, $stage:expr) => {
                if $slot.is_some() {
                    return Err(WorkflowError::stage_output_overwrite($stage.as_str()));
                }
                $slot = Some($value);
            };
        }

        match delta {
            StageDelta::Intake(o) => fill!(self.intake, o, StageId::Intake),
            StageDelta::Understand(o) => fill!(self.understand, o, StageId::Understand),
            StageDelta::Prepare(o) => fill!(self.prepare, o, StageId::Prepare),
            StageDelta::Retrieve(o) => fill!(self.retrieve, o, StageId::Retrieve),
            StageDelta::MatchTwoWay(o) => fill!(self.match_two_way, o, StageId::MatchTwoWay),
            StageDelta::CheckpointHitl(o) => fill!(self.checkpoint_hitl, o, StageId::CheckpointHitl),
            StageDelta::HitlDecision(o) => fill!(self.hitl_decision, o, StageId::HitlDecision),
            StageDelta::Reconcile(o) => fill!(self.reconcile, o, StageId::Reconcile),
            StageDelta::Approve(o) => fill!(self.approve, o, StageId::Approve),
            StageDelta::Posting(o) => fill!(self.posting, o, StageId::Posting),
            StageDelta::Notify(o) => fill!(self.notify, o, StageId::Notify),
            StageDelta::Complete(o) => fill!(self.complete, o, StageId::Complete),
        }
        Ok(())
    }

    /// Advances the runtime-owned `current_stage` marker. Exempt from the
    /// stage-output append-only rule: the Graph Runtime, not a stage
    /// function, calls this.
    pub fn advance_to(&mut self, stage: StageId) {
        self.current_stage = stage;
    }

    /// Merges reviewer-supplied fields (`human_decision`, `reviewer_id`,
    /// `reviewer_notes`) into `raw_payload` ahead of a `Resume` call. This is
    /// how a decision made outside the process crosses back into state --
    /// HITL_DECISION reads it from here, not from a dedicated slot, since
    /// the slot it produces is its own output.
    pub fn deposit_decision(&mut self, decision: serde_json::Value) {
        if let (Some(target), Some(incoming)) = (self.raw_payload.as_object_mut(), decision.as_object()) {
            for (k, v) in incoming {
                target.insert(k.clone(), v.clone());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::IntakeOutputs;
    use chrono::Utc;

    fn state() -> WorkflowState {
        WorkflowState::new("wf_1", "INV-1", serde_json::json!({}))
    }

    fn intake_outputs() -> IntakeOutputs {
        IntakeOutputs {
            raw_id: "raw_abc".into(),
            ingest_ts: Utc::now(),
            validated: true,
        }
    }

    #[test]
    fn merge_fills_the_owning_slot() {
        let mut state = state();
        state.merge(StageDelta::Intake(intake_outputs())).unwrap();
        assert!(state.intake.is_some());
    }

    #[test]
    fn merging_the_same_stage_twice_is_an_error() {
        let mut state = state();
        state.merge(StageDelta::Intake(intake_outputs())).unwrap();
        let err = state.merge(StageDelta::Intake(intake_outputs())).unwrap_err();
        assert_eq!(err.category(), "stage");
    }

    #[test]
    fn advance_to_does_not_touch_stage_slots() {
        let mut state = state();
        state.advance_to(StageId::Understand);
        assert_eq!(state.current_stage, StageId::Understand);
        assert!(state.intake.is_none());
    }

    #[test]
    fn deposit_decision_merges_into_raw_payload() {
        let mut state = state();
        state.deposit_decision(serde_json::json!({"human_decision": "ACCEPT", "reviewer_id": "alice"}));
        assert_eq!(state.raw_payload["human_decision"], "ACCEPT");
        assert_eq!(state.raw_payload["reviewer_id"], "alice");
    }
}
