// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The fixed twelve-node DAG's edge table. Two nodes branch on data rather
//! than always advancing to the next declared `StageId`; everywhere else
//! the graph is a straight line. Routing is a match on tagged state, never a
//! string lookup.

use workflow_domain::state::WorkflowState;
use workflow_domain::value_objects::{MatchResult, StageId};

/// The node after `stage`, given the state produced by running it -- `None`
/// at CHECKPOINT_HITL, which is the runtime's only interrupt gate, and at
/// COMPLETE, which has no successor.
pub fn successor(stage: StageId, state: &WorkflowState) -> Option<StageId> {
    match stage {
        StageId::Intake => Some(StageId::Understand),
        StageId::Understand => Some(StageId::Prepare),
        StageId::Prepare => Some(StageId::Retrieve),
        StageId::Retrieve => Some(StageId::MatchTwoWay),
        StageId::MatchTwoWay => match state.match_two_way.as_ref().map(|m| m.match_result) {
            Some(MatchResult::Matched) => Some(StageId::Reconcile),
            _ => Some(StageId::CheckpointHitl),
        },
        StageId::CheckpointHitl => None,
        StageId::HitlDecision => state.hitl_decision.as_ref().map(|h| h.next_stage),
        StageId::Reconcile => Some(StageId::Approve),
        StageId::Approve => Some(StageId::Posting),
        StageId::Posting => Some(StageId::Notify),
        StageId::Notify => Some(StageId::Complete),
        StageId::Complete => None,
    }
}

/// Whether reaching `stage` should stop the runtime's execution loop rather
/// than immediately compute and run its successor.
pub fn is_interrupt(stage: StageId) -> bool {
    matches!(stage, StageId::CheckpointHitl)
}

#[cfg(test)]
mod tests {
    use super::*;
    use workflow_domain::state::{MatchEvidence, MatchOutputs};
    use rust_decimal::Decimal;

    fn state() -> WorkflowState {
        WorkflowState::new("wf_1", "INV-1", serde_json::json!({}))
    }

    fn evidence() -> MatchEvidence {
        MatchEvidence { invoice_amount: Decimal::ZERO, po_total: Decimal::ZERO, pos_count: 0, threshold_used: 0.9, difference_pct: 0.0 }
    }

    #[test]
    fn matched_two_way_advances_straight_to_reconcile() {
        let mut state = state();
        state.match_two_way = Some(MatchOutputs { match_score: 1.0, match_result: MatchResult::Matched, tolerance_pct: 5.0, match_evidence: evidence() });
        assert_eq!(successor(StageId::MatchTwoWay, &state), Some(StageId::Reconcile));
    }

    #[test]
    fn failed_two_way_detours_through_checkpoint() {
        let mut state = state();
        state.match_two_way = Some(MatchOutputs { match_score: 0.2, match_result: MatchResult::Failed, tolerance_pct: 5.0, match_evidence: evidence() });
        assert_eq!(successor(StageId::MatchTwoWay, &state), Some(StageId::CheckpointHitl));
    }

    #[test]
    fn checkpoint_hitl_has_no_computed_successor() {
        assert!(is_interrupt(StageId::CheckpointHitl));
        assert_eq!(successor(StageId::CheckpointHitl, &state()), None);
    }

    #[test]
    fn complete_is_the_end_of_the_line() {
        assert_eq!(successor(StageId::Complete, &state()), None);
    }
}
