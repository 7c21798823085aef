// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The twelve nodes of the fixed invoice workflow DAG.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One node of the fixed 12-stage graph.
///
/// Ordering here is declaration order, not DAG order -- `StageId::all()`
/// gives the canonical linear presentation, but the actual successor of a
/// stage is a property of the graph, not of the enum (see
/// `workflow-engine`'s routing module for the conditional edges).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StageId {
    Intake,
    Understand,
    Prepare,
    Retrieve,
    MatchTwoWay,
    CheckpointHitl,
    HitlDecision,
    Reconcile,
    Approve,
    Posting,
    Notify,
    Complete,
}

impl StageId {
    pub const fn as_str(self) -> &'static str {
        match self {
            StageId::Intake => "INTAKE",
            StageId::Understand => "UNDERSTAND",
            StageId::Prepare => "PREPARE",
            StageId::Retrieve => "RETRIEVE",
            StageId::MatchTwoWay => "MATCH_TWO_WAY",
            StageId::CheckpointHitl => "CHECKPOINT_HITL",
            StageId::HitlDecision => "HITL_DECISION",
            StageId::Reconcile => "RECONCILE",
            StageId::Approve => "APPROVE",
            StageId::Posting => "POSTING",
            StageId::Notify => "NOTIFY",
            StageId::Complete => "COMPLETE",
        }
    }

    pub const fn all() -> [StageId; 12] {
        [
            StageId::Intake,
            StageId::Understand,
            StageId::Prepare,
            StageId::Retrieve,
            StageId::MatchTwoWay,
            StageId::CheckpointHitl,
            StageId::HitlDecision,
            StageId::Reconcile,
            StageId::Approve,
            StageId::Posting,
            StageId::Notify,
            StageId::Complete,
        ]
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn all_contains_twelve_distinct_stages() {
        let all = StageId::all();
        assert_eq!(all.len(), 12);
        let mut names: Vec<_> = all.iter().map(|s| s.as_str()).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), 12);
    }

    #[test]
    fn serializes_as_screaming_snake_case() {
        let json = serde_json::to_string(&StageId::MatchTwoWay).unwrap();
        assert_eq!(json, "\"MATCH_TWO_WAY\"");
    }
}
