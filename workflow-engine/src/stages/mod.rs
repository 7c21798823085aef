// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Stage Functions (C3)
//!
//! Twelve functions, one per DAG node. Each takes the current `WorkflowState`
//! and returns a `StageDelta`; none mutates shared state directly -- the
//! Graph Runtime owns the merge.

mod approve;
mod checkpoint_hitl;
mod complete;
mod hitl_decision;
mod intake;
mod match_two_way;
mod notify;
mod posting;
mod prepare;
mod reconcile;
mod retrieve;
mod understand;

use std::sync::Arc;

use workflow_domain::state::{StageDelta, WorkflowState};
use workflow_domain::WorkflowError;

use crate::config::WorkflowSettings;
use crate::router::AbilityRouter;
use crate::tools::Selector;

/// Collaborators every stage function may call into. Constructor-injected
/// at runtime startup rather than process-wide singletons (see the
/// re-architecture note on runtime singletons).
pub struct StageContext {
    pub router: Arc<AbilityRouter>,
    pub selector: Arc<Selector>,
    pub settings: Arc<WorkflowSettings>,
}

pub async fn run(stage: workflow_domain::value_objects::StageId, ctx: &StageContext, state: &WorkflowState) -> Result<StageDelta, WorkflowError> {
    use workflow_domain::value_objects::StageId;
    match stage {
        StageId::Intake => intake::run(ctx, state).await,
        StageId::Understand => understand::run(ctx, state).await,
        StageId::Prepare => prepare::run(ctx, state).await,
        StageId::Retrieve => retrieve::run(ctx, state).await,
        StageId::MatchTwoWay => match_two_way::run(ctx, state).await,
        StageId::CheckpointHitl => checkpoint_hitl::run(ctx, state).await,
        StageId::HitlDecision => hitl_decision::run(ctx, state).await,
        StageId::Reconcile => reconcile::run(ctx, state).await,
        StageId::Approve => approve::run(ctx, state).await,
        StageId::Posting => posting::run(ctx, state).await,
        StageId::Notify => notify::run(ctx, state).await,
        StageId::Complete => complete::run(ctx, state).await,
    }
}
