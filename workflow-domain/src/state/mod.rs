// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The running state accumulator and the per-stage output groups that make
//! up its closed shape (see `stage_outputs` and the re-architecture note on
//! typed state in the design notes).

mod stage_outputs;
mod workflow_state;

pub use stage_outputs::{
    AccountingEntry, ApproveOutputs, AuditLogSummary, CheckpointOutputs, CompleteOutputs,
    GoodsReceiptNote, HitlDecisionOutputs, IntakeOutputs, MatchEvidence, MatchOutputs,
    NotifyOutputs, PostingOutputs, PrepareOutputs, PurchaseOrder, ReconcileOutputs,
    ReconciliationReport, RetrieveOutputs, UnderstandOutputs,
};
pub use workflow_state::{StageDelta, WorkflowState};
