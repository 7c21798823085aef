// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Value objects: immutable, identity-free types defined by their attributes.

mod ability;
mod actor;
mod approval_status;
mod capability;
mod human_decision;
mod ids;
mod match_result;
mod review_status;
mod stage_id;
mod workflow_status;

pub use ability::{Ability, Backend};
pub use actor::ActorType;
pub use approval_status::ApprovalStatus;
pub use capability::Capability;
pub use human_decision::HumanDecision;
pub use ids::{
    checkpoint_id, erp_txn_id, journal_entry_ids, raw_invoice_id, resume_token, scheduled_payment_id,
    workflow_id,
};
pub use match_result::MatchResult;
pub use review_status::ReviewStatus;
pub use stage_id::StageId;
pub use workflow_status::WorkflowStatus;
