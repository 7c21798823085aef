// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Per-stage output groups. Each struct here is the *only* place its stage
//! may write; `WorkflowState::merge` enforces that by storing each group in
//! a dedicated `Option<_>` slot rather than flattening everything into one
//! untyped map.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_objects::{ApprovalStatus, HumanDecision, MatchResult, StageId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PurchaseOrder {
    pub po_id: String,
    pub vendor: String,
    pub amount: Decimal,
    pub currency: String,
    pub status: String,
    pub created_date: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GoodsReceiptNote {
    pub grn_id: String,
    pub po_id: String,
    pub received_qty: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchEvidence {
    pub invoice_amount: Decimal,
    pub po_total: Decimal,
    pub pos_count: usize,
    pub threshold_used: f64,
    pub difference_pct: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AccountingEntry {
    pub entry_id: String,
    pub account: String,
    pub debit: Decimal,
    pub credit: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub entries: Vec<AccountingEntry>,
    pub balanced: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditLogSummary {
    pub stage: StageId,
    pub status: String,
}

/// Outputs owned by INTAKE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntakeOutputs {
    pub raw_id: String,
    pub ingest_ts: DateTime<Utc>,
    pub validated: bool,
}

/// Outputs owned by UNDERSTAND.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnderstandOutputs {
    pub parsed_invoice: serde_json::Value,
    pub ocr_provider_used: String,
    pub invoice_text: String,
    pub parsed_line_items: serde_json::Value,
    pub detected_pos: Vec<String>,
    pub parsed_dates: serde_json::Value,
}

/// Outputs owned by PREPARE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrepareOutputs {
    pub vendor_profile: serde_json::Value,
    pub normalized_invoice: serde_json::Value,
    pub flags: serde_json::Value,
    pub enrichment_provider_used: String,
    pub normalized_name: String,
    pub risk_score: f64,
    pub missing_info: Vec<String>,
}

/// Outputs owned by RETRIEVE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RetrieveOutputs {
    pub matched_pos: Vec<PurchaseOrder>,
    pub matched_grns: Vec<GoodsReceiptNote>,
    pub history: serde_json::Value,
    pub erp_connector_used: String,
}

/// Outputs owned by MATCH_TWO_WAY.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutputs {
    pub match_score: f64,
    pub match_result: MatchResult,
    pub tolerance_pct: f64,
    pub match_evidence: MatchEvidence,
}

/// Outputs owned by CHECKPOINT_HITL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CheckpointOutputs {
    pub checkpoint_id: String,
    pub review_url: String,
    pub paused_reason: String,
}

/// Outputs owned by HITL_DECISION.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HitlDecisionOutputs {
    pub human_decision: HumanDecision,
    pub reviewer_id: String,
    pub reviewer_notes: Option<String>,
    pub resume_token: String,
    pub next_stage: StageId,
}

/// Outputs owned by RECONCILE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReconcileOutputs {
    pub accounting_entries: Vec<AccountingEntry>,
    pub reconciliation_report: ReconciliationReport,
}

/// Outputs owned by APPROVE.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApproveOutputs {
    pub approval_status: ApprovalStatus,
    pub approver_id: String,
}

/// Outputs owned by POSTING.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostingOutputs {
    pub posted: bool,
    pub erp_txn_id: String,
    pub scheduled_payment_id: String,
}

/// Outputs owned by NOTIFY.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NotifyOutputs {
    pub notify_status: String,
    pub notified_parties: Vec<String>,
    pub email_provider_used: String,
}

/// Outputs owned by COMPLETE. `status` here mirrors the identity field; the
/// runtime reconciles the two at finalization (see `WorkflowState::merge`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompleteOutputs {
    pub final_payload: serde_json::Value,
    pub audit_log: Vec<AuditLogSummary>,
}
