// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The twenty named abilities the Ability Router knows, and the compile-time
//! table assigning each to its backend. Unlike the MCP-server framing this
//! was generalized from, both backends are plain `fn(params) -> map`; no
//! network hop is implied by this dispatch table.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Backend {
    Internal,
    External,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    // Internal
    ValidateSchema,
    PersistRawInvoice,
    ParseLineItems,
    NormalizeVendor,
    ComputeFlags,
    ComputeMatchScore,
    SaveCheckpoint,
    BuildAccountingEntries,
    ApplyApprovalPolicy,
    OutputFinalPayload,
    // External
    OcrExtract,
    EnrichVendor,
    FetchPo,
    FetchGrn,
    FetchHistory,
    HumanReviewAction,
    PostToErp,
    SchedulePayment,
    NotifyVendor,
    NotifyFinanceTeam,
}

impl Ability {
    pub const fn as_str(self) -> &'static str {
        match self {
            Ability::ValidateSchema => "validate_schema",
            Ability::PersistRawInvoice => "persist_raw_invoice",
            Ability::ParseLineItems => "parse_line_items",
            Ability::NormalizeVendor => "normalize_vendor",
            Ability::ComputeFlags => "compute_flags",
            Ability::ComputeMatchScore => "compute_match_score",
            Ability::SaveCheckpoint => "save_checkpoint",
            Ability::BuildAccountingEntries => "build_accounting_entries",
            Ability::ApplyApprovalPolicy => "apply_approval_policy",
            Ability::OutputFinalPayload => "output_final_payload",
            Ability::OcrExtract => "ocr_extract",
            Ability::EnrichVendor => "enrich_vendor",
            Ability::FetchPo => "fetch_po",
            Ability::FetchGrn => "fetch_grn",
            Ability::FetchHistory => "fetch_history",
            Ability::HumanReviewAction => "human_review_action",
            Ability::PostToErp => "post_to_erp",
            Ability::SchedulePayment => "schedule_payment",
            Ability::NotifyVendor => "notify_vendor",
            Ability::NotifyFinanceTeam => "notify_finance_team",
        }
    }

    /// The compile-time routing table from section 6: which backend owns
    /// this ability.
    pub const fn backend(self) -> Backend {
        match self {
            Ability::ValidateSchema
            | Ability::PersistRawInvoice
            | Ability::ParseLineItems
            | Ability::NormalizeVendor
            | Ability::ComputeFlags
            | Ability::ComputeMatchScore
            | Ability::SaveCheckpoint
            | Ability::BuildAccountingEntries
            | Ability::ApplyApprovalPolicy
            | Ability::OutputFinalPayload => Backend::Internal,
            Ability::OcrExtract
            | Ability::EnrichVendor
            | Ability::FetchPo
            | Ability::FetchGrn
            | Ability::FetchHistory
            | Ability::HumanReviewAction
            | Ability::PostToErp
            | Ability::SchedulePayment
            | Ability::NotifyVendor
            | Ability::NotifyFinanceTeam => Backend::External,
        }
    }

    pub fn from_str(name: &str) -> Option<Ability> {
        Ability::all().into_iter().find(|a| a.as_str() == name)
    }

    pub const fn all() -> [Ability; 20] {
        [
            Ability::ValidateSchema,
            Ability::PersistRawInvoice,
            Ability::ParseLineItems,
            Ability::NormalizeVendor,
            Ability::ComputeFlags,
            Ability::ComputeMatchScore,
            Ability::SaveCheckpoint,
            Ability::BuildAccountingEntries,
            Ability::ApplyApprovalPolicy,
            Ability::OutputFinalPayload,
            Ability::OcrExtract,
            Ability::EnrichVendor,
            Ability::FetchPo,
            Ability::FetchGrn,
            Ability::FetchHistory,
            Ability::HumanReviewAction,
            Ability::PostToErp,
            Ability::SchedulePayment,
            Ability::NotifyVendor,
            Ability::NotifyFinanceTeam,
        ]
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_abilities_per_backend() {
        let (internal, external): (Vec<_>, Vec<_>) =
            Ability::all().into_iter().partition(|a| a.backend() == Backend::Internal);
        assert_eq!(internal.len(), 10);
        assert_eq!(external.len(), 10);
    }

    #[test]
    fn compute_match_score_is_internal() {
        assert_eq!(Ability::ComputeMatchScore.backend(), Backend::Internal);
    }

    #[test]
    fn post_to_erp_is_external() {
        assert_eq!(Ability::PostToErp.backend(), Backend::External);
    }

    #[test]
    fn from_str_round_trips_as_str() {
        assert_eq!(Ability::from_str("post_to_erp"), Some(Ability::PostToErp));
        assert_eq!(Ability::from_str("not_an_ability"), None);
    }
}
