// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use rust_decimal::Decimal;

use crate::value_objects::ApprovalStatus;

/// Auto-approves invoices at or below `auto_approve_threshold` with a low
/// risk score; everything else escalates to a human approver.
pub fn apply_approval_policy(
    amount: Decimal,
    risk_score: f64,
    auto_approve_threshold: Decimal,
) -> (ApprovalStatus, &'static str) {
    if amount <= auto_approve_threshold && risk_score < 0.5 {
        (ApprovalStatus::AutoApproved, "SYSTEM")
    } else {
        (ApprovalStatus::Escalated, "finance_manager")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn auto_approves_low_amount_low_risk() {
        let (status, approver) =
            apply_approval_policy(Decimal::new(5000, 0), 0.1, Decimal::new(10000, 0));
        assert_eq!(status, ApprovalStatus::AutoApproved);
        assert_eq!(approver, "SYSTEM");
    }

    #[test]
    fn escalates_high_amount() {
        let (status, approver) =
            apply_approval_policy(Decimal::new(50000, 0), 0.1, Decimal::new(10000, 0));
        assert_eq!(status, ApprovalStatus::Escalated);
        assert_eq!(approver, "finance_manager");
    }

    #[test]
    fn escalates_high_risk_even_if_low_amount() {
        let (status, _) = apply_approval_policy(Decimal::new(100, 0), 0.6, Decimal::new(10000, 0));
        assert_eq!(status, ApprovalStatus::Escalated);
    }
}
