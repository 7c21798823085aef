// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;

use crate::state::MatchEvidence;
use crate::value_objects::MatchResult;

/// The two-way match score curve. `po_amounts` is the set of matched purchase
/// order amounts; an empty set always scores zero. Returns the score plus the
/// evidence the caller should record alongside it.
pub fn compute_match_score(
    invoice_amount: Decimal,
    po_amounts: &[Decimal],
    threshold: f64,
    tolerance_pct: f64,
) -> (f64, MatchResult, MatchEvidence) {
    let po_total: Decimal = po_amounts.iter().sum();
    let pos_count = po_amounts.len();

    let (score, difference_pct) = if po_amounts.is_empty() {
        (0.0, 0.0)
    } else if po_total.is_zero() {
        (if invoice_amount.is_zero() { 1.0 } else { 0.0 }, 0.0)
    } else {
        let invoice_f = invoice_amount.to_f64().unwrap_or(0.0);
        let po_total_f = po_total.to_f64().unwrap_or(0.0);
        let diff_pct = ((invoice_f - po_total_f).abs() / po_total_f) * 100.0;
        let score = if diff_pct <= tolerance_pct {
            1.0 - (diff_pct / tolerance_pct) * 0.1
        } else {
            (1.0 - diff_pct / 100.0).max(0.0)
        };
        (score, diff_pct)
    };

    let match_result = if score >= threshold { MatchResult::Matched } else { MatchResult::Failed };
    let evidence = MatchEvidence {
        invoice_amount,
        po_total,
        pos_count,
        threshold_used: threshold,
        difference_pct,
    };
    (score, match_result, evidence)
}

/// Derives `missing_info` from absent optional invoice fields and the
/// resulting `risk_score`.
pub fn compute_flags(missing_info: &[String], amount: Decimal) -> f64 {
    let large_amount = amount > Decimal::new(5_000_000, 2); // 50,000.00
    (0.2 * missing_info.len() as f64 + if large_amount { 0.3 } else { 0.0 }).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_pool_scores_zero() {
        let (score, result, _) = compute_match_score(Decimal::new(10000, 0), &[], 0.90, 5.0);
        assert_eq!(score, 0.0);
        assert_eq!(result, MatchResult::Failed);
    }

    #[test]
    fn exact_match_scores_one() {
        let (score, result, _) =
            compute_match_score(Decimal::new(10000, 0), &[Decimal::new(10000, 0)], 0.90, 5.0);
        assert_eq!(score, 1.0);
        assert_eq!(result, MatchResult::Matched);
    }

    #[test]
    fn boundary_diff_equal_to_tolerance_scores_point_nine() {
        let invoice = Decimal::new(10500, 0);
        let po = Decimal::new(10000, 0);
        let (score, _, _) = compute_match_score(invoice, &[po], 0.90, 5.0);
        assert!((score - 0.9).abs() < 1e-9);
    }

    #[test]
    fn zero_po_total_and_nonzero_invoice_scores_zero() {
        let (score, result, _) =
            compute_match_score(Decimal::new(100, 0), &[Decimal::ZERO], 0.90, 5.0);
        assert_eq!(score, 0.0);
        assert_eq!(result, MatchResult::Failed);
    }

    #[test]
    fn risk_score_caps_at_one() {
        let missing = vec!["a".to_string(), "b".to_string(), "c".to_string(), "d".to_string(), "e".to_string(), "f".to_string()];
        let risk = compute_flags(&missing, Decimal::new(6_000_000, 2));
        assert_eq!(risk, 1.0);
    }

    #[test]
    fn risk_score_reflects_missing_fields_and_large_amount() {
        let missing = vec!["due_date".to_string()];
        let risk = compute_flags(&missing, Decimal::new(6_000_000, 2));
        assert!((risk - 0.5).abs() < 1e-9);
    }
}
