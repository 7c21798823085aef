// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::value_objects::ReviewStatus;

/// Denormalized projection of a `Checkpoint` suitable for listing in a
/// review queue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HumanReview {
    pub checkpoint_id: String,
    pub invoice_id: String,
    pub vendor_name: String,
    pub amount: Decimal,
    pub currency: String,
    pub match_score: Option<f64>,
    pub reason_for_hold: String,
    pub status: ReviewStatus,
    pub priority: u8,
    pub assigned_to: Option<String>,
    pub review_url: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: Option<DateTime<Utc>>,
}

impl HumanReview {
    pub fn is_stale(&self, now: DateTime<Utc>, expiry_hours: i64) -> bool {
        self.status == ReviewStatus::Pending
            && now.signed_duration_since(self.created_at) > chrono::Duration::hours(expiry_hours)
    }
}

/// Ordering for pending-review listings: priority descending, then
/// created_at ascending.
pub fn pending_order_key(review: &HumanReview) -> (std::cmp::Reverse<u8>, DateTime<Utc>) {
    (std::cmp::Reverse(review.priority), review.created_at)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(created_hours_ago: i64) -> HumanReview {
        HumanReview {
            checkpoint_id: "cp_1".into(),
            invoice_id: "INV-1".into(),
            vendor_name: "Acme".into(),
            amount: Decimal::new(10000, 2),
            currency: "USD".into(),
            match_score: Some(0.5),
            reason_for_hold: "low score".into(),
            status: ReviewStatus::Pending,
            priority: 0,
            assigned_to: None,
            review_url: "http://x".into(),
            created_at: Utc::now() - chrono::Duration::hours(created_hours_ago),
            expires_at: None,
        }
    }

    #[test]
    fn stale_after_default_expiry() {
        let review = review(73);
        assert!(review.is_stale(Utc::now(), 72));
    }

    #[test]
    fn not_stale_before_expiry() {
        let review = review(10);
        assert!(!review.is_stale(Utc::now(), 72));
    }

    #[test]
    fn reviewed_entries_are_never_stale() {
        let mut review = review(100);
        review.status = ReviewStatus::Reviewed;
        assert!(!review.is_stale(Utc::now(), 72));
    }

    #[test]
    fn pending_order_sorts_priority_desc_then_created_at_asc() {
        let mut reviews = vec![review(1), review(2)];
        reviews[0].priority = 1;
        reviews[1].priority = 5;
        reviews.sort_by_key(pending_order_key);
        assert_eq!(reviews[0].priority, 5);
    }
}
