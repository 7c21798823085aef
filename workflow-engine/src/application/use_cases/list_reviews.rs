// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # List Reviews Use Case

use std::sync::Arc;

use anyhow::Result;
use workflow_domain::entities::HumanReview;
use workflow_domain::repositories::ReviewRepository;
use workflow_domain::value_objects::ReviewStatus;

pub struct ListReviewsUseCase {
    reviews: Arc<dyn ReviewRepository>,
}

impl ListReviewsUseCase {
    pub fn new(reviews: Arc<dyn ReviewRepository>) -> Self {
        Self { reviews }
    }

    /// Lists reviews in `status`, or every review when `status` is `None`,
    /// ordered priority descending then oldest first.
    pub async fn execute(&self, status: Option<ReviewStatus>) -> Result<Vec<HumanReview>> {
        let reviews = self.reviews.list(status).await?;
        if reviews.is_empty() {
            println!("No reviews found.");
        } else {
            println!("Found {} review(s):", reviews.len());
            for review in &reviews {
                println!(
                    "  {} | {} | {} {} | priority {} | {:?}",
                    review.checkpoint_id, review.vendor_name, review.amount, review.currency, review.priority, review.status
                );
            }
        }
        Ok(reviews)
    }
}
