// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

/// Builds the review URL a HumanReview row links to. CHECKPOINT_HITL and the
/// Checkpoint Store both need this, hence the shared free function rather
/// than inlining it at each call site.
pub fn generate_review_url(frontend_base_url: &str, checkpoint_id: &str) -> String {
    format!("{}/review/{}", frontend_base_url.trim_end_matches('/'), checkpoint_id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn joins_base_and_checkpoint_id() {
        assert_eq!(
            generate_review_url("http://localhost:3000", "cp_wf_1_abcd1234"),
            "http://localhost:3000/review/cp_wf_1_abcd1234"
        );
    }

    #[test]
    fn trims_trailing_slash_on_base() {
        assert_eq!(
            generate_review_url("http://localhost:3000/", "cp_1"),
            "http://localhost:3000/review/cp_1"
        );
    }
}
