// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Use cases: thin orchestration over the Graph Runtime and the Checkpoint &
//! Review Store, one per CLI command.

pub mod decide;
pub mod expire_reviews;
pub mod list_reviews;
pub mod resume;
pub mod status;
pub mod submit;

pub use decide::DecideReviewUseCase;
pub use expire_reviews::ExpireReviewsUseCase;
pub use list_reviews::ListReviewsUseCase;
pub use resume::ResumeWorkflowUseCase;
pub use status::WorkflowStatusUseCase;
pub use submit::SubmitInvoiceUseCase;
