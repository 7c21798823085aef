// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////


//! # Application Layer
//!
//! Orchestrates the Graph Runtime and the Checkpoint & Review Store for each
//! CLI command, translating domain errors into `anyhow::Error` at the
//! boundary. One use case per command: `submit`, `resume`, `decide`,
//! `list-reviews`, `expire-reviews`, `status`.

pub mod use_cases;

pub use use_cases::{
    DecideReviewUseCase, ExpireReviewsUseCase, ListReviewsUseCase, ResumeWorkflowUseCase, SubmitInvoiceUseCase,
    WorkflowStatusUseCase,
};
