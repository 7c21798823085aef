// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # CLI Parser
//!
//! Command-line interface parsing using clap.
//!
//! This module defines the CLI structure and handles argument parsing.
//! Security validation happens in the validator module after parsing.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Main CLI structure
#[derive(Parser, Debug, Clone)]
#[command(name = "workflow-engine")]
#[command(about = concat!("Invoice Workflow Engine v", env!("CARGO_PKG_VERSION")))]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    /// workflow.toml path (falls back to the documented defaults if absent)
    #[arg(short, long)]
    pub config: Option<PathBuf>,
}

/// CLI subcommands
#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Submit an invoice JSON payload and run it through the workflow
    Submit {
        /// Path to an invoice JSON payload
        invoice_file: PathBuf,
    },

    /// Show a workflow's current status
    Status {
        /// Workflow id (wf_<invoice_id>_<ulid>)
        workflow_id: String,
    },

    /// List entries in the human review queue
    ListReviews {
        /// Filter by status: pending, reviewed, expired
        #[arg(long)]
        status: Option<String>,
    },

    /// Record a reviewer's decision on a paused checkpoint
    Decide {
        /// Checkpoint id (cp_<workflow_id>_<ulid>)
        checkpoint_id: String,

        /// accept or reject
        decision: String,

        /// Reviewer identity
        #[arg(long)]
        reviewer: String,

        /// Free-text reviewer notes
        #[arg(long)]
        notes: Option<String>,
    },

    /// Re-enter a paused workflow at HITL_DECISION after a decision was recorded
    Resume {
        /// Workflow id to resume
        workflow_id: String,
    },

    /// Expire PENDING reviews older than the configured threshold
    ExpireReviews {
        /// Expiry threshold in hours
        #[arg(long, default_value = "72")]
        hours: i64,
    },
}

/// Parse CLI arguments
///
/// This is the entry point for CLI parsing. It uses clap to parse
/// arguments and returns the parsed CLI structure.
///
/// # Returns
///
/// Parsed `Cli` structure with all arguments
///
/// # Panics
///
/// Clap will exit the process with appropriate error message if parsing fails
pub fn parse_cli() -> Cli {
    Cli::parse()
}
