// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Domain Error System
//!
//! A hierarchical error system for the invoice workflow domain. Errors are
//! categorized so that the Graph Runtime can decide, mechanically, whether a
//! failure transitions a workflow to `FAILED`, is recoverable, or belongs to
//! the discrete checkpoint-resolution error kinds the Review Service needs.
//!
//! ## Error Categories
//!
//! - **Validation**: malformed invoice payloads, rejected at the boundary.
//! - **Stage**: failure inside a stage function, including wrapped ability
//!   failures that the stage chose to treat as fatal.
//! - **Checkpoint**: `NotFound` / `AlreadyResolved`, surfaced to the Review
//!   Service and never auto-retried.
//! - **Tool / Ability**: provider or router-level failures.
//! - **Concurrency**: unique-constraint violations (second unresolved
//!   checkpoint on a workflow).
//! - **Infrastructure**: I/O, database, serialization.

use thiserror::Error;

/// Domain-specific errors for the invoice workflow engine.
#[derive(Error, Debug, Clone)]
pub enum WorkflowError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Stage '{stage}' failed: {message}")]
    StageFailed { stage: String, message: String },

    #[error("Stage '{stage}' attempted to overwrite output it does not own")]
    StageOutputOverwrite { stage: String },

    #[error("Checkpoint not found: {0}")]
    CheckpointNotFound(String),

    #[error("Checkpoint already resolved: {0}")]
    AlreadyResolved(String),

    #[error("Ability error ({ability}): {message}")]
    AbilityFailed { ability: String, message: String },

    #[error("Tool error ({tool}): {message}")]
    ToolFailed { tool: String, message: String },

    #[error("Concurrency violation: {0}")]
    Concurrency(String),

    #[error("Workflow not found: {0}")]
    WorkflowNotFound(String),

    #[error("Invalid state transition: {0}")]
    InvalidTransition(String),

    #[error("IO error: {0}")]
    Io(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl WorkflowError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn stage_failed(stage: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::StageFailed {
            stage: stage.into(),
            message: msg.into(),
        }
    }

    pub fn stage_output_overwrite(stage: impl Into<String>) -> Self {
        Self::StageOutputOverwrite { stage: stage.into() }
    }

    pub fn checkpoint_not_found(id: impl Into<String>) -> Self {
        Self::CheckpointNotFound(id.into())
    }

    pub fn already_resolved(id: impl Into<String>) -> Self {
        Self::AlreadyResolved(id.into())
    }

    pub fn ability_failed(ability: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::AbilityFailed {
            ability: ability.into(),
            message: msg.into(),
        }
    }

    pub fn tool_failed(tool: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::ToolFailed {
            tool: tool.into(),
            message: msg.into(),
        }
    }

    pub fn concurrency(msg: impl Into<String>) -> Self {
        Self::Concurrency(msg.into())
    }

    pub fn workflow_not_found(id: impl Into<String>) -> Self {
        Self::WorkflowNotFound(id.into())
    }

    pub fn invalid_transition(msg: impl Into<String>) -> Self {
        Self::InvalidTransition(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }

    /// Whether a caller may reasonably retry the operation that produced this
    /// error without changing any input.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, WorkflowError::Io(_) | WorkflowError::Database(_))
    }

    pub fn category(&self) -> &'static str {
        match self {
            WorkflowError::Validation(_) => "validation",
            WorkflowError::StageFailed { .. } => "stage",
            WorkflowError::StageOutputOverwrite { .. } => "stage",
            WorkflowError::CheckpointNotFound(_) => "checkpoint",
            WorkflowError::AlreadyResolved(_) => "checkpoint",
            WorkflowError::AbilityFailed { .. } => "ability",
            WorkflowError::ToolFailed { .. } => "tool",
            WorkflowError::Concurrency(_) => "concurrency",
            WorkflowError::WorkflowNotFound(_) => "workflow",
            WorkflowError::InvalidTransition(_) => "workflow",
            WorkflowError::Io(_) => "io",
            WorkflowError::Database(_) => "database",
            WorkflowError::Serialization(_) => "serialization",
            WorkflowError::Internal(_) => "internal",
        }
    }
}

impl From<std::io::Error> for WorkflowError {
    fn from(err: std::io::Error) -> Self {
        WorkflowError::Io(err.to_string())
    }
}

impl From<serde_json::Error> for WorkflowError {
    fn from(err: serde_json::Error) -> Self {
        WorkflowError::Serialization(err.to_string())
    }
}

// Note: sqlx::Error conversion lives in workflow-engine's infrastructure
// layer, not here -- the storage technology is an infrastructure concern.

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checkpoint_errors_are_not_recoverable() {
        let err = WorkflowError::CheckpointNotFound("cp_123".into());
        assert!(!err.is_recoverable());
        assert_eq!(err.category(), "checkpoint");
    }

    #[test]
    fn io_errors_are_recoverable() {
        let err = WorkflowError::Io("disk full".into());
        assert!(err.is_recoverable());
    }

    #[test]
    fn constructors_match_variants() {
        let err = WorkflowError::stage_failed("POSTING", "down");
        match err {
            WorkflowError::StageFailed { stage, message } => {
                assert_eq!(stage, "POSTING");
                assert_eq!(message, "down");
            }
            _ => panic!("wrong variant"),
        }
    }
}
