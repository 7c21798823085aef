//! # Workflow Domain
//!
//! The workflow domain represents the core business logic and rules of the
//! invoice-processing workflow engine. It implements Domain-Driven Design
//! (DDD) patterns and is completely independent of external concerns like
//! databases, file systems, or user interfaces.
//!
//! ## Domain-Driven Design Concepts
//!
//! ### Entities
//! Entities are objects that have a distinct identity that runs through time
//! and different representations. They can change state while maintaining
//! their identity.
//!
//! **Examples in this domain:**
//! - `Workflow`: the central aggregate, linking an invoice to its accumulated
//!   state
//! - `Checkpoint`: a durable snapshot of a workflow's state at suspension
//! - `HumanReview`: a queue entry for a paused workflow awaiting a decision
//! - `AuditLog`: an append-only domain event
//! - `Tool`/`ToolImpl`: a registry-owned capability provider
//!
//! ### Value Objects
//! Value objects are immutable objects that represent concepts without
//! identity; two value objects with the same attributes are equal.
//!
//! **Examples in this domain:**
//! - `StageId`: the twelve nodes of the fixed workflow DAG
//! - `Ability`: a named operation routed to the Internal or External backend
//! - `Capability`: a family of interchangeable tools
//! - `WorkflowStatus`, `MatchResult`, `ApprovalStatus`, `ReviewStatus`,
//!   `HumanDecision`, `ActorType`
//!
//! ### Domain Services
//! Domain services contain stateless business logic that doesn't naturally
//! fit within an entity or value object: vendor-name normalization, the
//! two-way match score curve, the auto-approval policy, and the review URL
//! builder.
//!
//! ### Repositories
//! Repositories provide an abstraction over data persistence, allowing the
//! domain to work with workflows, checkpoints, reviews, and audit entries
//! without knowing about storage details. `workflow-engine` supplies the
//! concrete adapters.
//!
//! ## Business Rules and Invariants
//!
//! - Each stage may only add fields or overwrite fields it is declared to
//!   own; earlier-stage outputs are append-only within a single workflow
//!   execution (see `state::WorkflowState::merge`).
//! - Exactly zero or one unresolved checkpoint exists per workflow.
//! - `match_score` is always in `[0, 1]` once MATCH_TWO_WAY has executed.
//!
//! ## Error Handling
//!
//! The domain uses `WorkflowError`, a `thiserror`-derived taxonomy covering
//! validation, stage, checkpoint, ability, tool, concurrency, and
//! infrastructure failures, each tagged `is_recoverable`/`category`.

pub mod entities;
pub mod error;
pub mod repositories;
pub mod services;
pub mod state;
pub mod value_objects;

pub use entities::{AuditLog, Checkpoint, HumanReview, Invoice, Tool, ToolImpl, ToolResult, Workflow};
pub use error::WorkflowError;
pub use state::WorkflowState;
pub use value_objects::{Ability, Backend, Capability, StageId, WorkflowStatus};
