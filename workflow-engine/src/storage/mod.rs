// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Checkpoint & Review Store (C5)
//!
//! Two adapters behind the four repository ports declared in
//! `workflow_domain::repositories`: an in-memory one for tests and local
//! runs, and a `sqlx`/SQLite one for anything durable. Both enforce the
//! same invariant -- at most one unresolved checkpoint per workflow.

pub mod in_memory;
pub mod sqlite;
