// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Invoice Workflow Engine
//!
//! The application and infrastructure layer for the invoice processing
//! engine, built on the pure domain types in `workflow_domain`:
//!
//! - `config` -- engine-wide settings (C0)
//! - `router` -- the Ability Router dispatching to internal/external
//!   backends (C1)
//! - `tools` -- the Tool Registry & capability selector (C2)
//! - `stages` -- the twelve stage functions (C3)
//! - `runtime` -- the Graph Runtime driving the DAG (C4)
//! - `storage` -- the Checkpoint & Review Store, in-memory and SQLite (C5)
//! - `application` -- use cases orchestrating the above for the CLI

pub mod application;
pub mod config;
pub mod router;
pub mod runtime;
pub mod stages;
pub mod storage;
pub mod tools;
