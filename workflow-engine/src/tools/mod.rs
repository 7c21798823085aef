// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Tool Registry & Selector (C2)
//!
//! The registry owns per-capability pools of `ToolImpl`; the selector picks
//! a concrete tool name from a pool via rules, with an optional LLM
//! fallback, and never returns an out-of-pool name.

mod mock_providers;
mod registry;
mod selection_log;
mod selector;

pub use registry::ToolRegistry;
pub use selection_log::{SelectionLogEntry, SelectionLog, SelectionMethod};
pub use selector::Selector;
