// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Engine-wide settings: the match/approval thresholds, review expiry,
//! environment tag, and ambient operational knobs (log format, ability-call
//! timeout, sqlite path).

mod workflow_settings;

pub use workflow_settings::{Environment, LogFormat, WorkflowSettings, WorkflowSettingsBuilder};
