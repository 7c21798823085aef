// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Tool
//!
//! `ToolImpl` is the port the Tool Registry depends on; concrete providers
//! (the mock fixtures shipped with `workflow-engine`) implement it. This
//! mirrors the teacher workspace's pattern of domain-owned, infrastructure-
//! implemented async traits (e.g. `FileIOService`): the trait lives here
//! because it is a first-class domain concept, the I/O behind it does not.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::value_objects::Capability;

/// The outcome of a single `ToolImpl::execute` call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolResult {
    pub success: bool,
    pub data: serde_json::Value,
    pub tool_name: String,
    pub execution_time_ms: u64,
    pub error: Option<String>,
    pub metadata: serde_json::Value,
}

impl ToolResult {
    pub fn ok(tool_name: impl Into<String>, data: serde_json::Value, elapsed: Duration) -> Self {
        ToolResult {
            success: true,
            data,
            tool_name: tool_name.into(),
            execution_time_ms: elapsed.as_millis() as u64,
            error: None,
            metadata: serde_json::json!({}),
        }
    }

    pub fn err(tool_name: impl Into<String>, error: impl Into<String>, elapsed: Duration) -> Self {
        ToolResult {
            success: false,
            data: serde_json::json!({}),
            tool_name: tool_name.into(),
            execution_time_ms: elapsed.as_millis() as u64,
            error: Some(error.into()),
            metadata: serde_json::json!({}),
        }
    }
}

/// A concrete provider behind a capability. Implementations are process-wide
/// singletons created at startup and never mutated thereafter.
#[async_trait]
pub trait ToolImpl: Send + Sync {
    fn name(&self) -> &str;
    fn capability(&self) -> Capability;
    fn provider(&self) -> &str;
    fn description(&self) -> &str;
    fn version(&self) -> &str;
    fn is_mock(&self) -> bool;

    /// Executes the provider against `params`. Implementations should not
    /// panic; fold failures into `ToolResult.error` instead -- the registry
    /// measures elapsed time and increments the execution counter around
    /// this call regardless of outcome.
    async fn execute(&self, params: serde_json::Value) -> ToolResult;
}

/// A registry entry: everything about a tool except its running execution
/// counter, which the registry tracks alongside the `ToolImpl` itself.
pub struct Tool {
    pub name: String,
    pub capability: Capability,
    pub provider: String,
    pub description: String,
    pub version: String,
    pub is_mock: bool,
    pub config: serde_json::Value,
    pub implementation: Box<dyn ToolImpl>,
}

impl Tool {
    pub fn new(implementation: Box<dyn ToolImpl>, config: serde_json::Value) -> Self {
        Tool {
            name: implementation.name().to_string(),
            capability: implementation.capability(),
            provider: implementation.provider().to_string(),
            description: implementation.description().to_string(),
            version: implementation.version().to_string(),
            is_mock: implementation.is_mock(),
            config,
            implementation,
        }
    }
}
