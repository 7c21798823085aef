// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Process-wide, read-mostly registry of `ToolImpl`s keyed by capability.
//! Writes only happen at startup; safe for concurrent reads thereafter.

use std::collections::HashMap;
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::warn;
use workflow_domain::entities::{ToolImpl, ToolResult};
use workflow_domain::value_objects::Capability;

use super::mock_providers::{catalog, MockProvider};

struct Entry {
    name: String,
    tool: Arc<dyn ToolImpl>,
}

pub struct ToolRegistry {
    pools: RwLock<HashMap<Capability, Vec<Entry>>>,
    execution_counts: RwLock<HashMap<String, u64>>,
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::with_default_providers()
    }
}

impl ToolRegistry {
    pub fn new() -> Self {
        ToolRegistry { pools: RwLock::new(HashMap::new()), execution_counts: RwLock::new(HashMap::new()) }
    }

    /// Registers the eighteen example fixtures, three per capability.
    pub fn with_default_providers() -> Self {
        let registry = Self::new();
        for (name, capability, provider) in catalog() {
            registry.register(capability, Arc::new(MockProvider::new(name, capability, provider)));
        }
        registry
    }

    /// Duplicate registration replaces the existing entry for that name and
    /// logs a warning.
    pub fn register(&self, capability: Capability, tool: Arc<dyn ToolImpl>) {
        let name = tool.name().to_string();
        let mut pools = self.pools.write();
        let pool = pools.entry(capability).or_default();
        if let Some(existing) = pool.iter_mut().find(|e| e.name == name) {
            warn!(tool = %name, "duplicate tool registration, replacing existing entry");
            existing.tool = tool;
        } else {
            pool.push(Entry { name, tool });
        }
    }

    /// Names in the pool, in registration order -- the first entry is the
    /// "default tool" for disambiguation.
    pub fn pool(&self, capability: Capability) -> Vec<String> {
        self.pools.read().get(&capability).map(|p| p.iter().map(|e| e.name.clone()).collect()).unwrap_or_default()
    }

    pub fn contains(&self, capability: Capability, name: &str) -> bool {
        self.pool(capability).iter().any(|n| n == name)
    }

    fn find(&self, capability: Capability, name: &str) -> Option<Arc<dyn ToolImpl>> {
        self.pools.read().get(&capability)?.iter().find(|e| e.name == name).map(|e| e.tool.clone())
    }

    /// Executes `name`, measuring elapsed time and incrementing the
    /// execution counter regardless of outcome. Falls back to an error
    /// `ToolResult` if `name` is not registered for `capability`.
    pub async fn execute(&self, capability: Capability, name: &str, params: serde_json::Value) -> ToolResult {
        let Some(tool) = self.find(capability, name) else {
            return ToolResult::err(name, format!("tool '{name}' not registered for capability {capability}"), std::time::Duration::ZERO);
        };
        *self.execution_counts.write().entry(name.to_string()).or_insert(0) += 1;
        tool.execute(params).await
    }

    pub fn execution_count(&self, name: &str) -> u64 {
        self.execution_counts.read().get(name).copied().unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_providers_register_three_per_capability() {
        let registry = ToolRegistry::with_default_providers();
        for capability in Capability::all() {
            assert_eq!(registry.pool(capability).len(), 3, "{capability} should have 3 providers");
        }
    }

    #[tokio::test]
    async fn execute_increments_the_execution_counter() {
        let registry = ToolRegistry::with_default_providers();
        registry.execute(Capability::Ocr, "google_vision", serde_json::json!({})).await;
        assert_eq!(registry.execution_count("google_vision"), 1);
    }

    #[tokio::test]
    async fn execute_against_an_unregistered_tool_returns_an_error_result() {
        let registry = ToolRegistry::with_default_providers();
        let result = registry.execute(Capability::Ocr, "not_a_tool", serde_json::json!({})).await;
        assert!(!result.success);
    }
}
