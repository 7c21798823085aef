// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! The router's call log is exposed for audit inspection, not as the
//! authoritative record -- the `AuditLog` entity is. It is a queryable
//! collection (`recent`, `calls_for_ability`), mirroring the original's MCP
//! call log, not merely "exposed" abstractly (see §9b).

use chrono::{DateTime, Utc};
use parking_lot::RwLock;

use workflow_domain::value_objects::{Ability, Backend};

use super::params_keys;

#[derive(Debug, Clone)]
pub struct AbilityCallLogEntry {
    pub ability: Ability,
    pub backend: Backend,
    pub timestamp: DateTime<Utc>,
    pub params_keys: Vec<String>,
}

pub struct CallLog {
    entries: RwLock<Vec<AbilityCallLogEntry>>,
}

impl Default for CallLog {
    fn default() -> Self {
        Self::new()
    }
}

impl CallLog {
    pub fn new() -> Self {
        CallLog { entries: RwLock::new(Vec::new()) }
    }

    pub(crate) fn record(&self, ability: Ability, backend: Backend, params: &serde_json::Value) {
        self.entries.write().push(AbilityCallLogEntry {
            ability,
            backend,
            timestamp: Utc::now(),
            params_keys: params_keys(params),
        });
    }

    pub fn recent(&self, n: usize) -> Vec<AbilityCallLogEntry> {
        let entries = self.entries.read();
        entries.iter().rev().take(n).cloned().collect()
    }

    pub fn calls_for_ability(&self, name: &str) -> Vec<AbilityCallLogEntry> {
        self.entries.read().iter().filter(|e| e.ability.as_str() == name).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recent_returns_latest_first() {
        let log = CallLog::new();
        log.record(Ability::ValidateSchema, Backend::Internal, &serde_json::json!({}));
        log.record(Ability::OcrExtract, Backend::External, &serde_json::json!({}));
        let recent = log.recent(1);
        assert_eq!(recent[0].ability, Ability::OcrExtract);
    }

    #[test]
    fn calls_for_ability_filters_by_name() {
        let log = CallLog::new();
        log.record(Ability::ValidateSchema, Backend::Internal, &serde_json::json!({}));
        log.record(Ability::OcrExtract, Backend::External, &serde_json::json!({}));
        log.record(Ability::ValidateSchema, Backend::Internal, &serde_json::json!({}));
        assert_eq!(log.calls_for_ability("validate_schema").len(), 2);
    }
}
