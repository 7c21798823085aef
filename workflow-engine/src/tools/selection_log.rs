// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use workflow_domain::value_objects::Capability;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMethod {
    RuleBased,
    LlmFallback,
    Default,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionLogEntry {
    pub timestamp: DateTime<Utc>,
    pub capability: Capability,
    pub selected: String,
    pub context_keys: Vec<String>,
    pub available: Vec<String>,
    pub method: SelectionMethod,
}

/// Every `Select` call appends an entry here, separately exposed for audit
/// (see C2's selection log and the queryable-collection requirement in §9b).
pub struct SelectionLog {
    entries: RwLock<Vec<SelectionLogEntry>>,
}

impl Default for SelectionLog {
    fn default() -> Self {
        Self::new()
    }
}

impl SelectionLog {
    pub fn new() -> Self {
        SelectionLog { entries: RwLock::new(Vec::new()) }
    }

    pub(crate) fn record(&self, entry: SelectionLogEntry) {
        self.entries.write().push(entry);
    }

    pub fn recent(&self, n: usize) -> Vec<SelectionLogEntry> {
        self.entries.read().iter().rev().take(n).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
