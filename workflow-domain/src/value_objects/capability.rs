// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Tool capability families. Each stage that performs an external side
//! effect asks the selector for a concrete provider within one of these.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Ocr,
    Enrichment,
    ErpConnector,
    Db,
    Email,
    Storage,
}

impl Capability {
    pub const fn as_str(self) -> &'static str {
        match self {
            Capability::Ocr => "ocr",
            Capability::Enrichment => "enrichment",
            Capability::ErpConnector => "erp_connector",
            Capability::Db => "db",
            Capability::Email => "email",
            Capability::Storage => "storage",
        }
    }

    pub const fn all() -> [Capability; 6] {
        [
            Capability::Ocr,
            Capability::Enrichment,
            Capability::ErpConnector,
            Capability::Db,
            Capability::Email,
            Capability::Storage,
        ]
    }

    /// The tool name returned when no rule matches and no LLM fallback is
    /// configured (or the LLM's answer is rejected).
    pub const fn default_tool(self) -> &'static str {
        match self {
            Capability::Ocr => "google_vision",
            Capability::Enrichment => "clearbit",
            Capability::ErpConnector => "mock_erp",
            Capability::Db => "sqlite",
            Capability::Email => "sendgrid",
            Capability::Storage => "local_fs",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
