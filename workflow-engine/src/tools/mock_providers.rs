// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! Mock tool fixtures, one per registered provider. These are example
//! fixtures standing in for real integrations (google_vision, sap_sandbox,
//! sendgrid, ...); the core's contract is the response shape, not these
//! values (see the design note on mock providers).

use std::time::Instant;

use async_trait::async_trait;
use workflow_domain::entities::{ToolImpl, ToolResult};
use workflow_domain::value_objects::Capability;

pub struct MockProvider {
    name: &'static str,
    capability: Capability,
    provider: &'static str,
}

impl MockProvider {
    pub fn new(name: &'static str, capability: Capability, provider: &'static str) -> Self {
        MockProvider { name, capability, provider }
    }
}

#[async_trait]
impl ToolImpl for MockProvider {
    fn name(&self) -> &str {
        self.name
    }

    fn capability(&self) -> Capability {
        self.capability
    }

    fn provider(&self) -> &str {
        self.provider
    }

    fn description(&self) -> &str {
        "example fixture standing in for a real integration"
    }

    fn version(&self) -> &str {
        "1.0.0"
    }

    fn is_mock(&self) -> bool {
        true
    }

    async fn execute(&self, params: serde_json::Value) -> ToolResult {
        let started = Instant::now();
        let data = serde_json::json!({ "provider": self.provider, "capability": self.capability, "echo": params });
        ToolResult::ok(self.name, data, started.elapsed())
    }
}

/// The eighteen `(name, capability, provider)` fixtures from the registry's
/// initialization table.
pub fn catalog() -> Vec<(&'static str, Capability, &'static str)> {
    vec![
        ("google_vision", Capability::Ocr, "google"),
        ("tesseract", Capability::Ocr, "oss"),
        ("aws_textract", Capability::Ocr, "aws"),
        ("clearbit", Capability::Enrichment, "clearbit"),
        ("people_data_labs", Capability::Enrichment, "pdl"),
        ("vendor_db", Capability::Enrichment, "internal"),
        ("sap_sandbox", Capability::ErpConnector, "sap"),
        ("netsuite", Capability::ErpConnector, "netsuite"),
        ("mock_erp", Capability::ErpConnector, "internal"),
        ("postgres", Capability::Db, "postgres"),
        ("sqlite", Capability::Db, "sqlite"),
        ("dynamodb", Capability::Db, "aws"),
        ("sendgrid", Capability::Email, "sendgrid"),
        ("ses", Capability::Email, "aws"),
        ("smtp", Capability::Email, "internal"),
        ("s3", Capability::Storage, "aws"),
        ("gcs", Capability::Storage, "gcp"),
        ("local_fs", Capability::Storage, "internal"),
    ]
}
