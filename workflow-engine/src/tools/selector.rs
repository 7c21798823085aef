// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! `Select(capability, ctx) -> tool_name`: rule-based selection with an
//! optional LLM fallback, grounded on the original's `picker.py` rule table
//! (§4.2).

use std::sync::Arc;

use async_trait::async_trait;
use workflow_domain::value_objects::Capability;

use super::registry::ToolRegistry;
use super::selection_log::{SelectionLog, SelectionLogEntry, SelectionMethod};

/// A pluggable LLM fallback. The shipped implementation is a deterministic
/// stub -- a real provider integration is out of core scope (see Non-goals).
#[async_trait]
pub trait LlmFallback: Send + Sync {
    async fn suggest(&self, capability: Capability, available: &[String], ctx: &serde_json::Value) -> Option<String>;
}

pub struct Selector {
    registry: Arc<ToolRegistry>,
    llm_fallback: Option<Arc<dyn LlmFallback>>,
    log: SelectionLog,
}

impl Selector {
    pub fn new(registry: Arc<ToolRegistry>, llm_fallback: Option<Arc<dyn LlmFallback>>) -> Self {
        Selector { registry, llm_fallback, log: SelectionLog::new() }
    }

    pub fn selection_log(&self) -> &SelectionLog {
        &self.log
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    pub async fn select(&self, capability: Capability, ctx: &serde_json::Value) -> String {
        let available = self.registry.pool(capability);
        let context_keys = ctx.as_object().map(|m| m.keys().cloned().collect()).unwrap_or_default();

        if available.is_empty() {
            let selected = capability_default(capability).to_string();
            self.record(capability, &selected, &context_keys, &available, SelectionMethod::Default);
            return selected;
        }

        if let Some(candidate) = rule_based_candidate(capability, ctx) {
            if available.iter().any(|n| n == candidate) {
                self.record(capability, candidate, &context_keys, &available, SelectionMethod::RuleBased);
                return candidate.to_string();
            }
        }

        if let Some(llm) = &self.llm_fallback {
            if let Some(answer) = llm.suggest(capability, &available, ctx).await {
                if let Some(matched) = match_in_pool(&available, &answer) {
                    self.record(capability, &matched, &context_keys, &available, SelectionMethod::LlmFallback);
                    return matched;
                }
            }
        }

        let selected = capability_default(capability).to_string();
        self.record(capability, &selected, &context_keys, &available, SelectionMethod::Default);
        selected
    }

    fn record(&self, capability: Capability, selected: &str, context_keys: &[String], available: &[String], method: SelectionMethod) {
        self.log.record(SelectionLogEntry {
            timestamp: chrono::Utc::now(),
            capability,
            selected: selected.to_string(),
            context_keys: context_keys.to_vec(),
            available: available.to_vec(),
            method,
        });
    }
}

/// Full match first, then substring match, never an out-of-pool name.
fn match_in_pool(available: &[String], answer: &str) -> Option<String> {
    if let Some(exact) = available.iter().find(|n| n.as_str() == answer) {
        return Some(exact.clone());
    }
    available.iter().find(|n| n.as_str().contains(answer) || answer.contains(n.as_str())).cloned()
}

pub const fn capability_default(capability: Capability) -> &'static str {
    match capability {
        Capability::Ocr => "google_vision",
        Capability::Enrichment => "clearbit",
        Capability::ErpConnector => "mock_erp",
        Capability::Db => "sqlite",
        Capability::Email => "sendgrid",
        Capability::Storage => "local_fs",
    }
}

fn ctx_bool(ctx: &serde_json::Value, key: &str) -> bool {
    ctx.get(key).and_then(|v| v.as_bool()).unwrap_or(false)
}

fn ctx_str<'a>(ctx: &'a serde_json::Value, key: &str) -> &'a str {
    ctx.get(key).and_then(|v| v.as_str()).unwrap_or("")
}

fn rule_based_candidate(capability: Capability, ctx: &serde_json::Value) -> Option<&'static str> {
    match capability {
        Capability::Ocr => {
            if ctx_str(ctx, "quality") == "high" || ctx_bool(ctx, "has_tables") {
                Some("google_vision")
            } else if ctx.get("page_count").and_then(|v| v.as_i64()).map(|n| n > 5).unwrap_or(false) {
                Some("aws_textract")
            } else if ctx_str(ctx, "quality") == "low" || ctx_bool(ctx, "cost_sensitive") {
                Some("tesseract")
            } else if ctx_str(ctx, "document_type") == "invoice" {
                Some("google_vision")
            } else {
                None
            }
        }
        Capability::Enrichment => {
            if ctx_bool(ctx, "is_known_vendor") {
                Some("vendor_db")
            } else if matches!(ctx_str(ctx, "vendor_type"), "business" | "b2b" | "enterprise") {
                Some("clearbit")
            } else if matches!(ctx_str(ctx, "enrichment_type"), "contact" | "person" | "employee") {
                Some("people_data_labs")
            } else {
                Some("clearbit")
            }
        }
        Capability::ErpConnector => {
            let system = ctx_str(ctx, "erp_system");
            if system.contains("sap") {
                Some("sap_sandbox")
            } else if system.contains("netsuite") {
                Some("netsuite")
            } else if ctx_bool(ctx, "is_development") || ctx_bool(ctx, "use_mock") {
                Some("mock_erp")
            } else {
                None
            }
        }
        Capability::Db => {
            if ctx_str(ctx, "data_size") == "large" || ctx_bool(ctx, "is_production") {
                Some("postgres")
            } else if ctx_bool(ctx, "serverless") {
                Some("dynamodb")
            } else if ctx_bool(ctx, "is_development") {
                Some("sqlite")
            } else {
                None
            }
        }
        Capability::Email => {
            if ctx_str(ctx, "volume") == "high" || ctx_str(ctx, "email_type") == "transactional" {
                Some("sendgrid")
            } else if ctx_bool(ctx, "aws_environment") {
                Some("ses")
            } else if ctx_bool(ctx, "is_development") {
                Some("smtp")
            } else {
                None
            }
        }
        Capability::Storage => {
            if ctx_str(ctx, "size") == "large" || ctx_bool(ctx, "is_production") {
                Some("s3")
            } else if ctx_bool(ctx, "gcp_environment") {
                Some("gcs")
            } else if ctx_bool(ctx, "is_development") {
                Some("local_fs")
            } else {
                None
            }
        }
    }
}
