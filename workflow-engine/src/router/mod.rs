// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Ability Router (C1)
//!
//! Dispatches a named operation plus a parameter map to one of two backends
//! using the compile-time routing table in `workflow_domain::value_objects::Ability`.
//! Every call is appended to a queryable call log (see §9b).

mod call_log;
mod external_backend;
mod internal_backend;

pub use call_log::{AbilityCallLogEntry, CallLog};

use std::collections::HashMap;

use workflow_domain::value_objects::{Ability, Backend};

/// `Call(ability, params) -> result map`. Unknown ability names return
/// `{"error": "Unknown ability: <name>"}` without raising.
pub struct AbilityRouter {
    log: CallLog,
}

impl Default for AbilityRouter {
    fn default() -> Self {
        Self::new()
    }
}

impl AbilityRouter {
    pub fn new() -> Self {
        AbilityRouter { log: CallLog::new() }
    }

    #[tracing::instrument(skip(self, params), fields(ability = %ability))]
    pub async fn call(&self, ability: &str, params: serde_json::Value) -> serde_json::Value {
        let Some(known) = Ability::from_str(ability) else {
            return serde_json::json!({ "error": format!("Unknown ability: {ability}") });
        };

        let backend = known.backend();
        let result = match backend {
            Backend::Internal => internal_backend::dispatch(known, &params),
            Backend::External => external_backend::dispatch(known, &params).await,
        };

        self.log.record(known, backend, &params);
        tracing::debug!(?backend, "ability call completed");
        result
    }

    pub fn call_log(&self) -> &CallLog {
        &self.log
    }
}

pub(crate) fn params_keys(params: &serde_json::Value) -> Vec<String> {
    match params.as_object() {
        Some(map) => map.keys().cloned().collect(),
        None => Vec::new(),
    }
}

pub(crate) fn param_str<'a>(params: &'a serde_json::Value, key: &str) -> Option<&'a str> {
    params.get(key).and_then(|v| v.as_str())
}

#[allow(dead_code)]
pub(crate) type Params = HashMap<String, serde_json::Value>;

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn unknown_ability_returns_an_error_map_without_panicking() {
        let router = AbilityRouter::new();
        let result = router.call("not_a_real_ability", serde_json::json!({})).await;
        assert_eq!(result["error"], "Unknown ability: not_a_real_ability");
    }

    #[tokio::test]
    async fn validate_schema_is_routed_to_internal() {
        let router = AbilityRouter::new();
        let result = router
            .call("validate_schema", serde_json::json!({"invoice_id": "INV-1", "vendor_name": "Acme", "amount": 10.0}))
            .await;
        assert_eq!(result["valid"], true);
        assert_eq!(router.call_log().recent(1)[0].backend, Backend::Internal);
    }

    #[tokio::test]
    async fn ocr_extract_is_routed_to_external() {
        let router = AbilityRouter::new();
        router.call("ocr_extract", serde_json::json!({"attachments": [], "provider": "google_vision"})).await;
        assert_eq!(router.call_log().recent(1)[0].backend, Backend::External);
    }
}
