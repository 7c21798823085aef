// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Workflow Settings
//!
//! Immutable configuration loaded once at startup, modeled on the teacher's
//! `ObservabilityConfig`/`ConfigService` pair: loadable from `workflow.toml`,
//! overridable by `WORKFLOW_*` environment variables, falling back to the
//! documented defaults when neither is present.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use workflow_domain::WorkflowError;

/// Influences selector rules (`is_development` / `is_production`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

impl Default for Environment {
    fn default() -> Self {
        Environment::Development
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Default for LogFormat {
    fn default() -> Self {
        LogFormat::Pretty
    }
}

/// Validated, immutable engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowSettings {
    pub match_threshold: f64,
    pub two_way_tolerance_pct: f64,
    pub auto_approve_threshold: rust_decimal::Decimal,
    pub review_expiry_hours: i64,
    pub env: Environment,
    pub frontend_base_url: String,
    pub llm_fallback_key: Option<String>,

    pub log_format: LogFormat,
    pub ability_call_timeout_secs: u64,
    pub sqlite_database_path: PathBuf,
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        WorkflowSettings {
            match_threshold: 0.90,
            two_way_tolerance_pct: 5.0,
            auto_approve_threshold: rust_decimal::Decimal::new(1_000_000, 2),
            review_expiry_hours: 72,
            env: Environment::Development,
            frontend_base_url: "http://localhost:3000".to_string(),
            llm_fallback_key: None,
            log_format: LogFormat::Pretty,
            ability_call_timeout_secs: 30,
            sqlite_database_path: PathBuf::from("workflow.sqlite"),
        }
    }
}

impl WorkflowSettings {
    pub fn builder() -> WorkflowSettingsBuilder {
        WorkflowSettingsBuilder::default()
    }

    pub fn is_production(&self) -> bool {
        self.env == Environment::Production
    }

    pub fn is_development(&self) -> bool {
        self.env == Environment::Development
    }

    /// Loads from `path`, falling back to defaults if the file is absent.
    pub async fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, WorkflowError> {
        let path = path.as_ref();
        if !path.exists() {
            warn!("workflow.toml not found at {:?}, using defaults", path);
            return Ok(Self::default().with_env_overrides());
        }

        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| WorkflowError::internal(format!("failed to read {:?}: {e}", path)))?;
        let settings: WorkflowSettings = toml::from_str(&content)
            .map_err(|e| WorkflowError::internal(format!("failed to parse {:?}: {e}", path)))?;
        debug!("loaded workflow settings from {:?}", path);
        Ok(settings.with_env_overrides())
    }

    /// Walks up to three parent directories looking for `workflow.toml`,
    /// exactly as the teacher's observability config loader does.
    pub async fn load_default() -> Result<Self, WorkflowError> {
        let mut current_dir = std::env::current_dir()
            .map_err(|e| WorkflowError::internal(format!("failed to get current directory: {e}")))?;

        for _ in 0..4 {
            let candidate = current_dir.join("workflow.toml");
            if candidate.exists() {
                debug!("found workflow config at {:?}", candidate);
                return Self::load_from(candidate).await;
            }
            match current_dir.parent() {
                Some(parent) => current_dir = parent.to_path_buf(),
                None => break,
            }
        }

        warn!("no workflow.toml found, using default configuration");
        Ok(Self::default().with_env_overrides())
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("WORKFLOW_MATCH_THRESHOLD") {
            if let Ok(v) = v.parse() {
                self.match_threshold = v;
            }
        }
        if let Ok(v) = std::env::var("WORKFLOW_TWO_WAY_TOLERANCE_PCT") {
            if let Ok(v) = v.parse() {
                self.two_way_tolerance_pct = v;
            }
        }
        if let Ok(v) = std::env::var("WORKFLOW_REVIEW_EXPIRY_HOURS") {
            if let Ok(v) = v.parse() {
                self.review_expiry_hours = v;
            }
        }
        if let Ok(v) = std::env::var("WORKFLOW_ENV") {
            self.env = if v.eq_ignore_ascii_case("production") {
                Environment::Production
            } else {
                Environment::Development
            };
        }
        if let Ok(v) = std::env::var("WORKFLOW_FRONTEND_BASE_URL") {
            self.frontend_base_url = v;
        }
        if let Ok(v) = std::env::var("WORKFLOW_LLM_FALLBACK_KEY") {
            self.llm_fallback_key = Some(v);
        }
        self
    }
}

#[derive(Debug, Default)]
pub struct WorkflowSettingsBuilder {
    inner: Option<WorkflowSettings>,
}

impl WorkflowSettingsBuilder {
    fn inner_mut(&mut self) -> &mut WorkflowSettings {
        self.inner.get_or_insert_with(WorkflowSettings::default)
    }

    pub fn match_threshold(mut self, v: f64) -> Self {
        self.inner_mut().match_threshold = v;
        self
    }

    pub fn two_way_tolerance_pct(mut self, v: f64) -> Self {
        self.inner_mut().two_way_tolerance_pct = v;
        self
    }

    pub fn auto_approve_threshold(mut self, v: rust_decimal::Decimal) -> Self {
        self.inner_mut().auto_approve_threshold = v;
        self
    }

    pub fn review_expiry_hours(mut self, v: i64) -> Self {
        self.inner_mut().review_expiry_hours = v;
        self
    }

    pub fn env(mut self, v: Environment) -> Self {
        self.inner_mut().env = v;
        self
    }

    pub fn frontend_base_url(mut self, v: impl Into<String>) -> Self {
        self.inner_mut().frontend_base_url = v.into();
        self
    }

    pub fn llm_fallback_key(mut self, v: impl Into<String>) -> Self {
        self.inner_mut().llm_fallback_key = Some(v.into());
        self
    }

    pub fn sqlite_database_path(mut self, v: impl Into<PathBuf>) -> Self {
        self.inner_mut().sqlite_database_path = v.into();
        self
    }

    pub fn build(self) -> WorkflowSettings {
        self.inner.unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_the_documented_table() {
        let settings = WorkflowSettings::default();
        assert_eq!(settings.match_threshold, 0.90);
        assert_eq!(settings.two_way_tolerance_pct, 5.0);
        assert_eq!(settings.review_expiry_hours, 72);
        assert!(settings.is_development());
    }

    #[test]
    fn builder_overrides_defaults() {
        let settings = WorkflowSettings::builder().match_threshold(0.75).env(Environment::Production).build();
        assert_eq!(settings.match_threshold, 0.75);
        assert!(settings.is_production());
    }
}
