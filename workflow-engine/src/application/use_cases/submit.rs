// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Submit Invoice Use Case

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use crate::runtime::{GraphRuntime, RunOutcome};

pub struct SubmitInvoiceUseCase {
    runtime: Arc<GraphRuntime>,
}

impl SubmitInvoiceUseCase {
    pub fn new(runtime: Arc<GraphRuntime>) -> Self {
        Self { runtime }
    }

    /// Starts a new workflow for `invoice_id` and runs it until it completes
    /// or pauses for human review. Returns the workflow id and where it
    /// stopped.
    pub async fn execute(&self, invoice_id: &str, raw_payload: serde_json::Value) -> Result<(String, RunOutcome)> {
        info!(invoice_id, "submitting invoice");
        let (workflow_id, outcome) = self.runtime.submit(invoice_id, raw_payload).await?;
        match &outcome {
            RunOutcome::Completed => println!("Workflow {workflow_id} completed."),
            RunOutcome::ManualHandoff => println!("Workflow {workflow_id} ended in manual handoff."),
            RunOutcome::AwaitingReview { checkpoint_id } => {
                println!("Workflow {workflow_id} is awaiting review at checkpoint {checkpoint_id}.")
            }
        }
        Ok((workflow_id, outcome))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorkflowSettings;
    use crate::router::AbilityRouter;
    use crate::stages::StageContext;
    use crate::storage::in_memory::{InMemoryAuditLogRepository, InMemoryCheckpointRepository, InMemoryReviewRepository, InMemoryWorkflowRepository};
    use crate::tools::{Selector, ToolRegistry};

    fn use_case() -> SubmitInvoiceUseCase {
        let runtime = GraphRuntime::new(
            StageContext {
                router: Arc::new(AbilityRouter::new()),
                selector: Arc::new(Selector::new(Arc::new(ToolRegistry::with_default_providers()), None)),
                settings: Arc::new(WorkflowSettings::default()),
            },
            Arc::new(InMemoryWorkflowRepository::new()),
            Arc::new(InMemoryCheckpointRepository::new()),
            Arc::new(InMemoryReviewRepository::new()),
            Arc::new(InMemoryAuditLogRepository::new()),
        );
        SubmitInvoiceUseCase::new(Arc::new(runtime))
    }

    #[tokio::test]
    async fn submitting_a_matching_invoice_completes() {
        let uc = use_case();
        let (_id, outcome) =
            uc.execute("INV-1", serde_json::json!({"invoice_id": "INV-1", "vendor_name": "Acme", "amount": 10000.0})).await.unwrap();
        assert_eq!(outcome, RunOutcome::Completed);
    }
}
