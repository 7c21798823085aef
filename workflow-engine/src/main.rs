// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # Invoice Workflow Engine CLI
//!
//! Entry point wiring the composition root (settings, router, selector,
//! storage) into the six commands the Review Service and invoice submitters
//! use: `submit`, `status`, `list-reviews`, `decide`, `resume`,
//! `expire-reviews`.

use std::sync::Arc;

use anyhow::Result;
use tracing_subscriber::EnvFilter;
use workflow_bootstrap::cli::{parse_cli, Commands};
use workflow_bootstrap::exit_code::ExitCode;
use workflow_domain::repositories::{AuditLogRepository, CheckpointRepository, ReviewRepository, WorkflowRepository};
use workflow_domain::value_objects::{HumanDecision, ReviewStatus};

use workflow_engine::application::{
    DecideReviewUseCase, ExpireReviewsUseCase, ListReviewsUseCase, ResumeWorkflowUseCase, SubmitInvoiceUseCase,
    WorkflowStatusUseCase,
};
use workflow_engine::config::WorkflowSettings;
use workflow_engine::router::AbilityRouter;
use workflow_engine::runtime::GraphRuntime;
use workflow_engine::stages::StageContext;
use workflow_engine::storage::sqlite::SqliteStore;
use workflow_engine::tools::{Selector, ToolRegistry};

async fn build_runtime(settings: Arc<WorkflowSettings>) -> Result<GraphRuntime> {
    let store = Arc::new(SqliteStore::new(&settings.sqlite_database_path.to_string_lossy()).await?);
    let stage_ctx = StageContext {
        router: Arc::new(AbilityRouter::new()),
        selector: Arc::new(Selector::new(Arc::new(ToolRegistry::with_default_providers()), settings.llm_fallback_key.clone())),
        settings: settings.clone(),
    };
    Ok(GraphRuntime::new(
        stage_ctx,
        store.clone() as Arc<dyn WorkflowRepository>,
        store.clone() as Arc<dyn CheckpointRepository>,
        store.clone() as Arc<dyn ReviewRepository>,
        store as Arc<dyn AuditLogRepository>,
    ))
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

fn parse_decision(raw: &str) -> Result<HumanDecision> {
    match raw.to_ascii_uppercase().as_str() {
        "ACCEPT" => Ok(HumanDecision::Accept),
        "REJECT" => Ok(HumanDecision::Reject),
        other => Err(anyhow::anyhow!("invalid decision '{other}', expected accept or reject")),
    }
}

fn parse_review_status(raw: &str) -> Result<ReviewStatus> {
    match raw.to_ascii_uppercase().as_str() {
        "PENDING" => Ok(ReviewStatus::Pending),
        "REVIEWED" => Ok(ReviewStatus::Reviewed),
        "EXPIRED" => Ok(ReviewStatus::Expired),
        other => Err(anyhow::anyhow!("invalid status '{other}', expected pending, reviewed, or expired")),
    }
}

async fn run() -> Result<()> {
    let cli = parse_cli();
    init_tracing(cli.verbose);

    let settings = Arc::new(match cli.config {
        Some(path) => WorkflowSettings::load_from(path).await?,
        None => WorkflowSettings::load_default().await?,
    });
    let runtime = Arc::new(build_runtime(settings).await?);

    match cli.command {
        Commands::Submit { invoice_file } => {
            let raw = tokio::fs::read_to_string(&invoice_file).await?;
            let payload: serde_json::Value = serde_json::from_str(&raw)?;
            let invoice_id = payload
                .get("invoice_id")
                .and_then(|v| v.as_str())
                .ok_or_else(|| anyhow::anyhow!("invoice payload is missing `invoice_id`"))?
                .to_string();
            SubmitInvoiceUseCase::new(runtime).execute(&invoice_id, payload).await?;
        }
        Commands::Status { workflow_id } => {
            WorkflowStatusUseCase::new(runtime.workflows.clone()).execute(&workflow_id).await?;
        }
        Commands::ListReviews { status } => {
            let status = status.map(|s| parse_review_status(&s)).transpose()?;
            ListReviewsUseCase::new(runtime.reviews.clone()).execute(status).await?;
        }
        Commands::Decide { checkpoint_id, decision, reviewer, notes } => {
            let decision = parse_decision(&decision)?;
            DecideReviewUseCase::new(runtime).execute(&checkpoint_id, decision, &reviewer, notes).await?;
        }
        Commands::Resume { workflow_id } => {
            ResumeWorkflowUseCase::new(runtime).execute(&workflow_id).await?;
        }
        Commands::ExpireReviews { hours } => {
            ExpireReviewsUseCase::new(runtime.reviews.clone(), runtime.checkpoints.clone(), runtime.workflows.clone())
                .execute(hours)
                .await?;
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(()) => std::process::exit(ExitCode::Success.as_i32()),
        Err(err) => {
            eprintln!("error: {err:#}");
            std::process::exit(ExitCode::from_error(err.as_ref()).as_i32());
        }
    }
}
