// /////////////////////////////////////////////////////////////////////////////
// Optimized Adaptive Pipeline RS
// Copyright (c) 2025 Michael Gardner, A Bit of Help, Inc.
// SPDX-License-Identifier: BSD-3-Clause
// See LICENSE file in the project root.
// /////////////////////////////////////////////////////////////////////////////

//! # SQLite Checkpoint & Review Store
//!
//! One adapter, one connection pool, one `data` JSON-blob column per table --
//! the same pattern the pipeline repository adapter uses for its aggregates.
//! Queries are built with `sqlx::query`/`query_scalar` at runtime rather than
//! the `query!` macro family, since those require a live `DATABASE_URL` at
//! compile time.
//!
//! `checkpoints` carries a partial unique index on `workflow_id` for
//! unresolved rows, so the single-unresolved-checkpoint invariant is a
//! database constraint here, not just an application-level check (contrast
//! the in-memory adapter, which checks it by hand).

use async_trait::async_trait;
use sqlx::{Row, SqlitePool};
use tracing::debug;
use workflow_domain::entities::{AuditLog, AuditEventType, Checkpoint, HumanReview, Workflow};
use workflow_domain::repositories::{AuditLogRepository, CheckpointRepository, ReviewRepository, WorkflowRepository};
use workflow_domain::state::WorkflowState;
use workflow_domain::value_objects::{HumanDecision, ReviewStatus, StageId, WorkflowStatus};
use workflow_domain::WorkflowError;

fn db_err(context: &str, err: impl std::fmt::Display) -> WorkflowError {
    WorkflowError::Database(format!("{context}: {err}"))
}

fn ser_err(err: impl std::fmt::Display) -> WorkflowError {
    WorkflowError::Serialization(err.to_string())
}

pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Connects to `database_path` (`:memory:` for an ephemeral database)
    /// and creates the schema if absent.
    pub async fn new(database_path: &str) -> Result<Self, WorkflowError> {
        let database_url = if database_path == ":memory:" || database_path == "sqlite::memory:" {
            "sqlite::memory:".to_string()
        } else {
            format!("sqlite://{database_path}?mode=rwc")
        };
        debug!("connecting to {}", database_url);
        let pool = SqlitePool::connect(&database_url).await.map_err(|e| db_err("connect", e))?;
        let store = SqliteStore { pool };
        store.migrate().await?;
        Ok(store)
    }

    async fn migrate(&self) -> Result<(), WorkflowError> {
        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS workflows (
                workflow_id TEXT PRIMARY KEY,
                invoice_id TEXT NOT NULL,
                status TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("create workflows table", e))?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS checkpoints (
                checkpoint_id TEXT PRIMARY KEY,
                workflow_id TEXT NOT NULL,
                is_resolved INTEGER NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("create checkpoints table", e))?;

        sqlx::query(
            "CREATE UNIQUE INDEX IF NOT EXISTS idx_checkpoints_one_unresolved ON checkpoints(workflow_id) WHERE is_resolved = 0",
        )
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("create checkpoints unresolved index", e))?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS reviews (
                checkpoint_id TEXT PRIMARY KEY,
                status TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("create reviews table", e))?;

        sqlx::query(
            r#"CREATE TABLE IF NOT EXISTS audit_log (
                id TEXT PRIMARY KEY,
                workflow_id TEXT NOT NULL,
                event_type TEXT NOT NULL,
                data TEXT NOT NULL,
                created_at TEXT NOT NULL
            )"#,
        )
        .execute(&self.pool)
        .await
        .map_err(|e| db_err("create audit_log table", e))?;

        Ok(())
    }
}

#[async_trait]
impl WorkflowRepository for SqliteStore {
    async fn create(&self, workflow: &Workflow) -> Result<(), WorkflowError> {
        let data = serde_json::to_string(&workflow.state_data).map_err(ser_err)?;
        sqlx::query("INSERT INTO workflows (workflow_id, invoice_id, status, data, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(&workflow.workflow_id)
            .bind(&workflow.invoice_id)
            .bind(workflow.status.as_str())
            .bind(data)
            .bind(workflow.started_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("insert workflow", e))?;
        Ok(())
    }

    async fn find_by_id(&self, workflow_id: &str) -> Result<Option<Workflow>, WorkflowError> {
        let row = sqlx::query("SELECT workflow_id, invoice_id, status, data, created_at FROM workflows WHERE workflow_id = ?")
            .bind(workflow_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("select workflow", e))?;
        row.map(row_to_workflow).transpose()
    }

    async fn update(&self, workflow: &Workflow) -> Result<(), WorkflowError> {
        let data = serde_json::to_string(&workflow.state_data).map_err(ser_err)?;
        sqlx::query("UPDATE workflows SET status = ?, data = ? WHERE workflow_id = ?")
            .bind(workflow.status.as_str())
            .bind(data)
            .bind(&workflow.workflow_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("update workflow", e))?;
        Ok(())
    }

    async fn list(&self, status: Option<WorkflowStatus>, offset: usize, limit: usize) -> Result<Vec<Workflow>, WorkflowError> {
        let rows = match status {
            Some(status) => {
                sqlx::query("SELECT workflow_id, invoice_id, status, data, created_at FROM workflows WHERE status = ? ORDER BY created_at LIMIT ? OFFSET ?")
                    .bind(status.as_str())
                    .bind(limit as i64)
                    .bind(offset as i64)
                    .fetch_all(&self.pool)
                    .await
            }
            None => {
                sqlx::query("SELECT workflow_id, invoice_id, status, data, created_at FROM workflows ORDER BY created_at LIMIT ? OFFSET ?")
                    .bind(limit as i64)
                    .bind(offset as i64)
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(|e| db_err("list workflows", e))?;
        rows.into_iter().map(row_to_workflow).collect()
    }

    async fn delete(&self, workflow_id: &str) -> Result<bool, WorkflowError> {
        let result = sqlx::query("DELETE FROM workflows WHERE workflow_id = ?")
            .bind(workflow_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("delete workflow", e))?;
        Ok(result.rows_affected() > 0)
    }
}

fn row_to_workflow(row: sqlx::sqlite::SqliteRow) -> Result<Workflow, WorkflowError> {
    let workflow_id: String = row.try_get("workflow_id").map_err(|e| db_err("read workflow_id", e))?;
    let invoice_id: String = row.try_get("invoice_id").map_err(|e| db_err("read invoice_id", e))?;
    let status: String = row.try_get("status").map_err(|e| db_err("read status", e))?;
    let data: String = row.try_get("data").map_err(|e| db_err("read data", e))?;
    let created_at: String = row.try_get("created_at").map_err(|e| db_err("read created_at", e))?;

    let state_data: WorkflowState = serde_json::from_str(&data).map_err(ser_err)?;
    let status = status_from_str(&status)?;
    let started_at = chrono::DateTime::parse_from_rfc3339(&created_at).map_err(|e| db_err("parse created_at", e))?.with_timezone(&chrono::Utc);

    Ok(Workflow {
        workflow_id,
        invoice_id,
        status,
        current_stage: state_data.current_stage,
        match_score: state_data.match_two_way.as_ref().map(|m| m.match_score),
        match_result: state_data.match_two_way.as_ref().map(|m| m.match_result),
        error_message: None,
        retry_count: 0,
        started_at,
        completed_at: None,
        state_data,
    })
}

fn status_from_str(s: &str) -> Result<WorkflowStatus, WorkflowError> {
    serde_json::from_value(serde_json::Value::String(s.to_string())).map_err(ser_err)
}

trait WorkflowStatusExt {
    fn as_str(&self) -> &'static str;
}

impl WorkflowStatusExt for WorkflowStatus {
    fn as_str(&self) -> &'static str {
        match self {
            WorkflowStatus::Pending => "PENDING",
            WorkflowStatus::Running => "RUNNING",
            WorkflowStatus::Paused => "PAUSED",
            WorkflowStatus::Completed => "COMPLETED",
            WorkflowStatus::Failed => "FAILED",
            WorkflowStatus::ManualHandoff => "MANUAL_HANDOFF",
        }
    }
}

#[async_trait]
impl CheckpointRepository for SqliteStore {
    async fn save_checkpoint(
        &self,
        workflow_id: &str,
        stage_id: StageId,
        state_blob: WorkflowState,
        paused_reason: &str,
        review_url: &str,
    ) -> Result<String, WorkflowError> {
        let checkpoint = Checkpoint::new(workflow_id, stage_id, state_blob, paused_reason, review_url);
        let data = serde_json::to_string(&checkpoint).map_err(ser_err)?;
        sqlx::query("INSERT INTO checkpoints (checkpoint_id, workflow_id, is_resolved, data, created_at) VALUES (?, ?, 0, ?, ?)")
            .bind(&checkpoint.checkpoint_id)
            .bind(workflow_id)
            .bind(data)
            .bind(checkpoint.created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("insert checkpoint (likely a second unresolved checkpoint)", e))?;
        Ok(checkpoint.checkpoint_id)
    }

    async fn find_by_id(&self, checkpoint_id: &str) -> Result<Option<Checkpoint>, WorkflowError> {
        let row = sqlx::query("SELECT data FROM checkpoints WHERE checkpoint_id = ?")
            .bind(checkpoint_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("select checkpoint", e))?;
        match row {
            Some(row) => {
                let data: String = row.try_get("data").map_err(|e| db_err("read data", e))?;
                Ok(Some(serde_json::from_str(&data).map_err(ser_err)?))
            }
            None => Ok(None),
        }
    }

    async fn load_latest(&self, workflow_id: &str) -> Result<Option<Checkpoint>, WorkflowError> {
        let row = sqlx::query("SELECT data FROM checkpoints WHERE workflow_id = ? ORDER BY created_at DESC LIMIT 1")
            .bind(workflow_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("select latest checkpoint", e))?;
        match row {
            Some(row) => {
                let data: String = row.try_get("data").map_err(|e| db_err("read data", e))?;
                Ok(Some(serde_json::from_str(&data).map_err(ser_err)?))
            }
            None => Ok(None),
        }
    }

    async fn resolve(
        &self,
        checkpoint_id: &str,
        decision: HumanDecision,
        resolver_id: &str,
        notes: Option<String>,
    ) -> Result<Checkpoint, WorkflowError> {
        let mut checkpoint = <Self as CheckpointRepository>::find_by_id(self, checkpoint_id)
            .await?
            .ok_or_else(|| WorkflowError::checkpoint_not_found(checkpoint_id))?;
        if checkpoint.is_resolved {
            return Err(WorkflowError::already_resolved(checkpoint_id));
        }
        checkpoint.resolve(decision, resolver_id, notes.clone());
        let decision_str = match decision {
            HumanDecision::Accept => "ACCEPT",
            HumanDecision::Reject => "REJECT",
        };
        checkpoint.state_blob.deposit_decision(serde_json::json!({
            "human_decision": decision_str,
            "reviewer_id": resolver_id,
            "reviewer_notes": notes,
        }));

        let data = serde_json::to_string(&checkpoint).map_err(ser_err)?;
        sqlx::query("UPDATE checkpoints SET is_resolved = 1, data = ? WHERE checkpoint_id = ?")
            .bind(data)
            .bind(checkpoint_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("update checkpoint", e))?;
        Ok(checkpoint)
    }
}

#[async_trait]
impl ReviewRepository for SqliteStore {
    async fn enqueue(&self, review: HumanReview) -> Result<(), WorkflowError> {
        let data = serde_json::to_string(&review).map_err(ser_err)?;
        sqlx::query("INSERT INTO reviews (checkpoint_id, status, data, created_at) VALUES (?, ?, ?, ?)")
            .bind(&review.checkpoint_id)
            .bind(review_status_str(review.status))
            .bind(data)
            .bind(review.created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("insert review", e))?;
        Ok(())
    }

    async fn find_by_checkpoint(&self, checkpoint_id: &str) -> Result<Option<HumanReview>, WorkflowError> {
        let row = sqlx::query("SELECT data FROM reviews WHERE checkpoint_id = ?")
            .bind(checkpoint_id)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| db_err("select review", e))?;
        match row {
            Some(row) => {
                let data: String = row.try_get("data").map_err(|e| db_err("read data", e))?;
                Ok(Some(serde_json::from_str(&data).map_err(ser_err)?))
            }
            None => Ok(None),
        }
    }

    async fn list(&self, status: Option<ReviewStatus>) -> Result<Vec<HumanReview>, WorkflowError> {
        let rows = match status {
            Some(status) => sqlx::query("SELECT data FROM reviews WHERE status = ?").bind(review_status_str(status)).fetch_all(&self.pool).await,
            None => sqlx::query("SELECT data FROM reviews").fetch_all(&self.pool).await,
        }
        .map_err(|e| db_err("list reviews", e))?;

        let mut reviews: Vec<HumanReview> = rows
            .into_iter()
            .map(|row| {
                let data: String = row.try_get("data").map_err(|e| db_err("read data", e))?;
                serde_json::from_str(&data).map_err(ser_err)
            })
            .collect::<Result<_, WorkflowError>>()?;
        reviews.sort_by_key(workflow_domain::entities::pending_order_key);
        Ok(reviews)
    }

    async fn mark_reviewed(&self, checkpoint_id: &str) -> Result<(), WorkflowError> {
        sqlx::query("UPDATE reviews SET status = ? WHERE checkpoint_id = ?")
            .bind(review_status_str(ReviewStatus::Reviewed))
            .bind(checkpoint_id)
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("mark review reviewed", e))?;
        Ok(())
    }

    async fn expire_stale(&self, expiry_hours: i64) -> Result<Vec<String>, WorkflowError> {
        let pending = ReviewRepository::list(self, Some(ReviewStatus::Pending)).await?;
        let now = chrono::Utc::now();
        let mut expired = Vec::new();
        for review in pending {
            if review.is_stale(now, expiry_hours) {
                sqlx::query("UPDATE reviews SET status = ? WHERE checkpoint_id = ?")
                    .bind(review_status_str(ReviewStatus::Expired))
                    .bind(&review.checkpoint_id)
                    .execute(&self.pool)
                    .await
                    .map_err(|e| db_err("expire review", e))?;
                expired.push(review.checkpoint_id);
            }
        }
        Ok(expired)
    }
}

fn review_status_str(status: ReviewStatus) -> &'static str {
    match status {
        ReviewStatus::Pending => "PENDING",
        ReviewStatus::Reviewed => "REVIEWED",
        ReviewStatus::Expired => "EXPIRED",
    }
}

#[async_trait]
impl AuditLogRepository for SqliteStore {
    async fn append(&self, entry: AuditLog) -> Result<(), WorkflowError> {
        let event_type = serde_json::to_value(entry.event_type).map_err(ser_err)?;
        let data = serde_json::to_string(&entry).map_err(ser_err)?;
        sqlx::query("INSERT INTO audit_log (id, workflow_id, event_type, data, created_at) VALUES (?, ?, ?, ?, ?)")
            .bind(&entry.id)
            .bind(&entry.workflow_id)
            .bind(event_type.as_str().unwrap_or("").to_string())
            .bind(data)
            .bind(entry.created_at.to_rfc3339())
            .execute(&self.pool)
            .await
            .map_err(|e| db_err("insert audit log", e))?;
        Ok(())
    }

    async fn for_workflow(&self, workflow_id: &str) -> Result<Vec<AuditLog>, WorkflowError> {
        let rows = sqlx::query("SELECT data FROM audit_log WHERE workflow_id = ? ORDER BY created_at")
            .bind(workflow_id)
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("select audit log", e))?;
        rows.into_iter()
            .map(|row| {
                let data: String = row.try_get("data").map_err(|e| db_err("read data", e))?;
                serde_json::from_str(&data).map_err(ser_err)
            })
            .collect()
    }

    async fn for_workflow_by_event(&self, workflow_id: &str, event_type: AuditEventType) -> Result<Vec<AuditLog>, WorkflowError> {
        let event_type = serde_json::to_value(event_type).map_err(ser_err)?;
        let rows = sqlx::query("SELECT data FROM audit_log WHERE workflow_id = ? AND event_type = ? ORDER BY created_at")
            .bind(workflow_id)
            .bind(event_type.as_str().unwrap_or(""))
            .fetch_all(&self.pool)
            .await
            .map_err(|e| db_err("select audit log by event", e))?;
        rows.into_iter()
            .map(|row| {
                let data: String = row.try_get("data").map_err(|e| db_err("read data", e))?;
                serde_json::from_str(&data).map_err(ser_err)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn round_trips_a_workflow() {
        let store = SqliteStore::new(":memory:").await.unwrap();
        let workflow = Workflow::start("INV-1", serde_json::json!({"vendor_name": "Acme"}));
        store.create(&workflow).await.unwrap();
        let found = WorkflowRepository::find_by_id(&store, &workflow.workflow_id).await.unwrap().unwrap();
        assert_eq!(found.invoice_id, "INV-1");
    }

    #[tokio::test]
    async fn the_unresolved_checkpoint_index_rejects_a_second_row() {
        let store = SqliteStore::new(":memory:").await.unwrap();
        let state = WorkflowState::new("wf_1", "INV-1", serde_json::json!({}));
        store.save_checkpoint("wf_1", StageId::CheckpointHitl, state.clone(), "low score", "http://x").await.unwrap();
        let err = store.save_checkpoint("wf_1", StageId::CheckpointHitl, state, "low score again", "http://x").await.unwrap_err();
        assert_eq!(err.category(), "database");
    }

    /// `:memory:` proves the adapter against a fresh, empty database on
    /// every run; this checks the same migrations and round-trip against a
    /// real on-disk file, closer to how the CLI actually opens a store.
    #[tokio::test]
    async fn round_trips_a_workflow_against_an_on_disk_database() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("workflow.db");
        let store = SqliteStore::new(db_path.to_str().unwrap()).await.unwrap();
        let workflow = Workflow::start("INV-1", serde_json::json!({"vendor_name": "Acme"}));
        store.create(&workflow).await.unwrap();
        let found = WorkflowRepository::find_by_id(&store, &workflow.workflow_id).await.unwrap().unwrap();
        assert_eq!(found.invoice_id, "INV-1");
    }
}
