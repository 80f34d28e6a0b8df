//! Adapter over the relational store.
//!
//! The store is SQLite, reached through a single `rusqlite::Connection`
//! behind a mutex. Every public operation is async and runs its queries on
//! actix's blocking pool via `web::block`, so the request task only suspends
//! while the database works. Each sub-module keeps the synchronous helpers for
//! one relation:
//!
//! - `submissions`: `church_submissions`, including the guarded status update.
//! - `bulk`: `bulk_church_submissions`.
//! - `churches`: the published directory, its CSV export source and stats.
//! - `audit`: the append-only `audit_logs`.

mod audit;
mod bulk;
mod churches;
mod schema;
mod submissions;

use crate::error::{AppError, AppResult};
use actix_web::web;
use common::model::audit::AuditRecord;
use common::model::church::Church;
use common::model::status::{ReviewDecision, SubmissionStatus};
use common::model::submission::{BulkSubmission, ModerationStats, NewSubmission, Submission};
use common::requests::{BulkListQuery, BulkPatchRequest, SubmissionListQuery};
use rusqlite::functions::FunctionFlags;
use rusqlite::types::Type;
use rusqlite::{Connection, Row};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct Store {
    conn: Arc<Mutex<Connection>>,
}

impl Store {
    pub fn open(path: &str) -> AppResult<Self> {
        Self::with_connection(Connection::open(path)?)
    }

    #[cfg(test)]
    pub fn open_in_memory() -> AppResult<Self> {
        Self::with_connection(Connection::open_in_memory()?)
    }

    /// Runs raw SQL against the store, for tests that need to break it.
    #[cfg(test)]
    pub async fn execute_batch(&self, sql: &'static str) -> AppResult<()> {
        self.run(move |conn| Ok(conn.execute_batch(sql)?)).await
    }

    fn with_connection(conn: Connection) -> AppResult<Self> {
        register_functions(&conn)?;
        schema::ensure_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    async fn run<T, F>(&self, f: F) -> AppResult<T>
    where
        F: FnOnce(&mut Connection) -> AppResult<T> + Send + 'static,
        T: Send + 'static,
    {
        let conn = self.conn.clone();
        web::block(move || {
            let mut guard = conn
                .lock()
                .map_err(|_| AppError::Persistence("connection mutex poisoned".to_string()))?;
            f(&mut *guard)
        })
        .await?
    }

    /// Inserts a new structured submission. Status is always `pending`.
    pub async fn create_submission(&self, new: NewSubmission) -> AppResult<Submission> {
        self.run(move |conn| submissions::insert(conn, &new)).await
    }

    /// Inserts a new free-text submission. Status is always `pending`.
    pub async fn create_bulk_submission(&self, bulk_data: String) -> AppResult<BulkSubmission> {
        self.run(move |conn| bulk::insert(conn, &bulk_data)).await
    }

    pub async fn get_submission(&self, id: String) -> AppResult<Submission> {
        self.run(move |conn| {
            submissions::select(conn, &id)?.ok_or_else(|| AppError::NotFound("Envio".to_string()))
        })
        .await
    }

    pub async fn get_bulk_submission(&self, id: String) -> AppResult<BulkSubmission> {
        self.run(move |conn| {
            bulk::select(conn, &id)?.ok_or_else(|| AppError::NotFound("Envio".to_string()))
        })
        .await
    }

    /// Most recent first.
    pub async fn list_submissions(&self, filter: SubmissionListQuery) -> AppResult<Vec<Submission>> {
        self.run(move |conn| submissions::list(conn, &filter)).await
    }

    /// Most recent first.
    pub async fn list_bulk_submissions(&self, filter: BulkListQuery) -> AppResult<Vec<BulkSubmission>> {
        self.run(move |conn| bulk::list(conn, &filter)).await
    }

    /// Moves a pending submission to its decided state.
    ///
    /// The write is conditioned on `status = 'pending'`; if it touches no row
    /// the submission is either missing (`NotFound`) or already decided
    /// (`Conflict` with the stored status). Approval publishes the church in
    /// the same transaction.
    pub async fn update_status(
        &self,
        id: String,
        decision: ReviewDecision,
        review_notes: Option<String>,
    ) -> AppResult<Submission> {
        self.run(move |conn| submissions::transition(conn, &id, decision, review_notes.as_deref()))
            .await
    }

    /// Applies an admin patch to a bulk submission. A status in the patch is a
    /// guarded transition; notes alone only annotate. Both writes require the
    /// item to still be `pending`.
    pub async fn update_bulk(&self, id: String, patch: BulkPatchRequest) -> AppResult<BulkSubmission> {
        self.run(move |conn| bulk::patch(conn, &id, &patch)).await
    }

    pub async fn stats(&self) -> AppResult<ModerationStats> {
        self.run(|conn| churches::stats(conn)).await
    }

    pub async fn list_churches(&self) -> AppResult<Vec<Church>> {
        self.run(|conn| churches::list(conn)).await
    }

    pub async fn insert_audit(&self, record: AuditRecord) -> AppResult<()> {
        self.run(move |conn| audit::insert(conn, &record)).await
    }

    /// Most recent first.
    pub async fn list_audit(&self, limit: u32) -> AppResult<Vec<AuditRecord>> {
        self.run(move |conn| audit::list(conn, limit)).await
    }
}

/// SQLite's `lower()` and `LIKE` only fold ASCII; names here are Portuguese.
/// `fold_case(text)` lowercases with Rust's Unicode rules instead.
fn register_functions(conn: &Connection) -> rusqlite::Result<()> {
    conn.create_scalar_function(
        "fold_case",
        1,
        FunctionFlags::SQLITE_UTF8 | FunctionFlags::SQLITE_DETERMINISTIC,
        |ctx| Ok(ctx.get::<Option<String>>(0)?.map(|s| s.to_lowercase())),
    )
}

/// Reads a `status` column into [`SubmissionStatus`].
fn status_column(row: &Row<'_>, idx: usize) -> rusqlite::Result<SubmissionStatus> {
    let raw: String = row.get(idx)?;
    raw.parse::<SubmissionStatus>().map_err(|e| {
        rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, e.into())
    })
}

/// Current status of a row, or `None` when it does not exist.
fn current_status(
    conn: &Connection,
    table: &str,
    id: &str,
) -> rusqlite::Result<Option<SubmissionStatus>> {
    let sql = format!("SELECT status FROM {} WHERE id = ?1", table);
    match conn.query_row(&sql, [id], |row| status_column(row, 0)) {
        Ok(status) => Ok(Some(status)),
        Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Maps a guarded update that touched no row to the matching error.
fn refused_transition(conn: &Connection, table: &str, id: &str) -> AppError {
    match current_status(conn, table, id) {
        Ok(Some(current)) => AppError::Conflict { current },
        Ok(None) => AppError::NotFound("Envio".to_string()),
        Err(e) => e.into(),
    }
}

#[cfg(test)]
mod tests;
