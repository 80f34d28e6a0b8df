use super::{refused_transition, status_column};
use crate::error::{AppError, AppResult};
use chrono::Utc;
use common::model::status::SubmissionStatus;
use common::model::submission::BulkSubmission;
use common::requests::{BulkListQuery, BulkPatchRequest};
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const TABLE: &str = "bulk_church_submissions";

const COLUMNS: &str = "id, bulk_data, status, submitted_at, reviewed_at, review_notes";

fn from_row(row: &Row<'_>) -> rusqlite::Result<BulkSubmission> {
    Ok(BulkSubmission {
        id: row.get(0)?,
        bulk_data: row.get(1)?,
        status: status_column(row, 2)?,
        submitted_at: row.get(3)?,
        reviewed_at: row.get(4)?,
        review_notes: row.get(5)?,
    })
}

pub(super) fn insert(conn: &Connection, bulk_data: &str) -> AppResult<BulkSubmission> {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO bulk_church_submissions (id, bulk_data, status, submitted_at)
         VALUES (?1, ?2, 'pending', ?3)",
        params![id, bulk_data, Utc::now()],
    )?;
    select(conn, &id)?
        .ok_or_else(|| AppError::Persistence("inserted bulk submission vanished".into()))
}

pub(super) fn select(conn: &Connection, id: &str) -> rusqlite::Result<Option<BulkSubmission>> {
    let sql = format!("SELECT {} FROM {} WHERE id = ?1", COLUMNS, TABLE);
    conn.query_row(&sql, [id], from_row).optional()
}

pub(super) fn list(conn: &Connection, filter: &BulkListQuery) -> AppResult<Vec<BulkSubmission>> {
    let sql = format!(
        "SELECT {} FROM {} WHERE (?1 IS NULL OR status = ?1)
         ORDER BY submitted_at DESC, rowid DESC",
        COLUMNS, TABLE
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map([filter.status.map(|s| s.as_str())], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub(super) fn patch(
    conn: &Connection,
    id: &str,
    patch: &BulkPatchRequest,
) -> AppResult<BulkSubmission> {
    let notes = patch.review_notes.as_deref();
    let changed = match patch.status {
        Some(status) => conn.execute(
            "UPDATE bulk_church_submissions
                SET status = ?1, reviewed_at = ?2, review_notes = COALESCE(?3, review_notes)
              WHERE id = ?4 AND status = ?5",
            params![
                status.as_str(),
                Utc::now(),
                notes,
                id,
                SubmissionStatus::Pending.as_str()
            ],
        )?,
        None => conn.execute(
            "UPDATE bulk_church_submissions SET review_notes = ?1
              WHERE id = ?2 AND status = ?3",
            params![notes, id, SubmissionStatus::Pending.as_str()],
        )?,
    };
    if changed == 0 {
        return Err(refused_transition(conn, TABLE, id));
    }
    select(conn, id)?.ok_or_else(|| AppError::NotFound("Envio".to_string()))
}
