use super::{churches, refused_transition, status_column};
use crate::error::{AppError, AppResult};
use chrono::Utc;
use common::model::status::{ReviewDecision, SubmissionStatus};
use common::model::submission::{NewSubmission, Submission};
use common::requests::SubmissionListQuery;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const TABLE: &str = "church_submissions";

const COLUMNS: &str = "id, jurisdiction, name, address, schedule, description, pastors, \
     responsible_email, website, instagram, youtube, spotify, status, submitted_at, \
     reviewed_at, review_notes";

fn from_row(row: &Row<'_>) -> rusqlite::Result<Submission> {
    Ok(Submission {
        id: row.get(0)?,
        content: NewSubmission {
            jurisdiction: row.get(1)?,
            name: row.get(2)?,
            address: row.get(3)?,
            schedule: row.get(4)?,
            description: row.get(5)?,
            pastors: row.get(6)?,
            responsible_email: row.get(7)?,
            website: row.get(8)?,
            instagram: row.get(9)?,
            youtube: row.get(10)?,
            spotify: row.get(11)?,
        },
        status: status_column(row, 12)?,
        submitted_at: row.get(13)?,
        reviewed_at: row.get(14)?,
        review_notes: row.get(15)?,
    })
}

pub(super) fn insert(conn: &Connection, new: &NewSubmission) -> AppResult<Submission> {
    let id = Uuid::new_v4().to_string();
    conn.execute(
        "INSERT INTO church_submissions (id, jurisdiction, name, address, schedule, description,
             pastors, responsible_email, website, instagram, youtube, spotify, status, submitted_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, 'pending', ?13)",
        params![
            id,
            new.jurisdiction,
            new.name,
            new.address,
            new.schedule,
            new.description,
            new.pastors,
            new.responsible_email,
            new.website,
            new.instagram,
            new.youtube,
            new.spotify,
            Utc::now(),
        ],
    )?;
    select(conn, &id)?.ok_or_else(|| AppError::Persistence("inserted submission vanished".into()))
}

pub(super) fn select(conn: &Connection, id: &str) -> rusqlite::Result<Option<Submission>> {
    let sql = format!("SELECT {} FROM {} WHERE id = ?1", COLUMNS, TABLE);
    conn.query_row(&sql, [id], from_row).optional()
}

pub(super) fn list(conn: &Connection, filter: &SubmissionListQuery) -> AppResult<Vec<Submission>> {
    let sql = format!(
        "SELECT {} FROM {}
         WHERE (?1 IS NULL OR status = ?1)
           AND (?2 IS NULL OR instr(fold_case(name), ?2) > 0)
         ORDER BY submitted_at DESC, rowid DESC",
        COLUMNS, TABLE
    );
    let search = filter
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_lowercase);
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt
        .query_map(params![filter.status.map(|s| s.as_str()), search], from_row)?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(rows)
}

pub(super) fn transition(
    conn: &mut Connection,
    id: &str,
    decision: ReviewDecision,
    review_notes: Option<&str>,
) -> AppResult<Submission> {
    let tx = conn.transaction()?;
    let now = Utc::now();
    let changed = tx.execute(
        "UPDATE church_submissions
            SET status = ?1, reviewed_at = ?2, review_notes = ?3
          WHERE id = ?4 AND status = ?5",
        params![
            decision.target_status().as_str(),
            now,
            review_notes,
            id,
            SubmissionStatus::Pending.as_str()
        ],
    )?;
    if changed == 0 {
        return Err(refused_transition(&tx, TABLE, id));
    }

    let submission = select(&tx, id)?
        .ok_or_else(|| AppError::Persistence("updated submission vanished".into()))?;
    if decision == ReviewDecision::Approve {
        churches::publish(&tx, &submission, now)?;
    }
    tx.commit()?;
    Ok(submission)
}
