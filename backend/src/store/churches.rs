use crate::error::AppResult;
use chrono::{DateTime, Utc};
use common::model::church::Church;
use common::model::status::SubmissionStatus;
use common::model::submission::{ModerationStats, NewSubmission, StatusCounts, Submission};
use rusqlite::{params, Connection};
use uuid::Uuid;

/// Publishes an approved submission into the directory.
pub(super) fn publish(
    conn: &Connection,
    submission: &Submission,
    now: DateTime<Utc>,
) -> rusqlite::Result<()> {
    let c = &submission.content;
    conn.execute(
        "INSERT INTO churches (id, submission_id, jurisdiction, name, address, schedule,
             description, pastors, email, website, instagram, youtube, spotify, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
        params![
            Uuid::new_v4().to_string(),
            submission.id,
            c.jurisdiction,
            c.name,
            c.address,
            c.schedule,
            c.description,
            c.pastors,
            c.responsible_email,
            c.website,
            c.instagram,
            c.youtube,
            c.spotify,
            now,
        ],
    )?;
    Ok(())
}

pub(super) fn list(conn: &Connection) -> AppResult<Vec<Church>> {
    let mut stmt = conn.prepare(
        "SELECT id, submission_id, jurisdiction, name, address, schedule, description, pastors,
                email, website, instagram, youtube, spotify, created_at
           FROM churches
          ORDER BY name COLLATE NOCASE, created_at",
    )?;
    let churches = stmt
        .query_map([], |row| {
            Ok(Church {
                id: row.get(0)?,
                submission_id: row.get(1)?,
                details: NewSubmission {
                    jurisdiction: row.get(2)?,
                    name: row.get(3)?,
                    address: row.get(4)?,
                    schedule: row.get(5)?,
                    description: row.get(6)?,
                    pastors: row.get(7)?,
                    responsible_email: row.get(8)?,
                    website: row.get(9)?,
                    instagram: row.get(10)?,
                    youtube: row.get(11)?,
                    spotify: row.get(12)?,
                },
                created_at: row.get(13)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(churches)
}

fn count_by_status(conn: &Connection, table: &str) -> AppResult<StatusCounts> {
    let sql = format!("SELECT status, COUNT(*) FROM {} GROUP BY status", table);
    let mut stmt = conn.prepare(&sql)?;
    let mut rows = stmt.query([])?;
    let mut counts = StatusCounts::default();
    while let Some(row) = rows.next()? {
        let status: String = row.get(0)?;
        let n: i64 = row.get(1)?;
        let n = n.max(0) as u64;
        match status.parse::<SubmissionStatus>() {
            Ok(SubmissionStatus::Pending) => counts.pending = n,
            Ok(SubmissionStatus::Approved) => counts.approved = n,
            Ok(SubmissionStatus::Rejected) => counts.rejected = n,
            Err(_) => {}
        }
        counts.total += n;
    }
    Ok(counts)
}

pub(super) fn stats(conn: &Connection) -> AppResult<ModerationStats> {
    let churches: i64 = conn.query_row("SELECT COUNT(*) FROM churches", [], |row| row.get(0))?;
    Ok(ModerationStats {
        submissions: count_by_status(conn, "church_submissions")?,
        bulk_submissions: count_by_status(conn, "bulk_church_submissions")?,
        churches: churches.max(0) as u64,
    })
}
