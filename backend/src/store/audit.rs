use crate::error::AppResult;
use common::model::audit::AuditRecord;
use rusqlite::types::Type;
use rusqlite::{params, Connection};

pub(super) fn insert(conn: &Connection, record: &AuditRecord) -> AppResult<()> {
    conn.execute(
        "INSERT INTO audit_logs (id, action, resource_type, resource_id, actor_email, metadata, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            record.id,
            record.action,
            record.resource_type,
            record.resource_id,
            record.actor_email,
            record.metadata.to_string(),
            record.created_at,
        ],
    )?;
    Ok(())
}

pub(super) fn list(conn: &Connection, limit: u32) -> AppResult<Vec<AuditRecord>> {
    let mut stmt = conn.prepare(
        "SELECT id, action, resource_type, resource_id, actor_email, metadata, created_at
           FROM audit_logs
          ORDER BY created_at DESC, rowid DESC
          LIMIT ?1",
    )?;
    let records = stmt
        .query_map([limit], |row| {
            let metadata: String = row.get(5)?;
            Ok(AuditRecord {
                id: row.get(0)?,
                action: row.get(1)?,
                resource_type: row.get(2)?,
                resource_id: row.get(3)?,
                actor_email: row.get(4)?,
                metadata: serde_json::from_str(&metadata).map_err(|e| {
                    rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(e))
                })?,
                created_at: row.get(6)?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(records)
}
