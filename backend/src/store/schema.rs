use rusqlite::Connection;

/// Creates the relations the moderation backend reads and writes.
/// Safe to call on every start.
pub(crate) fn ensure_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(
        "
        CREATE TABLE IF NOT EXISTS church_submissions (
            id                TEXT PRIMARY KEY,
            jurisdiction      TEXT NOT NULL,
            name              TEXT NOT NULL,
            address           TEXT NOT NULL,
            schedule          TEXT,
            description       TEXT,
            pastors           TEXT,
            responsible_email TEXT NOT NULL,
            website           TEXT,
            instagram         TEXT,
            youtube           TEXT,
            spotify           TEXT,
            status            TEXT NOT NULL DEFAULT 'pending'
                              CHECK (status IN ('pending', 'approved', 'rejected')),
            submitted_at      TEXT NOT NULL,
            reviewed_at       TEXT,
            review_notes      TEXT
        );

        CREATE TABLE IF NOT EXISTS bulk_church_submissions (
            id           TEXT PRIMARY KEY,
            bulk_data    TEXT NOT NULL,
            status       TEXT NOT NULL DEFAULT 'pending'
                         CHECK (status IN ('pending', 'approved', 'rejected')),
            submitted_at TEXT NOT NULL,
            reviewed_at  TEXT,
            review_notes TEXT
        );

        CREATE TABLE IF NOT EXISTS churches (
            id            TEXT PRIMARY KEY,
            submission_id TEXT UNIQUE,
            jurisdiction  TEXT NOT NULL,
            name          TEXT NOT NULL,
            address       TEXT NOT NULL,
            schedule      TEXT,
            description   TEXT,
            pastors       TEXT,
            email         TEXT NOT NULL,
            website       TEXT,
            instagram     TEXT,
            youtube       TEXT,
            spotify       TEXT,
            created_at    TEXT NOT NULL
        );

        CREATE TABLE IF NOT EXISTS audit_logs (
            id            TEXT PRIMARY KEY,
            action        TEXT NOT NULL,
            resource_type TEXT NOT NULL,
            resource_id   TEXT NOT NULL,
            actor_email   TEXT NOT NULL,
            metadata      TEXT NOT NULL,
            created_at    TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_submissions_status
            ON church_submissions (status, submitted_at);
        CREATE INDEX IF NOT EXISTS idx_bulk_submissions_status
            ON bulk_church_submissions (status, submitted_at);
        ",
    )
}
