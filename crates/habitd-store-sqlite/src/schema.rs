//! SQL schema for the habitd SQLite store.
//!
//! Executed once at connection startup via `PRAGMA user_version`. Future
//! migrations will be gated on that version number.

/// Full schema DDL; idempotent thanks to `CREATE TABLE IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;

CREATE TABLE IF NOT EXISTS habits (
    habit_id           TEXT PRIMARY KEY,
    title              TEXT NOT NULL,
    category           TEXT NOT NULL,
    owner_email        TEXT NOT NULL,
    created_at         TEXT NOT NULL,                -- RFC 3339 UTC; server-assigned
    completion_history TEXT NOT NULL DEFAULT '[]',   -- JSON array of 'DD-MM-YYYY' markers
    current_streak     INTEGER NOT NULL DEFAULT 0    -- cache; recomputed on every history change
);

CREATE INDEX IF NOT EXISTS habits_owner_idx   ON habits(owner_email);
CREATE INDEX IF NOT EXISTS habits_created_idx ON habits(created_at);

PRAGMA user_version = 1;
";
