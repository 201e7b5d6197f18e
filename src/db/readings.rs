//! Database operations for confirmed reading sessions.
//!
//! Each row is one [`ReadingRecord`]. The completion id is unique, so
//! confirming the same completion twice stores it only once.

use crate::db::db::Db;
use crate::libs::reading::ReadingRecord;
use crate::libs::session::BookId;
use anyhow::Result;
use rusqlite::types::Type;
use rusqlite::{params, Connection, OptionalExtension, Row};
use uuid::Uuid;

const SCHEMA_READINGS: &str = "CREATE TABLE IF NOT EXISTS reading_sessions (
    id INTEGER PRIMARY KEY,
    completion_id TEXT NOT NULL UNIQUE,
    book_id TEXT NOT NULL,
    book_title TEXT NOT NULL,
    started_at TIMESTAMP NOT NULL,
    ended_at TIMESTAMP NOT NULL,
    duration_seconds INTEGER NOT NULL,
    was_auto_stopped INTEGER NOT NULL DEFAULT 0,
    start_page INTEGER,
    end_page INTEGER,
    note TEXT
)";
const INDEX_READINGS_BOOK: &str = "CREATE INDEX IF NOT EXISTS idx_reading_sessions_book ON reading_sessions(book_id)";
const INSERT_READING: &str = "INSERT OR IGNORE INTO reading_sessions
    (completion_id, book_id, book_title, started_at, ended_at, duration_seconds, was_auto_stopped, start_page, end_page, note)
    VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)";
const SELECT_ID_BY_COMPLETION: &str = "SELECT id FROM reading_sessions WHERE completion_id = ?1";
const SELECT_COLUMNS: &str = "SELECT id, completion_id, book_id, book_title, started_at, ended_at, duration_seconds,
    was_auto_stopped, start_page, end_page, note FROM reading_sessions";
const SELECT_TOTAL_BY_BOOK: &str = "SELECT COALESCE(SUM(duration_seconds), 0) FROM reading_sessions WHERE book_id = ?1";

pub struct ReadingLog {
    conn: Connection,
}

impl ReadingLog {
    /// Opens the reading log in the application database.
    pub fn new() -> Result<Self> {
        Self::with_db(Db::new()?)
    }

    pub fn with_db(db: Db) -> Result<Self> {
        db.conn.execute(SCHEMA_READINGS, [])?;
        db.conn.execute(INDEX_READINGS_BOOK, [])?;
        Ok(ReadingLog { conn: db.conn })
    }

    /// Stores a record and returns its row id. A record whose completion is
    /// already stored is not inserted again; the existing id is returned.
    pub fn insert(&self, record: &ReadingRecord) -> Result<i64> {
        let completion_id = record.completion_id.to_string();
        let inserted = self.conn.execute(
            INSERT_READING,
            params![
                completion_id,
                record.book_id.as_str(),
                record.book_title,
                record.started_at,
                record.ended_at,
                record.duration_seconds,
                record.was_auto_stopped,
                record.start_page,
                record.end_page,
                record.note,
            ],
        )?;
        if inserted == 0 {
            tracing::debug!(%completion_id, "reading record already stored");
        }
        let id = self.conn.query_row(SELECT_ID_BY_COMPLETION, [&completion_id], |row| row.get(0))?;
        Ok(id)
    }

    pub fn fetch_recent(&self, limit: usize) -> Result<Vec<ReadingRecord>> {
        let sql = format!("{} ORDER BY started_at DESC, id DESC LIMIT ?1", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt.query_map([limit as i64], map_record)?.collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    pub fn fetch_by_book(&self, book_id: &BookId) -> Result<Vec<ReadingRecord>> {
        let sql = format!("{} WHERE book_id = ?1 ORDER BY started_at DESC, id DESC", SELECT_COLUMNS);
        let mut stmt = self.conn.prepare(&sql)?;
        let records = stmt
            .query_map([book_id.as_str()], map_record)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    pub fn fetch_by_completion(&self, completion_id: Uuid) -> Result<Option<ReadingRecord>> {
        let sql = format!("{} WHERE completion_id = ?1", SELECT_COLUMNS);
        let record = self
            .conn
            .query_row(&sql, [completion_id.to_string()], map_record)
            .optional()?;
        Ok(record)
    }

    /// Total confirmed reading seconds for a book.
    pub fn total_seconds_for_book(&self, book_id: &BookId) -> Result<i64> {
        let total = self.conn.query_row(SELECT_TOTAL_BY_BOOK, [book_id.as_str()], |row| row.get(0))?;
        Ok(total)
    }
}

fn map_record(row: &Row<'_>) -> rusqlite::Result<ReadingRecord> {
    let completion_id: String = row.get(1)?;
    let completion_id =
        Uuid::parse_str(&completion_id).map_err(|e| rusqlite::Error::FromSqlConversionFailure(1, Type::Text, Box::new(e)))?;
    Ok(ReadingRecord {
        id: Some(row.get(0)?),
        completion_id,
        book_id: BookId::new(row.get::<_, String>(2)?),
        book_title: row.get(3)?,
        started_at: row.get(4)?,
        ended_at: row.get(5)?,
        duration_seconds: row.get(6)?,
        was_auto_stopped: row.get(7)?,
        start_page: row.get(8)?,
        end_page: row.get(9)?,
        note: row.get(10)?,
    })
}
