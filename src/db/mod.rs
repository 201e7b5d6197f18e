//! Database layer for readlog.
//!
//! SQLite storage for the reading log: the permanent records created when
//! the user confirms a finished reading session.
//!
//! ## Usage
//!
//! ```rust,no_run
//! use readlog::db::readings::ReadingLog;
//!
//! let log = ReadingLog::new()?;
//! for record in log.fetch_recent(10)? {
//!     println!("{}: {}s", record.book_title, record.duration_seconds);
//! }
//! # Ok::<(), anyhow::Error>(())
//! ```

/// Connection setup for the application database file.
pub mod db;

/// Confirmed reading sessions.
pub mod readings;
