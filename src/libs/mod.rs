//! Core library modules for readlog.
//!
//! ## Features
//!
//! - **Session Timing**: Elapsed-time arithmetic and the session state machine
//! - **Persistence**: Crash-resilient storage of the active session
//! - **Lifecycle**: Auto-stop of sessions forgotten in the background
//! - **Reading Log**: Turning confirmed sessions into permanent records
//! - **Infrastructure**: Configuration, data paths, messages and console output
//!
//! ## Usage
//!
//! ```rust,no_run
//! use chrono::Utc;
//! use readlog::libs::store::{FileStore, SessionStore};
//! use readlog::libs::tracker::SessionManager;
//!
//! let mut manager = SessionManager::restore(SessionStore::new(FileStore::new()?));
//! manager.start("dune".into(), "Dune", Utc::now())?;
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod config;
pub mod data_storage;
pub mod duration;
pub mod formatter;
pub mod handoff;
pub mod lifecycle;
pub mod messages;
pub mod reading;
pub mod session;
pub mod store;
pub mod tracker;
pub mod view;
