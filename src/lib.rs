//! # Readlog - Reading Session Tracker
//!
//! A command-line utility for timing reading sessions and keeping a log of
//! the ones worth keeping.
//!
//! ## Features
//!
//! - **Session Timer**: One reading session at a time, with pause and resume
//! - **Crash Resilience**: The running session survives process restarts
//! - **Auto-Stop**: Sessions forgotten in the background are capped at a threshold
//! - **Confirmation**: Finished sessions are logged only after the user keeps them
//! - **Reading Log**: Confirmed sessions with pages and notes in SQLite
//!
//! ## Usage
//!
//! ```rust,no_run
//! use readlog::commands::Cli;
//!
//! fn main() -> anyhow::Result<()> {
//!     Cli::menu()
//! }
//! ```

pub mod commands;
pub mod db;
pub mod libs;
