pub mod init;
pub mod log;
pub mod pause;
pub mod resume;
pub mod start;
pub mod status;
pub mod stop;
pub mod watch;

use crate::libs::store::{FileStore, SessionStore};
use crate::libs::tracker::SessionManager;
use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
enum Commands {
    #[command(about = "Configure reading session settings")]
    Init(init::InitArgs),
    #[command(about = "Start reading a book", arg_required_else_help = true)]
    Start(start::StartArgs),
    #[command(about = "Pause the current reading session")]
    Pause,
    #[command(about = "Resume the paused reading session")]
    Resume,
    #[command(about = "Stop the current reading session and log it")]
    Stop(stop::StopArgs),
    #[command(about = "Show the current reading session")]
    Status,
    #[command(about = "Show logged reading sessions")]
    Log(log::LogArgs),
    #[command(about = "Keep a session open and read commands and lifecycle phases from stdin")]
    Watch,
}

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help(true))]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    pub fn menu() -> Result<()> {
        let cli = Self::parse();
        match cli.command {
            Commands::Init(args) => init::cmd(args),
            Commands::Start(args) => start::cmd(args),
            Commands::Pause => pause::cmd(),
            Commands::Resume => resume::cmd(),
            Commands::Stop(args) => stop::cmd(args),
            Commands::Status => status::cmd(),
            Commands::Log(args) => log::cmd(args),
            Commands::Watch => watch::cmd(),
        }
    }
}

/// Builds the process's session manager from the persisted session.
pub fn open_manager() -> Result<SessionManager> {
    Ok(SessionManager::restore(SessionStore::new(FileStore::new()?)))
}
