use crate::{
    commands::open_manager,
    libs::{messages::Message, session::BookId},
    msg_error, msg_info, msg_success,
};
use anyhow::Result;
use chrono::Utc;
use clap::Args;

#[derive(Debug, Args)]
pub struct StartArgs {
    /// Stable identifier of the book
    #[arg(required = true)]
    book_id: String,
    /// Title shown while the session runs
    #[arg(required = true, num_args = 1..)]
    title: Vec<String>,
}

pub fn cmd(args: StartArgs) -> Result<()> {
    let mut manager = open_manager()?;
    let book_id = BookId::new(args.book_id);
    let title = args.title.join(" ");

    if let Some(active) = manager.active().filter(|active| active.book_id == book_id) {
        msg_info!(Message::SessionAlreadyRunning(active.book_title.clone()));
        return Ok(());
    }

    match manager.start(book_id, title.clone(), Utc::now()) {
        Ok(()) => msg_success!(Message::SessionStarted(title)),
        Err(e) => msg_error!(Message::StartRejected(e.to_string())),
    }
    Ok(())
}
