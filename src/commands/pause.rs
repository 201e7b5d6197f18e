use crate::{
    commands::open_manager,
    libs::{formatter::format_seconds, messages::Message},
    msg_success, msg_warning,
};
use anyhow::Result;
use chrono::Utc;

pub fn cmd() -> Result<()> {
    let mut manager = open_manager()?;
    let now = Utc::now();

    match manager.active().map(|session| session.is_paused) {
        None => msg_warning!(Message::SessionNotActive),
        Some(true) => msg_warning!(Message::SessionNotRunning),
        Some(_) => {
            manager.pause(now);
            msg_success!(Message::SessionPaused(format_seconds(manager.elapsed_seconds(now))));
        }
    }
    Ok(())
}
