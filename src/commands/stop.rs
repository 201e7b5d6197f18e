//! Stop the running session and resolve it right away.
//!
//! The finished session is only kept in memory until it is confirmed, so the
//! one-shot command asks for confirmation before it exits. `--yes` and
//! `--discard` answer the question up front for scripted use.

use crate::{
    commands::open_manager,
    db::readings::ReadingLog,
    libs::{
        formatter::{format_seconds, format_timestamp},
        handoff::{self, Annotations},
        messages::Message,
        reading::{self, RecordError},
        session::PendingCompletion,
    },
    msg_bail_anyhow, msg_error, msg_error_anyhow, msg_print, msg_success, msg_warning,
};
use anyhow::Result;
use chrono::Utc;
use clap::Args;
use dialoguer::{theme::ColorfulTheme, Confirm, Input};

#[derive(Debug, Args)]
pub struct StopArgs {
    /// Save the session without asking
    #[arg(short, long, conflicts_with = "discard")]
    yes: bool,
    /// Throw the session away without asking
    #[arg(short, long)]
    discard: bool,
    /// Page the session started on
    #[arg(long)]
    start_page: Option<i64>,
    /// Page the session ended on
    #[arg(long)]
    end_page: Option<i64>,
    /// Free-form note stored with the session
    #[arg(short, long)]
    note: Option<String>,
}

impl StopArgs {
    fn has_annotations(&self) -> bool {
        self.start_page.is_some() || self.end_page.is_some() || self.note.is_some()
    }
}

pub fn cmd(args: StopArgs) -> Result<()> {
    if let Err(invalid) = reading::validate_pages(args.start_page, args.end_page) {
        msg_bail_anyhow!(Message::InvalidRecord(invalid.to_string()));
    }

    let mut manager = open_manager()?;
    let Some(pending) = manager.stop(Utc::now(), false, None) else {
        msg_warning!(Message::SessionNotActive);
        return Ok(());
    };

    msg_success!(Message::SessionStopped {
        title: pending.book_title.clone(),
        duration: format_seconds(pending.duration_seconds),
    });
    print_summary(&pending);

    let keep = if args.discard {
        false
    } else if args.yes {
        true
    } else {
        Confirm::with_theme(&ColorfulTheme::default())
            .with_prompt(Message::PromptKeepSession.to_string())
            .default(true)
            .interact()?
    };

    if !keep {
        if let Some(discarded) = handoff::discard(&mut manager) {
            msg_success!(Message::CompletionDiscarded(discarded.book_title));
        }
        return Ok(());
    }

    let interactive = !(args.has_annotations() || args.yes);
    let mut annotations = if interactive {
        prompt_annotations()?
    } else {
        Annotations {
            start_page: args.start_page,
            end_page: args.end_page,
            note: args.note,
        }
    };

    let log = ReadingLog::new()?;
    loop {
        match handoff::keep(&mut manager, &log, annotations) {
            Ok(Some(record)) => {
                msg_success!(Message::CompletionConfirmed(record.book_title));
                return Ok(());
            }
            Ok(None) => return Ok(()),
            Err(e) => match e.downcast_ref::<RecordError>() {
                Some(invalid) if interactive => {
                    msg_error!(Message::InvalidRecord(invalid.to_string()));
                    annotations = prompt_annotations()?;
                }
                Some(invalid) => return Err(msg_error_anyhow!(Message::InvalidRecord(invalid.to_string()))),
                None => return Err(e),
            },
        }
    }
}

pub fn print_summary(pending: &PendingCompletion) {
    msg_print!(Message::CompletionSummary {
        title: pending.book_title.clone(),
        started: format_timestamp(&pending.started_at),
        ended: format_timestamp(&pending.ended_at),
        duration: format_seconds(pending.duration_seconds),
    });
}

fn prompt_annotations() -> Result<Annotations> {
    let start_page = prompt_page(Message::PromptStartPage)?;
    let end_page = prompt_page(Message::PromptEndPage)?;
    let note: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(Message::PromptNote.to_string())
        .allow_empty(true)
        .interact_text()?;

    Ok(Annotations {
        start_page,
        end_page,
        note: Some(note).filter(|n| !n.trim().is_empty()),
    })
}

fn prompt_page(prompt: Message) -> Result<Option<i64>> {
    let input: String = Input::with_theme(&ColorfulTheme::default())
        .with_prompt(prompt.to_string())
        .allow_empty(true)
        .validate_with(|input: &String| -> Result<(), String> {
            if input.trim().is_empty() || input.trim().parse::<u32>().is_ok() {
                Ok(())
            } else {
                Err(Message::PageNumberRequired.to_string())
            }
        })
        .interact_text()?;

    let input = input.trim();
    if input.is_empty() {
        return Ok(None);
    }
    Ok(Some(input.parse()?))
}
