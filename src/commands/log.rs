use crate::{
    db::readings::ReadingLog,
    libs::{formatter::format_duration, messages::Message, session::BookId, view::View},
    msg_info, msg_print,
};
use anyhow::Result;
use chrono::Duration;
use clap::Args;

#[derive(Debug, Args)]
pub struct LogArgs {
    /// Only show sessions for this book id
    #[arg(short, long)]
    book: Option<String>,
    /// Maximum number of sessions to show
    #[arg(short, long, default_value_t = 20)]
    limit: usize,
}

pub fn cmd(args: LogArgs) -> Result<()> {
    let log = ReadingLog::new()?;
    let (records, total) = match args.book {
        Some(book) => {
            let book_id = BookId::new(book);
            let mut records = log.fetch_by_book(&book_id)?;
            records.truncate(args.limit);
            (records, Some(log.total_seconds_for_book(&book_id)?))
        }
        None => (log.fetch_recent(args.limit)?, None),
    };

    if records.is_empty() {
        msg_info!(Message::ReadingLogEmpty);
        return Ok(());
    }

    msg_print!(Message::ReadingLogHeader, true);
    View::readings(&records);
    if let Some(total) = total {
        msg_print!(Message::ReadingLogTotal(format_duration(&Duration::seconds(total))));
    }
    Ok(())
}
