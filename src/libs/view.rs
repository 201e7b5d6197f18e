use super::formatter::{format_seconds, format_timestamp};
use super::reading::ReadingRecord;
use prettytable::{row, Table};

pub struct View {}

impl View {
    pub fn readings(records: &[ReadingRecord]) {
        let mut table = Table::new();

        table.add_row(row!["ID", "BOOK", "STARTED", "DURATION", "PAGES", "AUTO", "NOTE"]);
        for record in records {
            let pages = match (record.start_page, record.end_page) {
                (Some(start), Some(end)) => format!("{}-{}", start, end),
                (Some(start), None) => format!("{}-", start),
                (None, Some(end)) => format!("-{}", end),
                (None, None) => "-".to_string(),
            };
            table.add_row(row![
                record.id.unwrap_or(0),
                record.book_title,
                format_timestamp(&record.started_at),
                format_seconds(record.duration_seconds),
                pages,
                if record.was_auto_stopped { "yes" } else { "" },
                record.note.as_deref().unwrap_or("")
            ]);
        }
        table.printstd();
    }
}
