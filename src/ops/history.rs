//! Reading back past entries: the recent list, a single transcript, the
//! month calendar, and wiping the journal.

use crate::constants::{ENTRY_LIST_DATE_FORMAT, MONTH_FORMAT};
use crate::errors::{AppError, AppResult};
use crate::journal_core::{find_entry, month_view, recent_entries, EntryId, JournalEntry};
use crate::journal_io::store::KeyValueStore;
use crate::journal_io::Journal;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone};
use std::fmt::Display;
use std::io::Write;
use tracing::info;

const PREVIEW_CHARS: usize = 60;

/// Prints the `limit` most recent entries, newest first.
pub fn list_entries<Tz, W>(
    entries: &[JournalEntry],
    limit: usize,
    tz: &Tz,
    output: &mut W,
) -> AppResult<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
    W: Write,
{
    if entries.is_empty() {
        writeln!(output, "No entries yet.")?;
        return Ok(());
    }

    for entry in recent_entries(entries, limit) {
        let written = entry.created_at.with_timezone(tz);
        writeln!(
            output,
            "{}  {}  {} {}",
            entry.id,
            written.format(ENTRY_LIST_DATE_FORMAT),
            entry.mood.emoji(),
            entry.mood.label()
        )?;
        if let Some(preview) = preview(entry) {
            writeln!(output, "    {}", preview)?;
        }
    }
    Ok(())
}

/// Prints the full conversation of the entry with `id`.
///
/// # Errors
///
/// Returns `AppError::Journal` if no entry has that id.
pub fn show_entry<Tz, W>(entries: &[JournalEntry], id: &str, tz: &Tz, output: &mut W) -> AppResult<()>
where
    Tz: TimeZone,
    Tz::Offset: Display,
    W: Write,
{
    let entry = find_entry(entries, &EntryId::from(id))
        .ok_or_else(|| AppError::Journal(format!("No entry with id '{}'", id)))?;

    writeln!(
        output,
        "{}  {} {}",
        entry.created_at.with_timezone(tz).format(ENTRY_LIST_DATE_FORMAT),
        entry.mood.emoji(),
        entry.mood.label()
    )?;
    writeln!(output)?;
    for message in &entry.transcript {
        let speaker = if message.is_prompt() { "Ella" } else { "You" };
        writeln!(output, "{}: {}", speaker, message.content)?;
    }
    Ok(())
}

/// Prints the days of a month that have an entry, with that day's latest
/// mood. `month` is `YYYY-MM`; without it the month of `now` is shown.
///
/// # Errors
///
/// Returns `AppError::Journal` if `month` is not a valid `YYYY-MM` value.
pub fn show_calendar<Tz, W>(
    entries: &[JournalEntry],
    month: Option<&str>,
    now: &DateTime<Tz>,
    output: &mut W,
) -> AppResult<()>
where
    Tz: TimeZone,
    W: Write,
{
    let first_day = match month {
        Some(month) => parse_month(month)?,
        None => {
            let today = now.date_naive();
            NaiveDate::from_ymd_opt(today.year(), today.month(), 1)
                .ok_or_else(|| AppError::Journal(format!("Invalid date: {}", today)))?
        }
    };

    let title = first_day.format("%B %Y");
    let days = month_view(entries, first_day.year(), first_day.month(), &now.timezone());
    if days.is_empty() {
        writeln!(output, "No entries in {}.", title)?;
        return Ok(());
    }

    writeln!(output, "{}", title)?;
    for (day, entry) in days {
        writeln!(
            output,
            "{:>2}  {} {:<7} {}",
            day,
            entry.mood.emoji(),
            entry.mood.label(),
            entry.id
        )?;
    }
    Ok(())
}

/// Deletes every entry. Nothing happens unless `confirmed` is set.
///
/// # Errors
///
/// Returns `AppError::Journal` without touching the store if the deletion
/// was not confirmed.
pub fn delete_all_entries<S: KeyValueStore, W: Write>(
    journal: &mut Journal<S>,
    confirmed: bool,
    output: &mut W,
) -> AppResult<()> {
    if !confirmed {
        return Err(AppError::Journal(
            "Refusing to delete all entries without --yes".to_string(),
        ));
    }

    let count = journal.entries().len();
    journal.delete_all()?;
    info!(count, "Deleted journal");
    writeln!(output, "Deleted {} entries.", count)?;
    Ok(())
}

fn parse_month(month: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(&format!("{}-01", month.trim()), &format!("{}-%d", MONTH_FORMAT))
        .map_err(|e| {
            AppError::Journal(format!(
                "Invalid month format: '{}'. Expected YYYY-MM ({})",
                month, e
            ))
        })
}

/// The first response of an entry, shortened for the list view.
fn preview(entry: &JournalEntry) -> Option<String> {
    let first = entry
        .transcript
        .iter()
        .find(|message| !message.is_prompt())?;
    let text = first.content.trim();
    if text.chars().count() <= PREVIEW_CHARS {
        return Some(text.to_string());
    }
    let cut: String = text.chars().take(PREVIEW_CHARS).collect();
    Some(format!("{}...", cut.trim_end()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::journal_core::ChatMessage;
    use crate::journal_io::codec::EntryCodec;
    use crate::journal_io::store::MemoryStore;
    use crate::mood::Mood;
    use age::secrecy::SecretString;
    use chrono::Utc;

    fn entry(mood: Mood, y: i32, m: u32, d: u32, h: u32, response: &str) -> JournalEntry {
        let created = Utc.with_ymd_and_hms(y, m, d, h, 0, 0).unwrap();
        JournalEntry::new(
            mood,
            vec![
                ChatMessage::prompt("How would you describe your day so far?"),
                ChatMessage::response(response),
            ],
            &created,
        )
    }

    fn sample() -> Vec<JournalEntry> {
        vec![
            entry(Mood::Great, 2024, 3, 9, 20, "Evening run"),
            entry(Mood::Low, 2024, 3, 9, 8, "Slept badly"),
            entry(Mood::Good, 2024, 3, 2, 12, "Lunch outside"),
            entry(Mood::Doomed, 2024, 2, 28, 12, "Deadline"),
        ]
    }

    fn render<F>(f: F) -> String
    where
        F: FnOnce(&mut Vec<u8>) -> AppResult<()>,
    {
        let mut output = Vec::new();
        f(&mut output).unwrap();
        String::from_utf8(output).unwrap()
    }

    #[test]
    fn test_list_respects_limit_and_order() {
        let entries = sample();
        let printed = render(|out| list_entries(&entries, 2, &Utc, out));
        let lines: Vec<&str> = printed.lines().collect();

        assert_eq!(lines.len(), 4);
        assert!(lines[0].contains("Saturday, March 09, 2024 20:00"));
        assert!(lines[0].contains("Great"));
        assert_eq!(lines[1], "    Evening run");
        assert!(lines[2].contains("Low"));
        assert!(!printed.contains("Deadline"));
    }

    #[test]
    fn test_list_empty_journal() {
        let printed = render(|out| list_entries(&[], 5, &Utc, out));
        assert_eq!(printed, "No entries yet.\n");
    }

    #[test]
    fn test_long_responses_are_shortened() {
        let long = "word ".repeat(30);
        let entries = vec![entry(Mood::Good, 2024, 3, 9, 8, &long)];
        let printed = render(|out| list_entries(&entries, 5, &Utc, out));
        let preview = printed.lines().nth(1).unwrap();
        assert!(preview.ends_with("..."));
        assert!(preview.chars().count() <= PREVIEW_CHARS + 7);
    }

    #[test]
    fn test_show_entry_prints_transcript() {
        let entries = sample();
        let id = entries[1].id.to_string();
        let printed = render(|out| show_entry(&entries, &id, &Utc, out));
        assert!(printed.contains("Ella: How would you describe your day so far?"));
        assert!(printed.contains("You: Slept badly"));
    }

    #[test]
    fn test_show_unknown_entry_fails() {
        let entries = sample();
        let mut output = Vec::new();
        let result = show_entry(&entries, "42", &Utc, &mut output);
        assert!(matches!(result, Err(AppError::Journal(msg)) if msg.contains("42")));
    }

    #[test]
    fn test_calendar_shows_latest_entry_per_day() {
        let entries = sample();
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        let printed = render(|out| show_calendar(&entries, None, &now, out));
        let lines: Vec<&str> = printed.lines().collect();

        assert_eq!(lines[0], "March 2024");
        assert_eq!(lines.len(), 3);
        assert!(lines[1].starts_with(" 2"));
        assert!(lines[1].contains("Good"));
        assert!(lines[2].starts_with(" 9"));
        assert!(lines[2].contains("Great"));
    }

    #[test]
    fn test_calendar_for_other_month() {
        let entries = sample();
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();

        let printed = render(|out| show_calendar(&entries, Some("2024-02"), &now, out));
        assert!(printed.starts_with("February 2024"));
        assert!(printed.contains("Doomed"));

        let printed = render(|out| show_calendar(&entries, Some("2023-12"), &now, out));
        assert_eq!(printed, "No entries in December 2023.\n");
    }

    #[test]
    fn test_calendar_rejects_bad_month() {
        let now = Utc.with_ymd_and_hms(2024, 3, 15, 9, 0, 0).unwrap();
        for bad in ["2024-13", "March", "2024/03"] {
            let mut output = Vec::new();
            let result = show_calendar(&[], Some(bad), &now, &mut output);
            assert!(
                matches!(&result, Err(AppError::Journal(msg)) if msg.contains("Invalid month format")),
                "expected failure for {}",
                bad
            );
        }
    }

    #[test]
    fn test_delete_all_requires_confirmation() {
        let codec = EntryCodec::new(SecretString::new("test-passphrase".to_string()));
        let mut journal = Journal::open(MemoryStore::new(), codec).unwrap();
        journal
            .add_entry(entry(Mood::Good, 2024, 3, 2, 12, "Lunch outside"))
            .unwrap();

        let mut output = Vec::new();
        assert!(delete_all_entries(&mut journal, false, &mut output).is_err());
        assert_eq!(journal.entries().len(), 1);

        delete_all_entries(&mut journal, true, &mut output).unwrap();
        assert!(journal.entries().is_empty());
        assert_eq!(String::from_utf8(output).unwrap(), "Deleted 1 entries.\n");
    }
}
