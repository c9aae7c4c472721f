//! Core journal functionality without I/O operations.
//!
//! This module contains the entry data model and pure logic over the
//! in-memory entry list: recent entries, lookup by id, and the month view
//! used by the calendar. Prompt selection lives in [`prompts`] and the
//! in-progress conversation in [`chat`].

pub mod chat;
pub mod prompts;

use crate::mood::Mood;
use chrono::{DateTime, Datelike, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Who authored a transcript message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageKind {
    /// A question asked by the journal.
    Prompt,
    /// Text written by the user.
    Response,
}

/// One message of a journaling transcript.
///
/// # Examples
///
/// ```
/// use ella::journal_core::{ChatMessage, MessageKind};
///
/// let message = ChatMessage::prompt("What is bringing you joy today?");
/// assert_eq!(message.kind, MessageKind::Prompt);
/// assert!(message.is_prompt());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    #[serde(rename = "type")]
    pub kind: MessageKind,
    pub content: String,
}

impl ChatMessage {
    pub fn prompt(content: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Prompt,
            content: content.into(),
        }
    }

    pub fn response(content: impl Into<String>) -> Self {
        Self {
            kind: MessageKind::Response,
            content: content.into(),
        }
    }

    pub fn is_prompt(&self) -> bool {
        self.kind == MessageKind::Prompt
    }
}

/// Identifier of a journal entry: its creation time in milliseconds since
/// the Unix epoch, rendered as a decimal string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EntryId(String);

impl EntryId {
    /// Derives an id from a creation timestamp.
    ///
    /// ```
    /// use ella::journal_core::EntryId;
    /// use chrono::{TimeZone, Utc};
    ///
    /// let created = Utc.timestamp_millis_opt(1_700_000_000_123).unwrap();
    /// assert_eq!(EntryId::from_timestamp(&created).as_str(), "1700000000123");
    /// ```
    pub fn from_timestamp<Tz: TimeZone>(created: &DateTime<Tz>) -> Self {
        Self(created.timestamp_millis().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The millisecond value, when the id is numeric.
    pub(crate) fn millis(&self) -> Option<i64> {
        self.0.parse().ok()
    }

    pub(crate) fn from_millis(millis: i64) -> Self {
        Self(millis.to_string())
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for EntryId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A completed journaling session. Entries are never edited after creation.
///
/// The serialized field names (`chat`, `date`) follow the stored entry
/// format.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JournalEntry {
    pub id: EntryId,
    pub mood: Mood,
    #[serde(rename = "chat")]
    pub transcript: Vec<ChatMessage>,
    #[serde(rename = "date")]
    pub created_at: DateTime<Utc>,
}

impl JournalEntry {
    pub fn new<Tz: TimeZone>(
        mood: Mood,
        transcript: Vec<ChatMessage>,
        created_at: &DateTime<Tz>,
    ) -> Self {
        Self {
            id: EntryId::from_timestamp(created_at),
            mood,
            transcript,
            created_at: created_at.with_timezone(&Utc),
        }
    }

    /// Prompt messages of the transcript, oldest first.
    pub fn prompts(&self) -> impl Iterator<Item = &str> {
        self.transcript
            .iter()
            .filter(|message| message.is_prompt())
            .map(|message| message.content.as_str())
    }

    /// The creation date in the given time zone.
    pub fn local_date<Tz: TimeZone>(&self, tz: &Tz) -> NaiveDate {
        self.created_at.with_timezone(tz).date_naive()
    }
}

/// The `limit` most recent entries of a newest-first list.
pub fn recent_entries(entries: &[JournalEntry], limit: usize) -> &[JournalEntry] {
    &entries[..entries.len().min(limit)]
}

/// Finds an entry by id.
pub fn find_entry<'a>(entries: &'a [JournalEntry], id: &EntryId) -> Option<&'a JournalEntry> {
    entries.iter().find(|entry| &entry.id == id)
}

/// Maps each day of a month to the most recent entry written on that day.
///
/// Days are computed in `tz`. Days without an entry are absent.
///
/// # Examples
///
/// ```
/// use ella::journal_core::{month_view, JournalEntry};
/// use ella::Mood;
/// use chrono::{TimeZone, Utc};
///
/// let created = Utc.with_ymd_and_hms(2024, 3, 9, 10, 0, 0).unwrap();
/// let entries = vec![JournalEntry::new(Mood::Good, vec![], &created)];
///
/// let view = month_view(&entries, 2024, 3, &Utc);
/// assert_eq!(view.get(&9).map(|entry| entry.mood), Some(Mood::Good));
/// assert!(view.get(&10).is_none());
/// ```
pub fn month_view<'a, Tz: TimeZone>(
    entries: &'a [JournalEntry],
    year: i32,
    month: u32,
    tz: &Tz,
) -> BTreeMap<u32, &'a JournalEntry> {
    let mut days: BTreeMap<u32, &JournalEntry> = BTreeMap::new();
    for entry in entries {
        let date = entry.local_date(tz);
        if date.year() != year || date.month() != month {
            continue;
        }
        days.entry(date.day())
            .and_modify(|current| {
                if entry.created_at > current.created_at {
                    *current = entry;
                }
            })
            .or_insert(entry);
    }
    days
}
