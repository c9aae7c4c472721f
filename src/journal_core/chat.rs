//! The conversation behind a single journal entry.

use crate::errors::ValidationError;
use crate::journal_core::prompts::{CLOSING_MESSAGE, FILLER_PROMPT};
use crate::journal_core::{ChatMessage, JournalEntry};
use crate::mood::Mood;
use chrono::{DateTime, TimeZone};

/// An entry being written.
///
/// The session owns the transcript until [`ChatSession::finish`] turns it
/// into an immutable [`JournalEntry`]. Every accepted response is answered
/// with the filler prompt.
///
/// # Examples
///
/// ```
/// use ella::journal_core::chat::ChatSession;
/// use ella::Mood;
/// use chrono::Utc;
///
/// let mut session = ChatSession::start(Mood::Good, "What made you smile today?");
/// session.respond("A long walk.")?;
/// assert_eq!(session.exchanges(), 1);
///
/// let entry = session.finish(&Utc::now());
/// assert_eq!(entry.transcript.len(), 4);
/// # Ok::<(), ella::errors::ValidationError>(())
/// ```
#[derive(Debug, Clone)]
pub struct ChatSession {
    mood: Mood,
    messages: Vec<ChatMessage>,
    exchanges: usize,
}

impl ChatSession {
    /// Starts a session with its opening prompt.
    pub fn start(mood: Mood, opening_prompt: impl Into<String>) -> Self {
        Self {
            mood,
            messages: vec![ChatMessage::prompt(opening_prompt)],
            exchanges: 0,
        }
    }

    pub fn mood(&self) -> Mood {
        self.mood
    }

    /// The transcript so far, oldest first.
    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Number of responses accepted so far.
    pub fn exchanges(&self) -> usize {
        self.exchanges
    }

    /// The prompt currently awaiting a response.
    pub fn current_prompt(&self) -> Option<&str> {
        self.messages
            .last()
            .filter(|message| message.is_prompt())
            .map(|message| message.content.as_str())
    }

    /// Records a response and returns the follow-up prompt.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyResponse` if `text` is empty after
    /// trimming. The transcript is left unchanged.
    pub fn respond(&mut self, text: &str) -> Result<&str, ValidationError> {
        if text.trim().is_empty() {
            return Err(ValidationError::EmptyResponse);
        }

        self.messages.push(ChatMessage::response(text));
        self.exchanges += 1;
        self.messages.push(ChatMessage::prompt(FILLER_PROMPT));
        Ok(FILLER_PROMPT)
    }

    /// Closes the conversation and produces the entry created at `now`.
    pub fn finish<Tz: TimeZone>(mut self, now: &DateTime<Tz>) -> JournalEntry {
        self.messages.push(ChatMessage::prompt(CLOSING_MESSAGE));
        JournalEntry::new(self.mood, self.messages, now)
    }
}
