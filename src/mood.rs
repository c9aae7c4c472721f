//! The five moods a journal entry can be tagged with.

use crate::errors::ValidationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How the user is feeling when they start an entry.
///
/// The serialized labels match the stored entry format, so `OkMeh`
/// is written as `"OK/Meh"`.
///
/// # Examples
///
/// ```
/// use ella::Mood;
///
/// let mood: Mood = "ok/meh".parse().unwrap();
/// assert_eq!(mood, Mood::OkMeh);
/// assert_eq!(mood.label(), "OK/Meh");
/// assert_eq!(mood.lowercase(), "ok/meh");
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mood {
    Great,
    Good,
    #[default]
    #[serde(rename = "OK/Meh")]
    OkMeh,
    Low,
    Doomed,
}

impl Mood {
    /// All moods in picker order.
    pub const ALL: [Mood; 5] = [Mood::Great, Mood::Good, Mood::OkMeh, Mood::Low, Mood::Doomed];

    /// The display label, identical to the serialized form.
    pub fn label(self) -> &'static str {
        match self {
            Mood::Great => "Great",
            Mood::Good => "Good",
            Mood::OkMeh => "OK/Meh",
            Mood::Low => "Low",
            Mood::Doomed => "Doomed",
        }
    }

    /// The label as it reads inside a sentence.
    pub fn lowercase(self) -> String {
        self.label().to_lowercase()
    }

    pub fn emoji(self) -> &'static str {
        match self {
            Mood::Great => "😄",
            Mood::Good => "🙂",
            Mood::OkMeh => "😐",
            Mood::Low => "😔",
            Mood::Doomed => "😞",
        }
    }
}

impl fmt::Display for Mood {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Mood {
    type Err = ValidationError;

    /// Parses a mood case-insensitively. `ok`, `meh` and `ok-meh` are
    /// accepted for `OK/Meh` since a slash is awkward on a command line.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "great" => Ok(Mood::Great),
            "good" => Ok(Mood::Good),
            "ok/meh" | "ok-meh" | "ok" | "meh" => Ok(Mood::OkMeh),
            "low" => Ok(Mood::Low),
            "doomed" => Ok(Mood::Doomed),
            _ => Err(ValidationError::UnknownMood(s.to_string())),
        }
    }
}
