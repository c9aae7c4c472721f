//! Interactive entry writing.
//!
//! The chat runs over any line reader and writer so the same loop serves a
//! terminal and a test harness.

use crate::constants::{CHAT_CANCEL_COMMAND, CHAT_FINISH_COMMAND};
use crate::errors::AppResult;
use crate::journal_core::prompts::CLOSING_MESSAGE;
use crate::journal_core::EntryId;
use crate::journal_io::store::KeyValueStore;
use crate::journal_io::Journal;
use crate::mood::Mood;
use chrono::Local;
use std::io::{BufRead, Write};
use tracing::{debug, info};

/// How a chat session ended.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChatOutcome {
    Saved(EntryId),
    Discarded,
}

/// Runs one journaling conversation and saves it as an entry.
///
/// Each line read from `input` is one response. Blank lines are ignored and
/// the user is asked again. The session ends with `/done`, which saves the
/// entry, or `/cancel`, which discards it. End of input saves the entry if
/// anything was written and discards it otherwise.
///
/// # Errors
///
/// Returns an error if reading input, writing output or saving the entry
/// fails.
pub fn write_entry<S, R, W>(
    journal: &mut Journal<S>,
    mood: Mood,
    greeting_name: &str,
    input: R,
    output: &mut W,
) -> AppResult<ChatOutcome>
where
    S: KeyValueStore,
    R: BufRead,
    W: Write,
{
    writeln!(
        output,
        "How are you feeling today, {}? {} {}",
        greeting_name,
        mood.emoji(),
        mood.label()
    )?;
    writeln!(
        output,
        "(Type {} to save this entry or {} to discard it.)",
        CHAT_FINISH_COMMAND, CHAT_CANCEL_COMMAND
    )?;

    let mut chat = journal.start_chat(mood);
    let mut lines = input.lines();
    let mut show_prompt = true;

    loop {
        if show_prompt {
            if let Some(prompt) = chat.current_prompt() {
                writeln!(output, "\nElla: {}", prompt)?;
            }
        }
        write!(output, "You: ")?;
        output.flush()?;

        let line = match lines.next() {
            Some(line) => line?,
            None => {
                writeln!(output)?;
                if chat.exchanges() == 0 {
                    return discard(output);
                }
                break;
            }
        };

        match line.trim() {
            CHAT_FINISH_COMMAND => break,
            CHAT_CANCEL_COMMAND => return discard(output),
            _ => {}
        }

        show_prompt = match chat.respond(&line) {
            Ok(_) => true,
            Err(_) => {
                debug!("Ignoring blank response");
                false
            }
        };
    }

    let exchanges = chat.exchanges();
    let saved = journal.add_entry(chat.finish(&Local::now()))?;
    let id = saved.id.clone();
    info!(id = %id, mood = %mood, exchanges, "Wrote entry");

    writeln!(output, "\nElla: {}", CLOSING_MESSAGE)?;
    writeln!(output, "Saved entry {}", id)?;
    Ok(ChatOutcome::Saved(id))
}

/// Prints the prompt a new entry in `mood` would open with.
pub fn show_next_prompt<S: KeyValueStore, W: Write>(
    journal: &Journal<S>,
    mood: Mood,
    output: &mut W,
) -> AppResult<()> {
    writeln!(output, "{}", journal.next_prompt(mood))?;
    Ok(())
}

fn discard<W: Write>(output: &mut W) -> AppResult<ChatOutcome> {
    info!("Discarded entry");
    writeln!(output, "Entry discarded.")?;
    Ok(ChatOutcome::Discarded)
}
