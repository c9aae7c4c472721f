/*!
# Ella

Ella is a mood journal that asks the right question. Each entry starts with
a mood and turns into a short conversation: Ella opens with a prompt chosen
from what you wrote before, listens to your answers, and stores the whole
exchange encrypted on disk.

## Core Features

- Mood-aware opening prompts that recall the same weekday last week, notice
  when today differs from your usual mood, and avoid repeating recent prompts
- Entries kept as one passphrase-encrypted blob
- Recent entries list, single-entry view and a month calendar
- Local profile and theme preferences

## Architecture

- `mood`: the five moods an entry is tagged with
- `journal_core`: entry model, prompt selection and the chat session
- `journal_io`: key-value stores, the entry codec and the [`Journal`] itself
- `crypto`: age passphrase encryption and passphrase resolution
- `config`: environment-based configuration
- `ops`: user-facing commands
- `cli`: command-line parsing using clap
- `errors`: error handling infrastructure

## Usage Example

```rust,no_run
use ella::journal_io::codec::EntryCodec;
use ella::journal_io::store::FileStore;
use ella::{Config, Journal, Mood};

fn main() -> ella::AppResult<()> {
    let config = Config::load()?;
    config.validate()?;

    let passphrase = ella::crypto::resolve_passphrase(&config)?;
    let store = FileStore::open(&config.data_dir)?;
    let journal = Journal::open(store, EntryCodec::new(passphrase))?;

    println!("{}", journal.next_prompt(Mood::Good));
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// Application-wide constants
pub mod constants;
/// Passphrase encryption of the entry blob
pub mod crypto;
/// Error types and utilities for error handling
pub mod errors;
/// Entry model, prompt selection and chat sessions
pub mod journal_core;
/// Stores, codec and the persisted journal
pub mod journal_io;
/// Entry moods
pub mod mood;
/// User-facing commands
pub mod ops;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use journal_core::{ChatMessage, EntryId, JournalEntry};
pub use journal_io::Journal;
pub use mood::Mood;
