//! User-facing commands.
//!
//! Each operation writes its output to a caller-supplied writer and leaves
//! process concerns (terminal, exit codes, logging setup) to `main`.

pub mod history;
pub mod preferences;
pub mod write;

pub use history::{delete_all_entries, list_entries, show_calendar, show_entry};
pub use preferences::{change_theme, show_onboarding_notice, update_profile};
pub use write::{show_next_prompt, write_entry, ChatOutcome};
