//! Constants used throughout the application.
//!
//! This module contains all constants used in the Ella application, organized
//! into logical groups. Having constants centralized makes them easier to find,
//! modify, and reference consistently.

// Application Metadata
/// The name of the application.
pub const APP_NAME: &str = "ella";
/// The description of the application used in CLI help text.
pub const APP_DESCRIPTION: &str = "A mood journal that asks the right question";

// CLI Arguments & Defaults
/// Log format identifier for plain text.
pub const LOG_FORMAT_TEXT: &str = "text";
/// Log format identifier for JSON.
pub const LOG_FORMAT_JSON: &str = "json";
/// Log level used when `RUST_LOG` is not set.
pub const DEFAULT_LOG_LEVEL: &str = "warn";
/// Log level used with `--verbose` when `RUST_LOG` is not set.
pub const VERBOSE_LOG_LEVEL: &str = "debug";
/// Input that ends a chat session and saves the entry.
pub const CHAT_FINISH_COMMAND: &str = "/done";
/// Input that abandons a chat session without saving.
pub const CHAT_CANCEL_COMMAND: &str = "/cancel";

// Configuration Keys & Environment Variables
/// Environment variable for specifying the Ella data directory.
pub const ENV_VAR_ELLA_DIR: &str = "ELLA_DIR";
/// Environment variable supplying the journal passphrase non-interactively.
pub const ENV_VAR_ELLA_PASSPHRASE: &str = "ELLA_PASSPHRASE";
/// Environment variable selecting the log output format.
pub const ENV_VAR_ELLA_LOG_FORMAT: &str = "ELLA_LOG_FORMAT";
/// Standard environment variable for the user's home directory.
pub const ENV_VAR_HOME: &str = "HOME";
/// Default sub-directory name for Ella data within the user's home directory.
pub const DEFAULT_DATA_SUBDIR: &str = ".ella";

// Store Keys
/// Key holding the encrypted entry list.
pub const STORE_KEY_ENTRIES: &str = "ellaEntries";
/// Prefix of the keys receiving copies of entry blobs that could not be decoded.
pub const STORE_KEY_ENTRIES_UNREADABLE: &str = "ellaEntriesUnreadable";
/// Key holding the display name.
pub const STORE_KEY_USER_NAME: &str = "ellaUserName";
/// Key holding the contact address.
pub const STORE_KEY_USER_EMAIL: &str = "ellaUserEmail";
/// Key holding the theme preference.
pub const STORE_KEY_THEME: &str = "ellaTheme";
/// Key set once the onboarding notice has been shown.
pub const STORE_KEY_ACCOUNT_NOTIFICATION: &str = "ellaAccountNotification";
/// Name of the lock file guarding store writes.
pub const STORE_LOCK_FILE: &str = ".ella.lock";

// Validation
/// Placeholder string for redacted information in debug output.
pub const REDACTED_PLACEHOLDER: &str = "[REDACTED]";
/// Greeting name used when no display name is stored.
pub const DEFAULT_GREETING_NAME: &str = "friend";

// File System Parameters
/// Default POSIX permissions for newly created directories (owner read/write/execute).
#[cfg(unix)]
pub const DEFAULT_DIR_PERMISSIONS: u32 = 0o700;
/// Default POSIX permissions for newly created files (owner read/write).
#[cfg(unix)]
pub const DEFAULT_FILE_PERMISSIONS: u32 = 0o600;

// Prompt Selection
/// How far back, in days, the same-weekday recall looks.
pub const RECALL_DAYS: i64 = 7;
/// Number of most recent entries considered for mood drift.
pub const DRIFT_WINDOW: usize = 5;
/// Number of most recent entries whose prompts count as already used.
pub const USED_PROMPT_WINDOW: usize = 3;
/// Number of entries shown in the recent entries list.
pub const RECENT_ENTRIES_LIMIT: usize = 5;

// Date/Time Logic
/// Date format used when listing entries.
pub const ENTRY_LIST_DATE_FORMAT: &str = "%A, %B %d, %Y %H:%M";
/// Format accepted by `calendar --month`.
pub const MONTH_FORMAT: &str = "%Y-%m";

// Logging Configuration
/// Service name used in tracing spans and structured logs.
pub const TRACING_SERVICE_NAME: &str = "ella";
/// Name for the root tracing span covering an application invocation.
pub const TRACING_ROOT_SPAN_NAME: &str = "app_invocation";

// Onboarding
/// Notice shown once on first run.
pub const ONBOARDING_NOTICE: &str = "You can enhance your journaling experience by creating an account, but it's completely optional. All features are available without an account.";
