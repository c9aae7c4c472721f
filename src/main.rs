/*!
# Ella - A Mood Journal

Ella records how you feel as a short conversation. Pick a mood, answer the
question Ella opens with, and the exchange is saved encrypted in your data
directory.

## Usage

```
ella [OPTIONS] [COMMAND]

Commands:
  write       Write a new entry as a short guided conversation (the default)
  prompt      Print the question a new entry would open with
  list        List the most recent entries
  show        Show the full conversation of one entry
  calendar    Show which days of a month have entries
  delete-all  Delete every entry
  profile     Show or update your display name and e-mail
  theme       Show or change the theme

Options:
  -v, --verbose  Print verbose output
  -h, --help     Print help
  -V, --version  Print version
```

## Configuration

- `ELLA_DIR`: the data directory (defaults to `~/.ella`)
- `ELLA_PASSPHRASE`: the journal passphrase; prompted for when unset
- `ELLA_LOG_FORMAT`: `text` (default) or `json`
- `RUST_LOG`: log filter directives
*/

use chrono::Local;
use ella::cli::{CliArgs, Command};
use ella::config::Config;
use ella::constants::{
    DEFAULT_LOG_LEVEL, TRACING_ROOT_SPAN_NAME, TRACING_SERVICE_NAME, VERBOSE_LOG_LEVEL,
};
use ella::crypto::resolve_passphrase;
use ella::errors::AppResult;
use ella::journal_io::codec::EntryCodec;
use ella::journal_io::settings::load_profile;
use ella::journal_io::store::FileStore;
use ella::journal_io::Journal;
use ella::ops;
use std::io::{self, Write};
use std::process;
use tracing::{debug, info, info_span};
use tracing_subscriber::fmt::time::ChronoUtc;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{fmt, EnvFilter};

fn main() {
    let args = CliArgs::parse();
    let config = Config::load();

    let json_logs = config.as_ref().map(Config::json_logs).unwrap_or(false);
    init_tracing(json_logs, args.verbose);

    let span = info_span!(
        TRACING_ROOT_SPAN_NAME,
        service = TRACING_SERVICE_NAME,
        correlation_id = %uuid::Uuid::new_v4()
    );
    let _guard = span.enter();

    if let Err(e) = config.and_then(|config| run(&config, args.command())) {
        debug!(error = ?e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

/// Sets up the global subscriber. `RUST_LOG` overrides the level chosen here.
fn init_tracing(json: bool, verbose: bool) {
    let default_level = if verbose {
        VERBOSE_LOG_LEVEL
    } else {
        DEFAULT_LOG_LEVEL
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let registry = tracing_subscriber::registry().with(filter);

    if json {
        registry
            .with(
                fmt::layer()
                    .json()
                    .with_timer(ChronoUtc::rfc_3339())
                    .with_current_span(true)
                    .with_span_list(false)
                    .with_writer(io::stderr),
            )
            .init();
    } else {
        registry
            .with(fmt::layer().with_target(false).with_writer(io::stderr))
            .init();
    }
}

fn run(config: &Config, command: Command) -> AppResult<()> {
    config.validate()?;
    debug!(config = ?config, "Loaded configuration");

    let mut store = FileStore::open(&config.data_dir)?;
    ops::show_onboarding_notice(&mut store, &mut io::stderr())?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match command {
        Command::Profile { name, email } => {
            return ops::update_profile(&mut store, name, email, &mut out);
        }
        Command::Theme { choice } => {
            ops::change_theme(&mut store, choice, &mut out)?;
            return Ok(());
        }
        _ => {}
    }

    let passphrase = resolve_passphrase(config)?;
    let mut journal = Journal::open(store, EntryCodec::new(passphrase))?;
    if journal.had_unreadable_entries() {
        eprintln!(
            "Warning: your saved entries could not be read with this passphrase. \
             A copy will be kept aside when the next entry is saved."
        );
    }

    let now = Local::now();
    match command {
        Command::Write { mood } => {
            let profile = load_profile(journal.store())?;
            let stdin = io::stdin();
            let outcome = ops::write_entry(
                &mut journal,
                mood,
                profile.greeting_name(),
                stdin.lock(),
                &mut out,
            )?;
            info!(outcome = ?outcome, "Chat finished");
            if let Some(key) = journal.last_backup_key() {
                eprintln!("The unreadable entries were kept in {}.", key);
            }
        }
        Command::Prompt { mood } => ops::show_next_prompt(&journal, mood, &mut out)?,
        Command::List { limit } => ops::list_entries(journal.entries(), limit, &Local, &mut out)?,
        Command::Show { id } => ops::show_entry(journal.entries(), &id, &Local, &mut out)?,
        Command::Calendar { month } => {
            ops::show_calendar(journal.entries(), month.as_deref(), &now, &mut out)?
        }
        Command::DeleteAll { yes } => ops::delete_all_entries(&mut journal, yes, &mut out)?,
        Command::Profile { .. } | Command::Theme { .. } => {}
    }

    out.flush()?;
    Ok(())
}
