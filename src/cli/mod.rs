use crate::constants::RECENT_ENTRIES_LIMIT;
use crate::mood::Mood;
use clap::{Parser, Subcommand, ValueEnum};

/// A mood journal that asks the right question
#[derive(Parser, Debug)]
#[clap(name = "ella", about = "A mood journal that asks the right question")]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Print verbose output
    #[clap(short = 'v', long, global = true)]
    pub verbose: bool,

    #[clap(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Command {
    /// Write a new entry as a short guided conversation (the default)
    Write {
        /// How you are feeling: great, good, ok/meh, low or doomed
        #[clap(short = 'm', long, default_value = "ok/meh")]
        mood: Mood,
    },

    /// Print the question a new entry would open with
    Prompt {
        /// How you are feeling: great, good, ok/meh, low or doomed
        #[clap(short = 'm', long, default_value = "ok/meh")]
        mood: Mood,
    },

    /// List the most recent entries
    List {
        /// Number of entries to show
        #[clap(short = 'n', long, default_value_t = RECENT_ENTRIES_LIMIT)]
        limit: usize,
    },

    /// Show the full conversation of one entry
    Show {
        /// Entry id as printed by `list`
        id: String,
    },

    /// Show which days of a month have entries
    Calendar {
        /// Month to show (format: YYYY-MM), defaults to the current month
        #[clap(long)]
        month: Option<String>,
    },

    /// Delete every entry
    DeleteAll {
        /// Confirm the deletion
        #[clap(long)]
        yes: bool,
    },

    /// Show or update your display name and e-mail
    Profile {
        #[clap(long)]
        name: Option<String>,
        #[clap(long)]
        email: Option<String>,
    },

    /// Show or change the theme
    Theme {
        choice: Option<ThemeChoice>,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ThemeChoice {
    Light,
    Dark,
    Toggle,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }

    /// The command to run; writing an entry when none is given.
    pub fn command(&self) -> Command {
        match &self.command {
            Some(Command::Write { mood }) => Command::Write { mood: *mood },
            Some(Command::Prompt { mood }) => Command::Prompt { mood: *mood },
            Some(Command::List { limit }) => Command::List { limit: *limit },
            Some(Command::Show { id }) => Command::Show { id: id.clone() },
            Some(Command::Calendar { month }) => Command::Calendar {
                month: month.clone(),
            },
            Some(Command::DeleteAll { yes }) => Command::DeleteAll { yes: *yes },
            Some(Command::Profile { name, email }) => Command::Profile {
                name: name.clone(),
                email: email.clone(),
            },
            Some(Command::Theme { choice }) => Command::Theme { choice: *choice },
            None => Command::Write {
                mood: Mood::default(),
            },
        }
    }
}
