//! Profile, theme and first-run notice commands.

use crate::cli::ThemeChoice;
use crate::constants::ONBOARDING_NOTICE;
use crate::errors::AppResult;
use crate::journal_io::settings::{
    load_profile, load_theme, save_profile, save_theme, take_onboarding_notice, Theme,
};
use crate::journal_io::store::KeyValueStore;
use std::io::Write;
use tracing::info;

/// Shows the stored profile, or updates the fields that were given.
pub fn update_profile<S: KeyValueStore + ?Sized, W: Write>(
    store: &mut S,
    name: Option<String>,
    email: Option<String>,
    output: &mut W,
) -> AppResult<()> {
    let mut profile = load_profile(store)?;

    if name.is_none() && email.is_none() {
        writeln!(output, "Name:   {}", or_unset(&profile.name))?;
        writeln!(output, "E-mail: {}", or_unset(&profile.email))?;
        return Ok(());
    }

    if let Some(name) = name {
        profile.name = name.trim().to_string();
    }
    if let Some(email) = email {
        profile.email = email.trim().to_string();
    }
    save_profile(store, &profile)?;
    info!("Updated profile");
    writeln!(output, "Profile updated. Hello, {}!", profile.greeting_name())?;
    Ok(())
}

/// Shows the theme, or sets or toggles it. Returns the theme in effect.
pub fn change_theme<S: KeyValueStore + ?Sized, W: Write>(
    store: &mut S,
    choice: Option<ThemeChoice>,
    output: &mut W,
) -> AppResult<Theme> {
    let current = load_theme(store)?;
    let theme = match choice {
        None => current,
        Some(ThemeChoice::Light) => Theme::Light,
        Some(ThemeChoice::Dark) => Theme::Dark,
        Some(ThemeChoice::Toggle) => current.toggled(),
    };

    if choice.is_some() {
        save_theme(store, theme)?;
        info!(theme = %theme, "Changed theme");
    }
    writeln!(output, "Theme: {}", theme)?;
    Ok(theme)
}

/// Prints the onboarding notice the first time it is called for a store.
pub fn show_onboarding_notice<S: KeyValueStore + ?Sized, W: Write>(
    store: &mut S,
    output: &mut W,
) -> AppResult<()> {
    if take_onboarding_notice(store)? {
        writeln!(output, "{}\n", ONBOARDING_NOTICE)?;
    }
    Ok(())
}

fn or_unset(value: &str) -> &str {
    if value.is_empty() {
        "(not set)"
    } else {
        value
    }
}
