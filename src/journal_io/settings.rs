//! Plain-text user preferences kept next to the entry blob.

use crate::constants::{
    DEFAULT_GREETING_NAME, STORE_KEY_ACCOUNT_NOTIFICATION, STORE_KEY_THEME, STORE_KEY_USER_EMAIL,
    STORE_KEY_USER_NAME,
};
use crate::errors::{AppResult, ValidationError};
use crate::journal_io::store::KeyValueStore;
use std::fmt;
use std::str::FromStr;
use tracing::{debug, warn};

/// Display name and contact address.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Profile {
    pub name: String,
    pub email: String,
}

impl Profile {
    /// The name used to greet the user, `friend` when none is set.
    ///
    /// ```
    /// use ella::journal_io::settings::Profile;
    ///
    /// assert_eq!(Profile::default().greeting_name(), "friend");
    /// let profile = Profile { name: "Robin".to_string(), email: String::new() };
    /// assert_eq!(profile.greeting_name(), "Robin");
    /// ```
    pub fn greeting_name(&self) -> &str {
        if self.name.trim().is_empty() {
            DEFAULT_GREETING_NAME
        } else {
            &self.name
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

impl fmt::Display for Theme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Theme {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "light" => Ok(Theme::Light),
            "dark" => Ok(Theme::Dark),
            _ => Err(ValidationError::UnknownTheme(s.to_string())),
        }
    }
}

pub fn load_profile<S: KeyValueStore + ?Sized>(store: &S) -> AppResult<Profile> {
    Ok(Profile {
        name: store.get(STORE_KEY_USER_NAME)?.unwrap_or_default(),
        email: store.get(STORE_KEY_USER_EMAIL)?.unwrap_or_default(),
    })
}

pub fn save_profile<S: KeyValueStore + ?Sized>(store: &mut S, profile: &Profile) -> AppResult<()> {
    store.set(STORE_KEY_USER_NAME, &profile.name)?;
    store.set(STORE_KEY_USER_EMAIL, &profile.email)?;
    debug!("Saved profile");
    Ok(())
}

/// Reads the theme preference. A missing or unrecognized value reads as
/// the light theme.
pub fn load_theme<S: KeyValueStore + ?Sized>(store: &S) -> AppResult<Theme> {
    match store.get(STORE_KEY_THEME)? {
        None => Ok(Theme::default()),
        Some(value) => Ok(value.parse().unwrap_or_else(|_| {
            warn!(value = %value, "Ignoring unrecognized stored theme");
            Theme::default()
        })),
    }
}

pub fn save_theme<S: KeyValueStore + ?Sized>(store: &mut S, theme: Theme) -> AppResult<()> {
    store.set(STORE_KEY_THEME, theme.as_str())
}

/// Returns `true` exactly once per data directory: the first call records
/// that the onboarding notice has been shown.
pub fn take_onboarding_notice<S: KeyValueStore + ?Sized>(store: &mut S) -> AppResult<bool> {
    if store.get(STORE_KEY_ACCOUNT_NOTIFICATION)?.is_some() {
        return Ok(false);
    }
    store.set(STORE_KEY_ACCOUNT_NOTIFICATION, "true")?;
    Ok(true)
}
