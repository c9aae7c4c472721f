//! Obtaining the journal passphrase.
//!
//! The passphrase comes from `ELLA_PASSPHRASE` when set, otherwise from a
//! hidden terminal prompt. It is never stored.

use crate::config::Config;
use crate::errors::{AppResult, CryptoError};
use age::secrecy::SecretString;
use tracing::debug;

/// Resolves the passphrase for this invocation.
///
/// # Errors
///
/// Returns `CryptoError::PassphrasePrompt` if the terminal cannot be read and
/// `CryptoError::EmptyPassphrase` if the passphrase is empty.
pub fn resolve_passphrase(config: &Config) -> AppResult<SecretString> {
    if let Some(passphrase) = &config.passphrase {
        debug!("Using passphrase from environment");
        return validate(passphrase.clone());
    }

    debug!("Prompting for passphrase");
    let passphrase = rpassword::prompt_password("Journal passphrase: ")
        .map_err(|e| CryptoError::PassphrasePrompt(e.to_string()))?;
    validate(passphrase)
}

fn validate(passphrase: String) -> AppResult<SecretString> {
    if passphrase.is_empty() {
        return Err(CryptoError::EmptyPassphrase.into());
    }
    Ok(SecretString::new(passphrase))
}
