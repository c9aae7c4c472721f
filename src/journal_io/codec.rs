//! Turning the entry list into an encrypted text blob and back.

use crate::crypto::{decrypt_armored, encrypt_armored};
use crate::errors::{AppError, AppResult, DecodeError};
use crate::journal_core::JournalEntry;
use age::secrecy::SecretString;
use zeroize::Zeroizing;

/// Encrypts and decrypts the full entry list under one passphrase.
///
/// The list is serialized as a JSON array in its stored order, then
/// age-encrypted and armored.
///
/// # Examples
///
/// ```no_run
/// use ella::journal_io::codec::EntryCodec;
/// use age::secrecy::SecretString;
///
/// let codec = EntryCodec::new(SecretString::new("my-secret".to_string()));
/// let blob = codec.encode(&[])?;
/// assert!(codec.decode(&blob)?.is_empty());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub struct EntryCodec {
    passphrase: SecretString,
}

impl EntryCodec {
    pub fn new(passphrase: SecretString) -> Self {
        Self { passphrase }
    }

    /// Serializes and encrypts `entries`.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Serialize` or `AppError::Crypto` if the blob cannot
    /// be produced.
    pub fn encode(&self, entries: &[JournalEntry]) -> AppResult<String> {
        let json = Zeroizing::new(serde_json::to_vec(entries).map_err(AppError::Serialize)?);
        encrypt_armored(&json, &self.passphrase)
    }

    /// Decrypts and parses a blob produced by [`EntryCodec::encode`].
    ///
    /// # Errors
    ///
    /// Returns a `DecodeError` if the blob is not ciphertext for this
    /// passphrase or the payload does not match the entry schema.
    pub fn decode(&self, blob: &str) -> Result<Vec<JournalEntry>, DecodeError> {
        let plaintext = decrypt_armored(blob.trim(), &self.passphrase)?;
        let text = std::str::from_utf8(&plaintext)?;
        Ok(serde_json::from_str(text)?)
    }
}
