//! Age encryption of the entry blob.
//!
//! Entries are encrypted with the age passphrase recipient and wrapped in
//! ASCII armor, so the ciphertext is plain text that fits a string-valued
//! key-value store.

use crate::errors::{AppResult, CryptoError, DecodeError};
use age::armor::{ArmoredReader, ArmoredWriter, Format};
use age::secrecy::{ExposeSecret, SecretString};
use std::io::{Read, Write};
use tracing::debug;
use zeroize::Zeroizing;

/// Encrypt data with a passphrase, returning armored ciphertext.
///
/// # Example
///
/// ```no_run
/// use ella::crypto::encrypt_armored;
/// use age::secrecy::SecretString;
///
/// let passphrase = SecretString::new("my-secret-passphrase".to_string());
/// let armored = encrypt_armored(b"Secret data", &passphrase)?;
/// assert!(armored.starts_with("-----BEGIN AGE ENCRYPTED FILE-----"));
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn encrypt_armored(plaintext: &[u8], passphrase: &SecretString) -> AppResult<String> {
    let encryptor =
        age::Encryptor::with_user_passphrase(SecretString::new(passphrase.expose_secret().clone()));

    let mut output = Vec::new();
    let armor = ArmoredWriter::wrap_output(&mut output, Format::AsciiArmor)
        .map_err(CryptoError::EncryptionFailed)?;
    let mut writer = encryptor
        .wrap_output(armor)
        .map_err(CryptoError::Encryptor)?;
    writer
        .write_all(plaintext)
        .map_err(CryptoError::EncryptionFailed)?;
    writer
        .finish()
        .and_then(|armor| armor.finish())
        .map_err(CryptoError::EncryptionFailed)?;

    debug!(bytes = plaintext.len(), "Encrypted payload");
    // Armor output is always ASCII.
    Ok(String::from_utf8_lossy(&output).into_owned())
}

/// Decrypt armored ciphertext produced by [`encrypt_armored`].
///
/// The returned buffer is zeroized when dropped.
///
/// # Errors
///
/// - `DecodeError::Ciphertext` if the input is not age ciphertext or the
///   passphrase is wrong
/// - `DecodeError::UnsupportedFormat` if the input is encrypted to recipients
/// - `DecodeError::Payload` if the ciphertext body is damaged
pub fn decrypt_armored(
    armored: &str,
    passphrase: &SecretString,
) -> Result<Zeroizing<Vec<u8>>, DecodeError> {
    let reader = ArmoredReader::new(armored.as_bytes());
    let decryptor = match age::Decryptor::new(reader).map_err(DecodeError::Ciphertext)? {
        age::Decryptor::Passphrase(decryptor) => decryptor,
        _ => return Err(DecodeError::UnsupportedFormat),
    };

    let mut stream = decryptor
        .decrypt(passphrase, None)
        .map_err(DecodeError::Ciphertext)?;

    let mut plaintext = Zeroizing::new(Vec::new());
    stream
        .read_to_end(&mut plaintext)
        .map_err(DecodeError::Payload)?;

    debug!(bytes = plaintext.len(), "Decrypted payload");
    Ok(plaintext)
}
