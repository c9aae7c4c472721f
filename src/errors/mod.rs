//! Error handling utilities for the ella application.
//!
//! This module provides the central error type `AppError` which represents all
//! possible error conditions that might occur in the application, as well as the
//! convenience type alias `AppResult` for functions that can return these errors.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Represents errors that can occur when attempting to lock the entry store.
///
/// # Examples
///
/// Creating a file busy error:
///
/// ```
/// use ella::errors::LockError;
/// use std::path::PathBuf;
///
/// let error = LockError::FileBusy {
///     path: PathBuf::from("/path/to/.ella.lock"),
/// };
///
/// assert!(format!("{}", error).contains("another ella process"));
/// ```
#[derive(Debug, Error)]
pub enum LockError {
    /// Error when the store is already locked by another process.
    #[error("Journal store is currently being written by another ella process: {path}. Please wait for it to finish and try again.")]
    FileBusy {
        /// The path to the lock file that is held
        path: PathBuf,
    },

    /// Error when acquiring the lock fails for a technical reason.
    #[error("Failed to acquire lock {path}: {source}. Please check file permissions and ensure the directory is accessible.")]
    AcquisitionFailed {
        /// The path to the lock file that couldn't be locked
        path: PathBuf,
        /// The underlying I/O error
        #[source]
        source: io::Error,
    },
}

/// Represents specific error cases that can occur while encrypting entries
/// or obtaining the passphrase.
///
/// # Examples
///
/// ```
/// use ella::errors::CryptoError;
///
/// let error = CryptoError::EmptyPassphrase;
/// assert!(format!("{}", error).contains("empty"));
/// ```
#[derive(Debug, Error)]
pub enum CryptoError {
    /// The passphrase could not be read from the terminal.
    #[error("Failed to read passphrase: {0}")]
    PassphrasePrompt(String),

    /// An empty passphrase was supplied.
    #[error("Passphrase cannot be empty")]
    EmptyPassphrase,

    /// Error during encryption operation.
    #[error("Encryption failed: {0}")]
    EncryptionFailed(#[source] io::Error),

    /// The age encryptor could not be set up for the output stream.
    #[error("Encryption failed: {0}")]
    Encryptor(#[source] age::EncryptError),
}

/// The stored entry blob could not be turned back into entries.
///
/// Callers loading the journal treat every variant the same way: the
/// journal starts from an empty entry list.
///
/// # Examples
///
/// ```
/// use ella::errors::DecodeError;
///
/// let error = DecodeError::UnsupportedFormat;
/// assert!(format!("{}", error).contains("passphrase"));
/// ```
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The blob is not valid age ciphertext, or the passphrase is wrong.
    #[error("Stored entries could not be decrypted: {0}")]
    Ciphertext(#[source] age::DecryptError),

    /// The blob was encrypted to recipients rather than a passphrase.
    #[error("Stored entries are not protected by a passphrase")]
    UnsupportedFormat,

    /// The ciphertext body was truncated or tampered with.
    #[error("Stored entries are corrupt: {0}")]
    Payload(#[source] io::Error),

    /// The decrypted payload is not UTF-8 text.
    #[error("Stored entries are not valid text: {0}")]
    Utf8(#[from] std::str::Utf8Error),

    /// The decrypted payload does not match the entry schema.
    #[error("Stored entries do not match the entry schema: {0}")]
    Schema(#[from] serde_json::Error),
}

/// User input rejected before it reaches the journal.
///
/// # Examples
///
/// ```
/// use ella::errors::ValidationError;
///
/// let error = ValidationError::EmptyResponse;
/// assert_eq!(format!("{}", error), "Response cannot be empty");
/// ```
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A chat response that is empty after trimming.
    #[error("Response cannot be empty")]
    EmptyResponse,

    /// A mood label that is not one of the five moods.
    #[error("Unknown mood '{0}'. Expected one of: great, good, ok/meh, low, doomed")]
    UnknownMood(String),

    /// A theme name other than light or dark.
    #[error("Unknown theme '{0}'. Expected light or dark")]
    UnknownTheme(String),
}

/// Represents all possible errors that can occur in the ella application.
///
/// # Examples
///
/// Creating a configuration error:
/// ```
/// use ella::errors::AppError;
///
/// let error = AppError::Config("Missing data directory".to_string());
/// assert_eq!(format!("{}", error), "Configuration error: Missing data directory");
/// ```
///
/// Converting from an IO error:
/// ```
/// use ella::errors::AppError;
/// use std::io::{self, ErrorKind};
///
/// let io_error = io::Error::new(ErrorKind::NotFound, "file not found");
/// let app_error: AppError = io_error.into();
///
/// match app_error {
///     AppError::Io(inner) => assert_eq!(inner.kind(), ErrorKind::NotFound),
///     _ => panic!("Expected Io variant"),
/// }
/// ```
#[derive(Debug, Error)]
pub enum AppError {
    /// Errors related to configuration loading or validation.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Input/output errors from filesystem operations.
    ///
    /// This variant automatically converts from `std::io::Error` through the `From` trait.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Errors in journal logic (e.g., unknown entry id).
    #[error("Journal logic error: {0}")]
    Journal(String),

    /// Errors related to store locking.
    #[error("File locking error: {0}")]
    Lock(#[from] LockError),

    /// Errors related to encryption or passphrase handling.
    #[error("Cryptographic error: {0}")]
    Crypto(#[from] CryptoError),

    /// The stored entry blob is unreadable.
    #[error("Decode error: {0}")]
    Decode(#[from] DecodeError),

    /// Rejected user input.
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// Entries could not be serialized.
    #[error("Serialization error: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// A type alias for `Result<T, AppError>` to simplify function signatures.
///
/// # Examples
///
/// ```
/// use ella::errors::{AppResult, AppError};
///
/// fn might_fail() -> AppResult<String> {
///     if false {
///         return Err(AppError::Journal("Something went wrong".to_string()));
///     }
///     Ok("Operation succeeded".to_string())
/// }
/// ```
pub type AppResult<T> = Result<T, AppError>;
