//! Cryptographic operations for journal encryption.
//!
//! This module encrypts the serialized entry list with the age format using
//! passphrase-based encryption, and obtains that passphrase from the
//! environment or the terminal.
//!
//! # Module Structure
//!
//! - `age`: Armored encryption/decryption functions using the age crate
//! - `passphrase`: Passphrase resolution
//!
//! # Example
//!
//! ```no_run
//! use ella::crypto::{decrypt_armored, encrypt_armored};
//! use age::secrecy::SecretString;
//!
//! let passphrase = SecretString::new("my-secret".to_string());
//! let armored = encrypt_armored(b"Secret journal entry", &passphrase)?;
//! let decrypted = decrypt_armored(&armored, &passphrase)?;
//! assert_eq!(b"Secret journal entry", decrypted.as_slice());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod age;
pub mod passphrase;

pub use self::age::{decrypt_armored, encrypt_armored};
pub use self::passphrase::resolve_passphrase;
