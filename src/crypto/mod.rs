//! Cryptographic primitives for pwvault.
//!
//! This module provides:
//! - AES-256-GCM encryption and decryption (`encryption`)
//! - PBKDF2-HMAC-SHA256 passphrase key derivation and salts (`kdf`)
//! - The zeroize-on-drop `VaultKey` holder (`keys`)
//!
//! Nothing in here touches the filesystem or knows about entries.

pub mod encryption;
pub mod kdf;
pub mod keys;

pub use encryption::{decrypt, encrypt, MIN_CIPHERTEXT_LEN, NONCE_LEN, TAG_LEN};
pub use kdf::{derive_key, generate_salt, Salt, PBKDF2_ITERATIONS, SALT_LEN};
pub use keys::{VaultKey, KEY_LEN};
