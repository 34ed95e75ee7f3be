//! Password-based key derivation using PBKDF2-HMAC-SHA256.
//!
//! The work factor is fixed at compile time.  Every vault ever written
//! was derived with the same iteration count, so there is nothing to
//! store in the file and nothing to negotiate on open.

use pbkdf2::pbkdf2_hmac;
use rand::rngs::OsRng;
use rand::TryRngCore;
use sha2::Sha256;

use super::keys::{VaultKey, KEY_LEN};
use crate::errors::{PwVaultError, Result};

/// Length of the salt in bytes (256 bits).
pub const SALT_LEN: usize = 32;

/// PBKDF2 iteration count.
pub const PBKDF2_ITERATIONS: u32 = 100_000;

/// A per-vault KDF salt.
pub type Salt = [u8; SALT_LEN];

/// Derive a 32-byte vault key from a passphrase and salt.
///
/// Deterministic: the same passphrase + salt always produce the same key.
pub fn derive_key(passphrase: &[u8], salt: &Salt) -> VaultKey {
    let mut key = [0u8; KEY_LEN];
    pbkdf2_hmac::<Sha256>(passphrase, salt, PBKDF2_ITERATIONS, &mut key);
    VaultKey::new(key)
}

/// Generate a cryptographically random 32-byte salt from the OS CSPRNG.
pub fn generate_salt() -> Result<Salt> {
    let mut salt = [0u8; SALT_LEN];
    OsRng
        .try_fill_bytes(&mut salt)
        .map_err(|e| PwVaultError::Entropy(format!("salt generation: {e}")))?;
    Ok(salt)
}
