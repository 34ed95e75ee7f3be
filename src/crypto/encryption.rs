//! AES-256-GCM authenticated encryption.
//!
//! Each call to `encrypt` draws a fresh random 12-byte nonce from the
//! OS CSPRNG and prepends it to the ciphertext.  `decrypt` splits the
//! nonce back out before opening.
//!
//! Layout of the returned byte buffer:
//!   [ 12-byte nonce | ciphertext + 16-byte auth tag ]

use aes_gcm::aead::{Aead, KeyInit};
use aes_gcm::{Aes256Gcm, Key, Nonce};
use rand::rngs::OsRng;
use rand::TryRngCore;

use crate::errors::{PwVaultError, Result};

/// Size of the AES-256-GCM nonce in bytes.
pub const NONCE_LEN: usize = 12;

/// Size of the AES-256-GCM authentication tag in bytes.
pub const TAG_LEN: usize = 16;

/// Smallest blob `decrypt` will accept: a nonce plus a tag over an
/// empty plaintext.
pub const MIN_CIPHERTEXT_LEN: usize = NONCE_LEN + TAG_LEN;

/// Encrypt `plaintext` with a 32-byte `key`.
///
/// Returns the nonce prepended to the ciphertext (nonce || ciphertext).
pub fn encrypt(key: &[u8; 32], plaintext: &[u8]) -> Result<Vec<u8>> {
    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    // Never reuse a nonce under the same key.
    let mut nonce_bytes = [0u8; NONCE_LEN];
    OsRng
        .try_fill_bytes(&mut nonce_bytes)
        .map_err(|e| PwVaultError::Entropy(format!("nonce generation: {e}")))?;
    let nonce = Nonce::from_slice(&nonce_bytes);

    let ciphertext = cipher
        .encrypt(nonce, plaintext)
        .map_err(|e| PwVaultError::EncryptionFailed(format!("encryption error: {e}")))?;

    let mut output = Vec::with_capacity(NONCE_LEN + ciphertext.len());
    output.extend_from_slice(&nonce_bytes);
    output.extend_from_slice(&ciphertext);
    Ok(output)
}

/// Decrypt data that was produced by `encrypt`.
///
/// Fails with `CiphertextTooShort` if the blob cannot even hold a nonce
/// and a tag, and with `DecryptionFailed` if the tag does not verify.
pub fn decrypt(key: &[u8; 32], ciphertext_with_nonce: &[u8]) -> Result<Vec<u8>> {
    if ciphertext_with_nonce.len() < MIN_CIPHERTEXT_LEN {
        return Err(PwVaultError::CiphertextTooShort {
            len: ciphertext_with_nonce.len(),
            min: MIN_CIPHERTEXT_LEN,
        });
    }

    let (nonce_bytes, ciphertext) = ciphertext_with_nonce.split_at(NONCE_LEN);
    let nonce = Nonce::from_slice(nonce_bytes);

    let cipher = Aes256Gcm::new(Key::<Aes256Gcm>::from_slice(key));

    cipher
        .decrypt(nonce, ciphertext)
        .map_err(|_| PwVaultError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn output_is_nonce_plus_tag_longer() {
        let key = [3u8; 32];
        let ct = encrypt(&key, b"abc").unwrap();
        assert_eq!(ct.len(), NONCE_LEN + 3 + TAG_LEN);
    }

    #[test]
    fn empty_plaintext_roundtrips() {
        let key = [3u8; 32];
        let ct = encrypt(&key, b"").unwrap();
        assert_eq!(ct.len(), MIN_CIPHERTEXT_LEN);
        assert!(decrypt(&key, &ct).unwrap().is_empty());
    }

    #[test]
    fn just_below_minimum_is_too_short() {
        let key = [3u8; 32];
        let err = decrypt(&key, &[0u8; MIN_CIPHERTEXT_LEN - 1]).unwrap_err();
        assert!(matches!(
            err,
            PwVaultError::CiphertextTooShort { len: 27, min: 28 }
        ));
    }
}
