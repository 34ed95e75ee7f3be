//! Vault payload shape and on-disk file format.
//!
//! A vault file has this layout:
//!
//! ```text
//! [salt: 32 bytes][nonce: 12 bytes][AES-256-GCM ciphertext of payload JSON + 16-byte tag]
//! ```
//!
//! - **Salt**: PBKDF2 salt, stored in the clear.  It is the only salt
//!   that can produce the right key, so it is authoritative over
//!   whatever the payload claims.
//! - **Nonce + ciphertext**: the output of `crypto::encrypt` over the
//!   JSON-serialized `Vault`.

use std::fs;
use std::io::{ErrorKind, Write};
use std::path::Path;

use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use serde::{Deserialize, Serialize};
use zeroize::Zeroizing;

use super::entry::Entry;
use crate::crypto::{self, Salt, SALT_LEN};
use crate::errors::{PwVaultError, Result};

// ---------------------------------------------------------------------------
// Vault
// ---------------------------------------------------------------------------

/// The decrypted vault: entries in insertion order plus the KDF salt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vault {
    pub entries: Vec<Entry>,

    /// Written to the payload as base64 for completeness, ignored on
    /// read and replaced with the file-header salt.
    #[serde(
        default,
        serialize_with = "base64_encode_salt",
        deserialize_with = "ignore_salt"
    )]
    pub salt: Salt,
}

impl Vault {
    /// An empty, not-yet-persisted vault with a fresh random salt.
    pub fn empty() -> Result<Self> {
        Ok(Self {
            entries: Vec::new(),
            salt: crypto::generate_salt()?,
        })
    }
}

// ---------------------------------------------------------------------------
// Encode / decode
// ---------------------------------------------------------------------------

/// Serialize, encrypt, and frame a vault as `salt || nonce || ciphertext`.
pub fn seal(vault: &Vault, passphrase: &[u8]) -> Result<Vec<u8>> {
    let plaintext = Zeroizing::new(
        serde_json::to_vec(vault)
            .map_err(|e| PwVaultError::SerializationError(format!("vault: {e}")))?,
    );

    let key = crypto::derive_key(passphrase, &vault.salt);
    let ciphertext = crypto::encrypt(key.as_bytes(), &plaintext)?;

    let mut buf = Vec::with_capacity(SALT_LEN + ciphertext.len());
    buf.extend_from_slice(&vault.salt);
    buf.extend_from_slice(&ciphertext);
    Ok(buf)
}

/// Parse a vault file's bytes back into a `Vault`.
///
/// Any failure to authenticate (wrong passphrase, tampering, truncated
/// ciphertext) is reported as `WrongPasswordOrCorrupted`: the GCM tag
/// cannot tell those apart.
pub fn open(data: &[u8], passphrase: &[u8]) -> Result<Vault> {
    if data.len() < SALT_LEN {
        return Err(PwVaultError::InvalidVaultFormat(format!(
            "file is {} bytes, shorter than the {SALT_LEN}-byte salt",
            data.len()
        )));
    }

    let (salt_bytes, ciphertext) = data.split_at(SALT_LEN);
    let mut salt: Salt = [0u8; SALT_LEN];
    salt.copy_from_slice(salt_bytes);

    let key = crypto::derive_key(passphrase, &salt);
    let plaintext = Zeroizing::new(
        crypto::decrypt(key.as_bytes(), ciphertext).map_err(|e| {
            tracing::debug!(error = %e, "vault decryption failed");
            PwVaultError::WrongPasswordOrCorrupted
        })?,
    );

    let mut vault: Vault = serde_json::from_slice(&plaintext)
        .map_err(|e| PwVaultError::InvalidVaultFormat(format!("payload JSON: {e}")))?;

    vault.salt = salt;
    Ok(vault)
}

// ---------------------------------------------------------------------------
// File I/O
// ---------------------------------------------------------------------------

/// Read the raw vault file.  A missing file is `Ok(None)`, not an error.
pub fn read_file(path: &Path) -> Result<Option<Vec<u8>>> {
    match fs::read(path) {
        Ok(data) => Ok(Some(data)),
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
        Err(e) => Err(PwVaultError::io(
            format!("read vault file {}", path.display()),
            e,
        )),
    }
}

/// Replace the vault file at `path` with `data`, **atomically**.
///
/// 1. Make sure the parent directory exists (mode 0700 on Unix).
/// 2. Write into a temp file in that directory (mode 0600) and fsync it.
/// 3. Rename the temp file over the target, then fsync the directory.
///
/// The temp file is removed on drop if any step before the rename
/// fails, so a crash or error never leaves a truncated vault behind.
pub fn write_file(path: &Path, data: &[u8]) -> Result<()> {
    let parent = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    ensure_private_dir(parent)?;

    let mut tmp = tempfile::Builder::new()
        .prefix(".vault-")
        .suffix(".tmp")
        .tempfile_in(parent)
        .map_err(|e| PwVaultError::io("create temporary vault file", e))?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o600))
            .map_err(|e| PwVaultError::io("set vault file permissions", e))?;
    }

    tmp.write_all(data)
        .map_err(|e| PwVaultError::io("write vault file", e))?;
    tmp.as_file()
        .sync_all()
        .map_err(|e| PwVaultError::io("sync vault file", e))?;

    tmp.persist(path)
        .map_err(|e| PwVaultError::io(format!("replace {}", path.display()), e.error))?;

    // The rename itself is only durable once the directory entry is.
    #[cfg(unix)]
    {
        fs::File::open(parent)
            .and_then(|d| d.sync_all())
            .map_err(|e| PwVaultError::io("sync vault directory", e))?;
    }

    Ok(())
}

/// Create `dir` (and any missing parents) with owner-only permissions,
/// or tighten an existing `dir` that is group- or world-accessible.
fn ensure_private_dir(dir: &Path) -> Result<()> {
    if dir.is_dir() {
        return restrict_existing_dir(dir);
    }

    let mut builder = fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(0o700);
    }

    builder
        .create(dir)
        .map_err(|e| PwVaultError::io(format!("create vault directory {}", dir.display()), e))
}

#[cfg(unix)]
fn restrict_existing_dir(dir: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    let mode = fs::metadata(dir)
        .map_err(|e| PwVaultError::io("read vault directory permissions", e))?
        .permissions()
        .mode();
    if mode & 0o077 == 0 {
        return Ok(());
    }

    match fs::set_permissions(dir, fs::Permissions::from_mode(0o700)) {
        Ok(()) => {
            tracing::debug!(
                dir = %dir.display(),
                previous_mode = %format_args!("{:o}", mode & 0o777),
                "restricted vault directory to 0700"
            );
            Ok(())
        }
        // Shared directories such as /tmp belong to someone else; the
        // file itself is still 0600.
        Err(e) if e.kind() == ErrorKind::PermissionDenied => {
            tracing::warn!(dir = %dir.display(), "cannot restrict vault directory permissions: {e}");
            Ok(())
        }
        Err(e) => Err(PwVaultError::io("set vault directory permissions", e)),
    }
}

#[cfg(not(unix))]
fn restrict_existing_dir(_dir: &Path) -> Result<()> {
    Ok(())
}

// ---------------------------------------------------------------------------
// Serde helpers for the payload salt
// ---------------------------------------------------------------------------

fn base64_encode_salt<S>(salt: &Salt, serializer: S) -> std::result::Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&BASE64.encode(salt))
}

fn ignore_salt<'de, D>(deserializer: D) -> std::result::Result<Salt, D::Error>
where
    D: serde::Deserializer<'de>,
{
    serde::de::IgnoredAny::deserialize(deserializer)?;
    Ok([0u8; SALT_LEN])
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn sample_vault() -> Vault {
        Vault {
            entries: vec![Entry::new("alice", "https://example.com", "s3cret")],
            salt: [9u8; SALT_LEN],
        }
    }

    #[test]
    fn sealed_file_starts_with_salt() {
        let vault = sample_vault();
        let data = seal(&vault, b"pw").unwrap();
        assert_eq!(&data[..SALT_LEN], &vault.salt);
        assert!(data.len() >= SALT_LEN + crypto::MIN_CIPHERTEXT_LEN);
    }

    #[test]
    fn open_roundtrips_entries() {
        let vault = sample_vault();
        let data = seal(&vault, b"pw").unwrap();
        let opened = open(&data, b"pw").unwrap();
        assert_eq!(opened.entries, vault.entries);
        assert_eq!(opened.salt, vault.salt);
    }

    #[test]
    fn open_rejects_file_shorter_than_salt() {
        let err = open(&[0u8; SALT_LEN - 1], b"pw").unwrap_err();
        assert!(matches!(err, PwVaultError::InvalidVaultFormat(_)));
    }

    #[test]
    fn open_reports_truncated_ciphertext_as_wrong_password() {
        let err = open(&[0u8; SALT_LEN + 4], b"pw").unwrap_err();
        assert!(matches!(err, PwVaultError::WrongPasswordOrCorrupted));
    }

    #[test]
    fn header_salt_overrides_payload_salt() {
        // Payload claims one salt, header carries another.
        let header_salt = [1u8; SALT_LEN];
        let payload = serde_json::json!({
            "entries": [],
            "salt": BASE64.encode([2u8; SALT_LEN]),
        });
        let key = crypto::derive_key(b"pw", &header_salt);
        let ct = crypto::encrypt(key.as_bytes(), payload.to_string().as_bytes()).unwrap();
        let mut data = header_salt.to_vec();
        data.extend_from_slice(&ct);

        let vault = open(&data, b"pw").unwrap();
        assert_eq!(vault.salt, header_salt);
    }

    #[test]
    fn payload_without_salt_field_is_accepted() {
        let header_salt = [4u8; SALT_LEN];
        let key = crypto::derive_key(b"pw", &header_salt);
        let ct = crypto::encrypt(key.as_bytes(), br#"{"entries":[]}"#).unwrap();
        let mut data = header_salt.to_vec();
        data.extend_from_slice(&ct);

        let vault = open(&data, b"pw").unwrap();
        assert!(vault.entries.is_empty());
        assert_eq!(vault.salt, header_salt);
    }

    #[test]
    fn malformed_payload_is_invalid_format() {
        let salt = [5u8; SALT_LEN];
        let key = crypto::derive_key(b"pw", &salt);
        let ct = crypto::encrypt(key.as_bytes(), b"not json").unwrap();
        let mut data = salt.to_vec();
        data.extend_from_slice(&ct);

        let err = open(&data, b"pw").unwrap_err();
        assert!(matches!(err, PwVaultError::InvalidVaultFormat(_)));
    }

    #[test]
    fn read_missing_file_is_none() {
        let tmp = TempDir::new().unwrap();
        assert!(read_file(&tmp.path().join("nope.enc")).unwrap().is_none());
    }

    #[test]
    fn write_file_creates_private_dir_and_file() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("vault.enc");

        write_file(&path, b"payload").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"payload");

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let file_mode = fs::metadata(&path).unwrap().permissions().mode();
            assert_eq!(file_mode & 0o777, 0o600);
            let dir_mode = fs::metadata(path.parent().unwrap())
                .unwrap()
                .permissions()
                .mode();
            assert_eq!(dir_mode & 0o777, 0o700);
        }
    }

    #[cfg(unix)]
    #[test]
    fn write_file_tightens_existing_open_dir() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join(".pwvault");
        fs::create_dir(&dir).unwrap();
        fs::set_permissions(&dir, fs::Permissions::from_mode(0o755)).unwrap();

        write_file(&dir.join("vault.enc"), b"payload").unwrap();

        let mode = fs::metadata(&dir).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o700);
    }

    #[test]
    fn write_file_replaces_and_leaves_no_temp_files() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("vault.enc");

        write_file(&path, b"first").unwrap();
        write_file(&path, b"second").unwrap();
        assert_eq!(fs::read(&path).unwrap(), b"second");

        let names: Vec<_> = fs::read_dir(tmp.path())
            .unwrap()
            .map(|e| e.unwrap().file_name())
            .collect();
        assert_eq!(names, vec![std::ffi::OsString::from("vault.enc")]);
    }
}
