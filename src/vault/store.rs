//! High-level vault operations used by CLI commands.
//!
//! `VaultStore` owns the vault file path and nothing else.  Every
//! operation runs a full cycle against the file:
//!
//! ```text
//! load (read + derive + decrypt + parse) -> mutate -> save (serialize + derive + encrypt + atomic write)
//! ```
//!
//! The passphrase is an explicit argument to every call and is never
//! kept on the store.

use std::path::{Path, PathBuf};

use chrono::Utc;

use crate::errors::{PwVaultError, Result};

use super::entry::Entry;
use super::format::{self, Vault};

/// Name of the per-user vault directory under `$HOME`.
pub const VAULT_DIR_NAME: &str = ".pwvault";

/// Default vault file name inside `VAULT_DIR_NAME`.
pub const VAULT_FILE_NAME: &str = "vault.enc";

/// Handle on a single vault file.
#[derive(Debug, Clone)]
pub struct VaultStore {
    path: PathBuf,
}

impl VaultStore {
    // ------------------------------------------------------------------
    // Construction
    // ------------------------------------------------------------------

    /// Use the vault file at `path`.  Nothing is read or created yet.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Use the default vault at `<home>/.pwvault/vault.enc`.
    pub fn at_default_location() -> Result<Self> {
        Ok(Self::new(default_vault_dir()?.join(VAULT_FILE_NAME)))
    }

    // ------------------------------------------------------------------
    // Load / save cycle
    // ------------------------------------------------------------------

    /// Load and decrypt the vault.
    ///
    /// A missing file yields an empty vault with a fresh salt; nothing
    /// is written until the first `save`.
    pub fn load(&self, passphrase: &str) -> Result<Vault> {
        let Some(data) = format::read_file(&self.path)? else {
            tracing::debug!(path = %self.path.display(), "no vault file, starting empty");
            return Vault::empty();
        };

        let vault = format::open(&data, passphrase.as_bytes())?;
        tracing::debug!(
            path = %self.path.display(),
            entries = vault.entries.len(),
            "vault loaded"
        );
        Ok(vault)
    }

    /// Encrypt `vault` and atomically replace the file on disk.
    pub fn save(&self, vault: &Vault, passphrase: &str) -> Result<()> {
        let data = format::seal(vault, passphrase.as_bytes())?;
        format::write_file(&self.path, &data)?;
        tracing::debug!(
            path = %self.path.display(),
            entries = vault.entries.len(),
            bytes = data.len(),
            "vault saved"
        );
        Ok(())
    }

    // ------------------------------------------------------------------
    // Entry operations
    // ------------------------------------------------------------------

    /// Append `entry`, stamping both timestamps with the current time.
    pub fn add_entry(&self, mut entry: Entry, passphrase: &str) -> Result<()> {
        let mut vault = self.load(passphrase)?;

        let now = Utc::now();
        entry.created_at = now;
        entry.updated_at = now;
        vault.entries.push(entry);

        self.save(&vault, passphrase)?;
        tracing::info!(total = vault.entries.len(), "entry added");
        Ok(())
    }

    /// All entries, in insertion order.
    pub fn get_all_entries(&self, passphrase: &str) -> Result<Vec<Entry>> {
        Ok(self.load(passphrase)?.entries)
    }

    /// Entries whose username and url contain the given queries,
    /// case-insensitively.  An empty query matches everything.
    pub fn search_entries(
        &self,
        username_query: &str,
        url_query: &str,
        passphrase: &str,
    ) -> Result<Vec<Entry>> {
        let vault = self.load(passphrase)?;
        Ok(vault
            .entries
            .into_iter()
            .filter(|e| e.matches(username_query, url_query))
            .collect())
    }

    /// Replace the whole entry list with `entries` and save.
    ///
    /// This is a bulk replace: the caller computes the final state.
    pub fn update_entries(&self, entries: Vec<Entry>, passphrase: &str) -> Result<()> {
        let mut vault = self.load(passphrase)?;
        vault.entries = entries;

        self.save(&vault, passphrase)?;
        tracing::info!(total = vault.entries.len(), "entries replaced");
        Ok(())
    }

    /// Remove the first entry whose username, url and password equal
    /// `entry`'s, and save.
    ///
    /// Fails with `EntryNotFound`, leaving the file untouched, if no
    /// entry matches.
    pub fn delete_entry(&self, entry: &Entry, passphrase: &str) -> Result<()> {
        let mut vault = self.load(passphrase)?;

        let index = vault
            .entries
            .iter()
            .position(|e| e.same_credentials(entry))
            .ok_or(PwVaultError::EntryNotFound)?;
        vault.entries.remove(index);

        self.save(&vault, passphrase)?;
        tracing::info!(total = vault.entries.len(), "entry deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------

    /// Returns the path to the vault file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` once the vault has been written at least once.
    pub fn exists(&self) -> bool {
        self.path.exists()
    }
}

/// `<home>/.pwvault`, the directory holding the vault and config file.
pub fn default_vault_dir() -> Result<PathBuf> {
    dirs::home_dir()
        .map(|home| home.join(VAULT_DIR_NAME))
        .ok_or(PwVaultError::HomeDirNotFound)
}
