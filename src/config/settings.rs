use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::errors::{PwVaultError, Result};

/// User-level configuration, loaded from `~/.pwvault/config.toml`.
///
/// Every field has a sensible default so pwvault works out-of-the-box
/// without any config file at all.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Vault file, relative to the config directory or absolute.
    #[serde(default = "default_vault_file")]
    pub vault_file: String,

    /// Default length for `pwvault generate`.
    #[serde(default = "default_generate_length")]
    pub generate_length: usize,

    /// Default character set for `pwvault generate`.
    #[serde(default = "default_generate_charset")]
    pub generate_charset: String,
}

// ── Serde default helpers ────────────────────────────────────────────

fn default_vault_file() -> String {
    crate::vault::store::VAULT_FILE_NAME.to_string()
}

fn default_generate_length() -> usize {
    16
}

fn default_generate_charset() -> String {
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789!@#$%^&*()".to_string()
}

// ── Implementation ───────────────────────────────────────────────────

impl Default for Settings {
    fn default() -> Self {
        Self {
            vault_file: default_vault_file(),
            generate_length: default_generate_length(),
            generate_charset: default_generate_charset(),
        }
    }
}

impl Settings {
    /// Name of the config file we look for in the vault directory.
    const FILE_NAME: &'static str = "config.toml";

    /// Load settings from `<config_dir>/config.toml`.
    ///
    /// If the file does not exist, sensible defaults are returned.
    /// If the file exists but cannot be parsed, an error is returned.
    pub fn load(config_dir: &Path) -> Result<Self> {
        let config_path = config_dir.join(Self::FILE_NAME);

        if !config_path.exists() {
            return Ok(Self::default());
        }

        let contents = std::fs::read_to_string(&config_path).map_err(|e| {
            PwVaultError::ConfigError(format!("Failed to read {}: {e}", config_path.display()))
        })?;

        let settings: Settings = toml::from_str(&contents).map_err(|e| {
            PwVaultError::ConfigError(format!("Failed to parse {}: {e}", config_path.display()))
        })?;

        Ok(settings)
    }

    /// Resolve the vault file path against the config directory.
    ///
    /// Example: `~/.pwvault/vault.enc`
    pub fn vault_path(&self, config_dir: &Path) -> PathBuf {
        // `join` keeps an absolute `vault_file` as-is.
        config_dir.join(&self.vault_file)
    }
}

// ── Tests ────────────────────────────────────────────────────────────
