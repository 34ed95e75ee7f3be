//! CLI module: Clap argument parser, prompts, output helpers, and
//! command implementations.
//!
//! Commands receive the parsed `Cli` explicitly; nothing here keeps
//! process-wide state.

pub mod clipboard;
pub mod commands;
pub mod output;

use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

use clap::Parser;
use zeroize::Zeroizing;

use crate::config::Settings;
use crate::errors::{PwVaultError, Result};
use crate::vault::{default_vault_dir, Entry, VaultStore};

/// Environment variable holding the master password for scripted use.
pub const PASSWORD_ENV: &str = "PWVAULT_PASSWORD";

/// pwvault CLI: local encrypted password manager.
#[derive(Parser)]
#[command(
    name = "pwvault",
    about = "Local encrypted password manager",
    version
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Vault file to use (default: ~/.pwvault/vault.enc)
    #[arg(long, env = "PWVAULT_VAULT", global = true)]
    pub vault: Option<PathBuf>,

    /// Enable debug logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// All available subcommands.
#[derive(clap::Subcommand)]
pub enum Commands {
    /// Add a new password entry
    Add {
        /// Username (omit for interactive prompt)
        #[arg(short, long = "user")]
        user: Option<String>,
        /// URL (omit for interactive prompt)
        #[arg(short = 'l', long)]
        url: Option<String>,
    },

    /// Search entries by username and/or URL and copy the password
    Get {
        /// Search by username (case-insensitive substring)
        #[arg(short, long = "user")]
        user: Option<String>,
        /// Search by URL (case-insensitive substring)
        #[arg(short = 'l', long)]
        url: Option<String>,
        /// Print the password to stdout instead of copying it
        #[arg(long)]
        show: bool,
    },

    /// List all entries (passwords are hidden)
    List,

    /// Update an entry's username, URL, or password
    Update,

    /// Delete an entry
    Delete {
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Generate a random password and copy it to the clipboard
    Generate {
        /// Password length (default: 16)
        #[arg(short = 'n', long)]
        length: Option<usize>,
        /// Characters to draw from
        #[arg(short, long)]
        charset: Option<String>,
        /// Only print the password, do not touch the clipboard
        #[arg(long)]
        no_clipboard: bool,
    },

    /// Generate shell completion scripts
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

// ---------------------------------------------------------------------------
// Shared helpers used by multiple commands
// ---------------------------------------------------------------------------

/// Load settings from `~/.pwvault/config.toml`, or defaults when there
/// is no home directory to look in.
pub fn load_settings() -> Result<Settings> {
    match default_vault_dir() {
        Ok(dir) => Settings::load(&dir),
        Err(_) => Ok(Settings::default()),
    }
}

/// Resolve which vault file this invocation works on.
///
/// `--vault` / `PWVAULT_VAULT` wins, then `vault_file` from the config
/// file, then `~/.pwvault/vault.enc`.
pub fn open_store(cli: &Cli) -> Result<VaultStore> {
    if let Some(path) = &cli.vault {
        return Ok(VaultStore::new(path));
    }
    let dir = default_vault_dir()?;
    let settings = Settings::load(&dir)?;
    Ok(VaultStore::new(settings.vault_path(&dir)))
}

/// Get the master password, trying in order:
/// 1. `PWVAULT_PASSWORD` env var (scripts, tests)
/// 2. Interactive hidden prompt
///
/// Returns `Zeroizing<String>` so the password is wiped from memory on drop.
pub fn prompt_master_password() -> Result<Zeroizing<String>> {
    if let Ok(pw) = std::env::var(PASSWORD_ENV) {
        if !pw.is_empty() {
            return Ok(Zeroizing::new(pw));
        }
    }

    let pw = dialoguer::Password::new()
        .with_prompt("Enter master password")
        .interact()
        .map_err(|e| PwVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Read a plain text field, prompting only if it wasn't given as a flag.
pub fn prompt_field(given: Option<&str>, label: &str, allow_empty: bool) -> Result<String> {
    if let Some(v) = given {
        return Ok(v.to_string());
    }
    dialoguer::Input::<String>::new()
        .with_prompt(label)
        .allow_empty(allow_empty)
        .interact_text()
        .map(|s| s.trim().to_string())
        .map_err(|e| PwVaultError::CommandFailed(format!("input prompt: {e}")))
}

/// Read a secret value.
///
/// Piped stdin (not a terminal) is read up to the first newline;
/// otherwise a hidden prompt is shown.
pub fn prompt_secret(label: &str, allow_empty: bool) -> Result<Zeroizing<String>> {
    if !io::stdin().is_terminal() {
        let mut line = Zeroizing::new(String::new());
        io::stdin().lock().read_line(&mut line)?;
        let trimmed = Zeroizing::new(line.trim_end_matches(['\r', '\n']).to_string());
        if trimmed.is_empty() && !allow_empty {
            return Err(PwVaultError::CommandFailed(format!(
                "{label} cannot be empty"
            )));
        }
        return Ok(trimmed);
    }

    let pw = dialoguer::Password::new()
        .with_prompt(label)
        .allow_empty_password(allow_empty)
        .interact()
        .map_err(|e| PwVaultError::CommandFailed(format!("password prompt: {e}")))?;
    Ok(Zeroizing::new(pw))
}

/// Let the user pick one entry from a list, returning its index.
pub fn select_entry(entries: &[Entry], prompt: &str) -> Result<usize> {
    let labels: Vec<String> = entries.iter().map(Entry::label).collect();
    dialoguer::Select::new()
        .with_prompt(prompt)
        .items(&labels)
        .default(0)
        .interact()
        .map_err(|e| PwVaultError::CommandFailed(format!("selection prompt: {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn parses_get_filters() {
        let cli = Cli::try_parse_from(["pwvault", "get", "-u", "john", "--url", "github"]).unwrap();
        match cli.command {
            Commands::Get { user, url, show } => {
                assert_eq!(user.as_deref(), Some("john"));
                assert_eq!(url.as_deref(), Some("github"));
                assert!(!show);
            }
            _ => panic!("expected get"),
        }
    }

    #[test]
    fn vault_flag_is_global() {
        let cli = Cli::try_parse_from(["pwvault", "list", "--vault", "/tmp/x.enc"]).unwrap();
        assert_eq!(cli.vault, Some(PathBuf::from("/tmp/x.enc")));
        let store = open_store(&cli).unwrap();
        assert_eq!(store.path(), std::path::Path::new("/tmp/x.enc"));
    }

    #[test]
    fn parses_generate_options() {
        let cli = Cli::try_parse_from(["pwvault", "generate", "-n", "32", "-c", "ab"]).unwrap();
        match cli.command {
            Commands::Generate {
                length,
                charset,
                no_clipboard,
            } => {
                assert_eq!(length, Some(32));
                assert_eq!(charset.as_deref(), Some("ab"));
                assert!(!no_clipboard);
            }
            _ => panic!("expected generate"),
        }
    }
}
