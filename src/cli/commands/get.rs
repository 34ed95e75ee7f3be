//! `pwvault get`: search entries and copy (or print) a password.

use crate::cli::output;
use crate::cli::{clipboard, open_store, prompt_master_password, select_entry, Cli};
use crate::errors::{PwVaultError, Result};

/// Execute the `get` command.
pub fn execute(cli: &Cli, user: Option<&str>, url: Option<&str>, show: bool) -> Result<()> {
    let user = user.unwrap_or_default();
    let url = url.unwrap_or_default();
    if user.is_empty() && url.is_empty() {
        return Err(PwVaultError::CommandFailed(
            "please provide either --user or --url".into(),
        ));
    }

    let store = open_store(cli)?;
    let master = prompt_master_password()?;
    let matches = store.search_entries(user, url, &master)?;

    let entry = match matches.len() {
        0 => {
            output::info("No matching entries found.");
            return Ok(());
        }
        1 => &matches[0],
        _ => &matches[select_entry(&matches, "Multiple entries found, select one")?],
    };

    if show {
        println!("{}", entry.password);
        return Ok(());
    }

    clipboard::copy(&entry.password)?;
    output::success(&format!(
        "Password for {} copied to clipboard!",
        entry.label()
    ));
    Ok(())
}
