//! `pwvault delete`: remove an entry from the vault.

use dialoguer::Confirm;

use crate::cli::output;
use crate::cli::{open_store, prompt_master_password, select_entry, Cli};
use crate::errors::{PwVaultError, Result};

/// Execute the `delete` command.
pub fn execute(cli: &Cli, force: bool) -> Result<()> {
    let store = open_store(cli)?;
    let master = prompt_master_password()?;

    let entries = store.get_all_entries(&master)?;
    if entries.is_empty() {
        output::info("No entries found in vault.");
        return Ok(());
    }

    let selected = &entries[select_entry(&entries, "Select the entry to delete")?];

    // Unless --force is set, ask for confirmation before deleting.
    if !force {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete {}?", selected.label()))
            .default(false)
            .interact()
            .map_err(|e| PwVaultError::CommandFailed(format!("confirm prompt: {e}")))?;

        if !confirmed {
            output::info("Cancelled.");
            return Ok(());
        }
    }

    store.delete_entry(selected, &master)?;
    output::success(&format!("Deleted {}", selected.label()));
    Ok(())
}
