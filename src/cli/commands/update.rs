//! `pwvault update`: change an entry's username, URL, or password.

use crate::cli::output;
use crate::cli::{open_store, prompt_field, prompt_master_password, prompt_secret, select_entry, Cli};
use crate::errors::Result;
use crate::vault::{apply_update, EntryChanges};

/// Execute the `update` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let master = prompt_master_password()?;

    let mut entries = store.get_all_entries(&master)?;
    if entries.is_empty() {
        output::info("No entries found in vault.");
        return Ok(());
    }

    let selected = entries[select_entry(&entries, "Select the entry to update")?].clone();

    output::tip("Leave any field blank to keep it unchanged.");
    let new_username = prompt_field(
        None,
        &format!("New username (current: {})", selected.username),
        true,
    )?;
    let new_url = prompt_field(None, &format!("New URL (current: {})", selected.url), true)?;
    let new_password = prompt_secret("New password", true)?;

    let changes = EntryChanges::from_input(&new_username, &new_url, &new_password);
    if !apply_update(&mut entries, &selected, &changes) {
        output::info("No changes were made.");
        return Ok(());
    }

    store.update_entries(entries, &master)?;
    output::success(&format!("Entry for {} updated.", selected.label()));
    Ok(())
}
