//! `pwvault list`: display all entries in a table.

use crate::cli::output;
use crate::cli::{open_store, prompt_master_password, Cli};
use crate::errors::Result;

/// Execute the `list` command.
pub fn execute(cli: &Cli) -> Result<()> {
    let store = open_store(cli)?;
    let master = prompt_master_password()?;

    let entries = store.get_all_entries(&master)?;
    if !entries.is_empty() {
        output::info(&format!("Found {} password entries", entries.len()));
    }

    output::print_entries_table(&entries);
    Ok(())
}
