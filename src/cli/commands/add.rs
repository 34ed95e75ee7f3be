//! `pwvault add`: store a new password entry.

use crate::cli::output;
use crate::cli::{open_store, prompt_field, prompt_master_password, prompt_secret, Cli};
use crate::errors::Result;
use crate::vault::Entry;

/// Execute the `add` command.
pub fn execute(cli: &Cli, user: Option<&str>, url: Option<&str>) -> Result<()> {
    let store = open_store(cli)?;
    let master = prompt_master_password()?;

    let username = prompt_field(user, "Username", false)?;
    let url = prompt_field(url, "URL", false)?;
    let password = prompt_secret("Password", false)?;

    // Timestamps are stamped by the store.
    let entry = Entry::new(username, url, password.as_str());
    store.add_entry(entry, &master)?;

    output::success("Password entry added successfully!");
    Ok(())
}
