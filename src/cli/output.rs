//! Colored terminal output helpers.
//!
//! All user-facing output goes through these functions so we get
//! consistent styling across every command.

use comfy_table::{ContentArrangement, Table};
use console::style;

use crate::vault::Entry;

/// Print a green success message: "check_mark {msg}"
pub fn success(msg: &str) {
    println!("{} {}", style("\u{2713}").green().bold(), msg);
}

/// Print a red error message: "x_mark {msg}"
pub fn error(msg: &str) {
    eprintln!("{} {}", style("\u{2717}").red().bold(), msg);
}

/// Print a yellow warning: "warning_sign {msg}"
pub fn warning(msg: &str) {
    eprintln!("{} {}", style("\u{26a0}").yellow().bold(), msg);
}

/// Print a blue info message: "info_sign {msg}"
pub fn info(msg: &str) {
    println!("{} {}", style("\u{2139}").blue().bold(), msg);
}

/// Print a dim tip/hint: "arrow {msg}"
pub fn tip(msg: &str) {
    println!("{} {}", style("\u{2192}").dim(), style(msg).dim());
}

/// Print a table of entries (#, Username, URL, Created, Updated).
///
/// Passwords are never shown.
pub fn print_entries_table(entries: &[Entry]) {
    if entries.is_empty() {
        info("No password entries found.");
        tip("Run `pwvault add` to store your first password.");
        return;
    }

    println!("{}", entries_table(entries));
}

fn entries_table(entries: &[Entry]) -> Table {
    let mut table = Table::new();
    table.set_content_arrangement(ContentArrangement::Dynamic);
    table.set_header(vec!["#", "Username", "URL", "Created", "Updated"]);

    for (i, e) in entries.iter().enumerate() {
        table.add_row(vec![
            (i + 1).to_string(),
            e.username.clone(),
            e.url.clone(),
            e.created_at.format("%Y-%m-%d %H:%M:%S").to_string(),
            e.updated_at.format("%Y-%m-%d %H:%M:%S").to_string(),
        ]);
    }

    table
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_hides_passwords() {
        let entries = vec![Entry::new("alice", "https://example.com", "topsecret")];
        let rendered = entries_table(&entries).to_string();
        assert!(rendered.contains("alice"));
        assert!(rendered.contains("https://example.com"));
        assert!(!rendered.contains("topsecret"));
    }
}
