//! System clipboard access.

use crate::errors::{PwVaultError, Result};

/// Copy `text` to the system clipboard.
pub fn copy(text: &str) -> Result<()> {
    let mut clipboard =
        arboard::Clipboard::new().map_err(|e| PwVaultError::Clipboard(e.to_string()))?;
    clipboard
        .set_text(text.to_owned())
        .map_err(|e| PwVaultError::Clipboard(e.to_string()))
}
