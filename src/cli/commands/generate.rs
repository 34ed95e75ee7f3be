//! `pwvault generate`: produce a random password from a character set.

use rand::Rng;

use crate::cli::output;
use crate::cli::{clipboard, load_settings};
use crate::errors::{PwVaultError, Result};

/// Execute the `generate` command.
///
/// Flags override the `generate_*` defaults from the config file.
pub fn execute(length: Option<usize>, charset: Option<&str>, no_clipboard: bool) -> Result<()> {
    let settings = load_settings()?;
    let length = length.unwrap_or(settings.generate_length);
    let charset = charset.unwrap_or(&settings.generate_charset);

    let password = generate_password(length, charset)?;
    println!("{password}");

    if no_clipboard {
        return Ok(());
    }

    // The password is already on stdout, so a missing clipboard is not fatal.
    match clipboard::copy(&password) {
        Ok(()) => output::success("Password copied to clipboard!"),
        Err(e) => output::warning(&e.to_string()),
    }
    Ok(())
}

/// Draw `length` characters uniformly from `charset` using the
/// thread-local CSPRNG.
pub fn generate_password(length: usize, charset: &str) -> Result<String> {
    if length == 0 {
        return Err(PwVaultError::CommandFailed(
            "password length must be greater than zero".into(),
        ));
    }

    let chars: Vec<char> = charset.chars().collect();
    if chars.is_empty() {
        return Err(PwVaultError::CommandFailed(
            "character set cannot be empty".into(),
        ));
    }

    let mut rng = rand::rng();
    Ok((0..length)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generates_requested_length() {
        let pw = generate_password(24, "abc").unwrap();
        assert_eq!(pw.chars().count(), 24);
    }

    #[test]
    fn only_uses_charset_characters() {
        let pw = generate_password(200, "xY7").unwrap();
        assert!(pw.chars().all(|c| "xY7".contains(c)));
    }

    #[test]
    fn handles_multibyte_charset() {
        let pw = generate_password(10, "äö").unwrap();
        assert_eq!(pw.chars().count(), 10);
        assert!(pw.chars().all(|c| c == 'ä' || c == 'ö'));
    }

    #[test]
    fn rejects_zero_length() {
        assert!(generate_password(0, "abc").is_err());
    }

    #[test]
    fn rejects_empty_charset() {
        assert!(generate_password(8, "").is_err());
    }

    #[test]
    fn two_passwords_differ() {
        let cs = "abcdefghijklmnopqrstuvwxyz0123456789";
        assert_ne!(
            generate_password(32, cs).unwrap(),
            generate_password(32, cs).unwrap()
        );
    }
}
