//! Password entries stored inside a vault.
//!
//! An entry has no id of its own: two entries are "the same" when
//! their username, url and password are all equal.  Update and delete
//! locate their target that way, and the first match wins.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single credential record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entry {
    pub username: String,
    pub url: String,

    /// Cleartext once the vault has been decrypted.
    pub password: String,

    /// Set once when the entry is first added.
    pub created_at: DateTime<Utc>,

    /// Refreshed whenever any field changes.
    pub updated_at: DateTime<Utc>,
}

impl Entry {
    /// Build a new entry stamped with the current time.
    pub fn new(
        username: impl Into<String>,
        url: impl Into<String>,
        password: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            username: username.into(),
            url: url.into(),
            password: password.into(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Structural identity: username, url and password all equal.
    /// Timestamps are ignored.
    pub fn same_credentials(&self, other: &Entry) -> bool {
        self.username == other.username && self.url == other.url && self.password == other.password
    }

    /// Case-insensitive substring filter used by search.
    ///
    /// An empty query always matches its field.
    pub fn matches(&self, username_query: &str, url_query: &str) -> bool {
        contains_ci(&self.username, username_query) && contains_ci(&self.url, url_query)
    }

    /// `username@url`, as shown in selection lists.
    pub fn label(&self) -> String {
        format!("{}@{}", self.username, self.url)
    }
}

fn contains_ci(haystack: &str, needle: &str) -> bool {
    needle.is_empty() || haystack.to_lowercase().contains(&needle.to_lowercase())
}

/// Field changes requested by `update`.  `None` keeps the current value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntryChanges {
    pub username: Option<String>,
    pub url: Option<String>,
    pub password: Option<String>,
}

impl EntryChanges {
    /// Build changes from raw prompt input, where a blank answer means
    /// "leave unchanged".
    pub fn from_input(username: &str, url: &str, password: &str) -> Self {
        let non_empty = |s: &str| (!s.is_empty()).then(|| s.to_string());
        Self {
            username: non_empty(username),
            url: non_empty(url),
            password: non_empty(password),
        }
    }

    /// Returns `true` if no field would be touched.
    pub fn is_empty(&self) -> bool {
        self.username.is_none() && self.url.is_none() && self.password.is_none()
    }
}

/// Apply `changes` to the first entry structurally equal to `target`.
///
/// Bumps `updated_at` only when at least one field was set.  Returns
/// whether anything changed; the caller decides whether to save.
pub fn apply_update(entries: &mut [Entry], target: &Entry, changes: &EntryChanges) -> bool {
    let Some(entry) = entries.iter_mut().find(|e| e.same_credentials(target)) else {
        return false;
    };

    let mut updated = false;
    if let Some(username) = &changes.username {
        entry.username = username.clone();
        updated = true;
    }
    if let Some(url) = &changes.url {
        entry.url = url.clone();
        updated = true;
    }
    if let Some(password) = &changes.password {
        entry.password = password.clone();
        updated = true;
    }
    if updated {
        entry.updated_at = Utc::now();
    }
    updated
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_is_case_insensitive() {
        let e = Entry::new("John@Gmail.com", "https://GitHub.com", "pw");
        assert!(e.matches("john", "github"));
        assert!(e.matches("", "GITHUB"));
        assert!(e.matches("GMAIL", ""));
        assert!(!e.matches("mary", ""));
    }

    #[test]
    fn empty_queries_match_everything() {
        let e = Entry::new("a", "b", "c");
        assert!(e.matches("", ""));
    }

    #[test]
    fn same_credentials_ignores_timestamps() {
        let a = Entry::new("u", "l", "p");
        let mut b = a.clone();
        b.updated_at = b.updated_at + chrono::Duration::seconds(5);
        assert!(a.same_credentials(&b));
        b.password = "other".into();
        assert!(!a.same_credentials(&b));
    }

    #[test]
    fn from_input_treats_blank_as_unchanged() {
        let c = EntryChanges::from_input("", "https://new", "");
        assert_eq!(c.username, None);
        assert_eq!(c.url.as_deref(), Some("https://new"));
        assert_eq!(c.password, None);
        assert!(EntryChanges::from_input("", "", "").is_empty());
    }

    #[test]
    fn apply_update_changes_first_match_and_bumps_updated_at() {
        let first = Entry::new("dup", "site", "pw");
        let mut entries = vec![first.clone(), first.clone()];
        let created = entries[0].created_at;

        let changes = EntryChanges {
            password: Some("rotated".into()),
            ..EntryChanges::default()
        };
        assert!(apply_update(&mut entries, &first, &changes));

        assert_eq!(entries[0].password, "rotated");
        assert_eq!(entries[0].created_at, created);
        assert!(entries[0].updated_at >= created);
        // Duplicate left untouched.
        assert_eq!(entries[1].password, "pw");
    }

    #[test]
    fn apply_update_without_changes_is_noop() {
        let e = Entry::new("u", "l", "p");
        let mut entries = vec![e.clone()];
        assert!(!apply_update(&mut entries, &e, &EntryChanges::default()));
        assert_eq!(entries[0], e);
    }

    #[test]
    fn apply_update_without_match_is_noop() {
        let mut entries = vec![Entry::new("u", "l", "p")];
        let stranger = Entry::new("x", "y", "z");
        let changes = EntryChanges::from_input("new", "", "");
        assert!(!apply_update(&mut entries, &stranger, &changes));
        assert_eq!(entries[0].username, "u");
    }
}
