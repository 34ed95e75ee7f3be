use thiserror::Error;

/// All errors that can occur in pwvault.
#[derive(Debug, Error)]
pub enum PwVaultError {
    // --- Crypto errors ---
    #[error("Entropy source failed: {0}")]
    Entropy(String),

    #[error("Encryption failed: {0}")]
    EncryptionFailed(String),

    #[error("Decryption failed: authentication tag mismatch")]
    DecryptionFailed,

    #[error("Ciphertext too short: {len} bytes, need at least {min}")]
    CiphertextTooShort { len: usize, min: usize },

    // --- Vault errors ---
    #[error("Wrong master password or corrupted vault")]
    WrongPasswordOrCorrupted,

    #[error("Invalid vault format: {0}")]
    InvalidVaultFormat(String),

    #[error("No matching entry found in vault")]
    EntryNotFound,

    // --- Config errors ---
    #[error("Config file error: {0}")]
    ConfigError(String),

    #[error("Could not determine the home directory")]
    HomeDirNotFound,

    // --- IO errors ---
    #[error("Failed to {context}: {source}")]
    IoContext {
        context: String,
        #[source]
        source: std::io::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // --- Serialization errors ---
    #[error("Serialization error: {0}")]
    SerializationError(String),

    // --- CLI errors ---
    #[error("Command failed: {0}")]
    CommandFailed(String),

    #[error("Clipboard error: {0}")]
    Clipboard(String),
}

impl PwVaultError {
    /// Wrap an I/O error with a short description of the failing step.
    pub fn io(context: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoContext {
            context: context.into(),
            source,
        }
    }
}

/// Convenience type alias for pwvault results.
pub type Result<T> = std::result::Result<T, PwVaultError>;
