use std::path::{Path, PathBuf};

use zeroize::Zeroizing;

/// How a file gets encrypted.
pub enum EncryptionMode {
    /// Asymmetric encryption for a single public-key fingerprint.
    Recipient(String),
    /// Symmetric encryption with a shared passphrase.
    Passphrase(Zeroizing<String>),
}

impl EncryptionMode {
    /// Short label used in log lines. Never includes secret material.
    pub fn describe(&self) -> String {
        match self {
            Self::Recipient(fingerprint) => format!("recipient {fingerprint}"),
            Self::Passphrase(_) => "passphrase".to_string(),
        }
    }

    /// Whether the mode carries the material the backend needs.
    pub fn is_complete(&self) -> bool {
        match self {
            Self::Recipient(fingerprint) => !fingerprint.trim().is_empty(),
            Self::Passphrase(secret) => !secret.is_empty(),
        }
    }
}

impl std::fmt::Debug for EncryptionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Recipient(fingerprint) => f.debug_tuple("Recipient").field(fingerprint).finish(),
            Self::Passphrase(_) => f.debug_tuple("Passphrase").field(&"<redacted>").finish(),
        }
    }
}

/// A request to encrypt one file.
#[derive(Debug)]
pub struct EncryptionRequest {
    pub input_path: PathBuf,
    pub mode: EncryptionMode,
}

impl EncryptionRequest {
    /// Encrypt `input_path` for the key with the given fingerprint.
    pub fn for_recipient(input_path: impl Into<PathBuf>, fingerprint: impl Into<String>) -> Self {
        Self {
            input_path: input_path.into(),
            mode: EncryptionMode::Recipient(fingerprint.into()),
        }
    }

    /// Encrypt `input_path` symmetrically with `passphrase`.
    pub fn with_passphrase(input_path: impl Into<PathBuf>, passphrase: Zeroizing<String>) -> Self {
        Self {
            input_path: input_path.into(),
            mode: EncryptionMode::Passphrase(passphrase),
        }
    }
}

/// A request to decrypt one file. Key material is resolved by the
/// backend from its own keyring or agent.
#[derive(Debug, Clone)]
pub struct DecryptionRequest {
    pub input_path: PathBuf,
}

impl DecryptionRequest {
    pub fn new(input_path: impl Into<PathBuf>) -> Self {
        Self {
            input_path: input_path.into(),
        }
    }

    pub fn input_path(&self) -> &Path {
        &self.input_path
    }
}
