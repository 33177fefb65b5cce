use std::path::PathBuf;

/// All domain errors for gpgfile.
///
/// Each variant provides enough context to diagnose the issue
/// without needing a debugger.
#[derive(Debug, thiserror::Error)]
pub enum GpgFileError {
    #[error(
        "Input file not found: {path}\n\n  \
         Check that the path is correct and the file still exists."
    )]
    InputNotFound { path: PathBuf },

    #[error("Not a regular file: {path}")]
    NotAFile { path: PathBuf },

    #[error("Insufficient input: {reason}")]
    InsufficientInput { reason: String },

    #[error(
        "Output would overwrite the input: {path}\n\n  \
         The file name does not contain '.gpg', so no distinct output name can be derived.\n  \
         Rename the file to '<name>.gpg' and try again."
    )]
    OutputCollision { path: PathBuf },

    #[error(
        "Output file already exists: {path}\n\n  \
         Overwriting is disabled ([output] overwrite = false).\n  \
         Remove or rename the existing file first."
    )]
    OutputExists { path: PathBuf },

    #[error("Backend error: {reason}")]
    Backend { reason: String },

    #[error(
        "Keyring unavailable: {reason}\n\n  \
         Check that GnuPG is installed and that the keyring is readable."
    )]
    KeyringUnavailable { reason: String },

    #[error(
        "No key matching '{query}' in the keyring\n\n  \
         Run 'gpgfile keys' to see available recipients."
    )]
    KeyNotFound { query: String },

    #[error("Invalid configuration: {detail}")]
    InvalidConfig { detail: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the crate.
pub type Result<T> = std::result::Result<T, GpgFileError>;
