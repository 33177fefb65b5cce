use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::{error, info, warn};
use zeroize::Zeroizing;

use crate::core::errors::{GpgFileError, Result};
use crate::core::models::outcome::Outcome;
use crate::core::models::request::{DecryptionRequest, EncryptionMode, EncryptionRequest};
use crate::core::services::naming::{decrypted_output_path, encrypted_output_path};
use crate::core::traits::backend::CryptoBackend;
use crate::core::traits::prompt::SecretPrompt;

/// Drives single encrypt/decrypt operations against a `CryptoBackend`
/// and classifies what the backend reports.
///
/// Each call runs `Validating -> Invoking -> {Succeeded, Failed}` once.
/// Validation failures never reach the backend, and nothing is retried.
pub struct Orchestrator<B: CryptoBackend> {
    backend: B,
    overwrite: bool,
}

impl<B: CryptoBackend> Orchestrator<B> {
    /// Create an orchestrator that lets the backend replace existing outputs.
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            overwrite: true,
        }
    }

    /// Refuse to start an operation whose output file already exists.
    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// Encrypt a file, logging the result.
    ///
    /// Returns `None` when the request was rejected or the backend could
    /// not be driven; the cause has already been logged.
    pub fn encrypt(&self, request: &EncryptionRequest) -> Option<Outcome> {
        self.encrypt_reported(request).ok()
    }

    /// Encrypt a file, logging the result like [`encrypt`](Self::encrypt)
    /// while still handing the typed cause back to the caller.
    pub fn encrypt_reported(&self, request: &EncryptionRequest) -> Result<Outcome> {
        let result = self.try_encrypt(request);
        match &result {
            Ok(outcome) => report("encrypted", &request.input_path, outcome),
            Err(e) => log_abort("Encryption", e),
        }
        result
    }

    /// Ask `prompt` for a passphrase, then encrypt `input` with it.
    ///
    /// A dismissed prompt counts as an empty passphrase, which is
    /// rejected before the backend is called.
    pub fn encrypt_with_prompt<P: SecretPrompt + ?Sized>(
        &self,
        input: &Path,
        prompt: &P,
    ) -> Option<Outcome> {
        self.encrypt(&passphrase_request(input, prompt))
    }

    /// Encrypt a file, returning the typed cause on rejection.
    pub fn try_encrypt(&self, request: &EncryptionRequest) -> Result<Outcome> {
        if !request.mode.is_complete() {
            let reason = match request.mode {
                EncryptionMode::Recipient(_) => "no recipient fingerprint given",
                EncryptionMode::Passphrase(_) => "no passphrase entered",
            };
            return Err(GpgFileError::InsufficientInput {
                reason: reason.into(),
            });
        }

        let input = &request.input_path;
        check_input(input)?;

        let output = encrypted_output_path(input);
        self.check_output(&output)?;

        info!("Encrypting {} with {}", input.display(), request.mode.describe());

        let result = match &request.mode {
            EncryptionMode::Recipient(fingerprint) => {
                let recipients = [fingerprint.trim().to_string()];
                self.backend
                    .encrypt_to_recipients(input, &recipients, &output)
            }
            EncryptionMode::Passphrase(passphrase) => {
                self.backend.encrypt_symmetric(input, passphrase, &output)
            }
        }
        .map_err(|e| input_error(e, input))?;

        Ok(Outcome::from_backend(&result, output))
    }

    /// Decrypt a file, logging the result.
    ///
    /// Returns `None` when the input is missing, no output name can be
    /// derived, or the backend could not be driven.
    pub fn decrypt(&self, request: &DecryptionRequest) -> Option<Outcome> {
        self.decrypt_reported(request).ok()
    }

    /// Decrypt a file, logging the result like [`decrypt`](Self::decrypt)
    /// while still handing the typed cause back to the caller.
    pub fn decrypt_reported(&self, request: &DecryptionRequest) -> Result<Outcome> {
        info!("Decrypting {}", request.input_path.display());

        let result = self.try_decrypt(request);
        match &result {
            Ok(outcome) => report("decrypted", &request.input_path, outcome),
            Err(e) => log_abort("Decryption", e),
        }
        result
    }

    /// Decrypt a file, returning the typed cause on rejection.
    pub fn try_decrypt(&self, request: &DecryptionRequest) -> Result<Outcome> {
        let input = request.input_path();
        check_input(input)?;

        let output = decrypted_output_path(input).ok_or_else(|| GpgFileError::OutputCollision {
            path: input.to_path_buf(),
        })?;
        self.check_output(&output)?;

        let ciphertext = std::fs::read(input).map_err(|e| io_error(e, input))?;
        let result = self
            .backend
            .decrypt(&ciphertext, &output)
            .map_err(|e| input_error(e, input))?;

        Ok(Outcome::from_backend(&result, output))
    }

    fn check_output(&self, output: &Path) -> Result<()> {
        if !self.overwrite && output.exists() {
            return Err(GpgFileError::OutputExists {
                path: output.to_path_buf(),
            });
        }
        Ok(())
    }
}

/// The input must exist and be a regular file.
fn check_input(path: &Path) -> Result<()> {
    match std::fs::metadata(path) {
        Ok(meta) if meta.is_file() => Ok(()),
        Ok(_) => Err(GpgFileError::NotAFile {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(io_error(e, path)),
    }
}

fn io_error(e: std::io::Error, path: &Path) -> GpgFileError {
    if e.kind() == ErrorKind::NotFound {
        GpgFileError::InputNotFound {
            path: path.to_path_buf(),
        }
    } else {
        GpgFileError::Io(e)
    }
}

/// A backend that hit `NotFound` lost the input between check and use.
fn input_error(e: GpgFileError, path: &Path) -> GpgFileError {
    match e {
        GpgFileError::Io(io) => io_error(io, path),
        other => other,
    }
}

fn report(verb: &str, input: &Path, outcome: &Outcome) {
    if outcome.ok {
        info!(
            "'{}' successfully {verb} at '{}'. Status: {}",
            input.display(),
            outcome.output_path.display(),
            outcome.status_detail
        );
    } else {
        error!(
            "'{}' could not be {verb}: {}",
            input.display(),
            outcome.status_detail
        );
    }
}

fn log_abort(operation: &str, e: &GpgFileError) {
    match e {
        GpgFileError::InsufficientInput { reason } => {
            warn!("{operation} skipped: {reason}");
        }
        GpgFileError::InputNotFound { path } => {
            error!("Input file not found: {}", path.display());
        }
        other => {
            error!("{operation} aborted: {other}");
        }
    }
}

/// Build a passphrase request for `input` from what `prompt` returns.
///
/// A dismissed prompt yields an empty passphrase.
pub fn passphrase_request<P: SecretPrompt + ?Sized>(
    input: &Path,
    prompt: &P,
) -> EncryptionRequest {
    let passphrase = prompt
        .prompt_for_secret("Enter password")
        .unwrap_or_else(|| Zeroizing::new(String::new()));
    EncryptionRequest::with_passphrase(input, passphrase)
}

/// Path an operation on `input` would write, for display before it runs.
pub fn planned_output(input: &Path, decrypting: bool) -> Option<PathBuf> {
    if decrypting {
        decrypted_output_path(input)
    } else {
        Some(encrypted_output_path(input))
    }
}
