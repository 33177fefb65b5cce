use std::path::Path;

use crate::core::errors::Result;
use crate::core::models::key_identity::PublicKeyRecord;
use crate::core::models::outcome::BackendResult;

/// Port for the OpenPGP engine that performs the actual cryptography.
///
/// Implementations live in `adapters::backend` (e.g. GpgBackend).
/// The core layer only depends on this trait, never on a concrete backend.
///
/// `Err` means the backend could not be driven at all (missing input,
/// process could not start, I/O failure). A backend that ran but
/// refused the operation returns `Ok` with `ok == false`.
pub trait CryptoBackend: Send + Sync {
    /// List every public key in the backend's key store.
    fn list_public_keys(&self) -> Result<Vec<PublicKeyRecord>>;

    /// Encrypt the file at `input` for `fingerprints`, writing `output`.
    fn encrypt_to_recipients(
        &self,
        input: &Path,
        fingerprints: &[String],
        output: &Path,
    ) -> Result<BackendResult>;

    /// Encrypt the file at `input` with `passphrase`, writing `output`.
    fn encrypt_symmetric(&self, input: &Path, passphrase: &str, output: &Path)
    -> Result<BackendResult>;

    /// Decrypt `ciphertext`, writing the plaintext to `output`.
    fn decrypt(&self, ciphertext: &[u8], output: &Path) -> Result<BackendResult>;

    /// Human-readable name of this backend (e.g. "gpg").
    fn name(&self) -> &str;
}
