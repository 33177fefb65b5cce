use std::path::Path;

use crate::adapters::prompt::terminal_prompt::TerminalPrompt;
use crate::cli::context::AppContext;
use crate::cli::output;
use crate::core::errors::{GpgFileError, Result};
use crate::core::models::request::EncryptionRequest;
use crate::core::services::orchestrator::passphrase_request;

/// Execute the `gpgfile encrypt` command.
///
/// With `--recipient`, the query is resolved through the key catalog and
/// the file is encrypted for that key. With `--passphrase`, the user is
/// prompted for a secret and the file is encrypted symmetrically.
pub fn execute(
    ctx: &AppContext,
    file: &Path,
    recipient: Option<&str>,
    passphrase: bool,
) -> Result<()> {
    let orchestrator = ctx.orchestrator();

    let outcome = if passphrase {
        output::header(&format!("Encrypting {} with a passphrase", file.display()));
        let prompt = TerminalPrompt::new().with_confirmation(true);
        orchestrator.encrypt_reported(&passphrase_request(file, &prompt))
    } else {
        let query = recipient.unwrap_or_default();
        let catalog = ctx.catalog();
        if catalog.is_empty() {
            output::warning("No recipients available in the keyring.");
        }
        let identity = catalog
            .resolve(query)
            .ok_or_else(|| GpgFileError::KeyNotFound {
                query: query.to_string(),
            })?;

        output::header(&format!("Encrypting {} for {}", file.display(), identity.display_name));
        output::detail(&format!("Fingerprint: {}", identity.fingerprint));

        let request = EncryptionRequest::for_recipient(file, identity.fingerprint.clone());
        let sp = output::spinner("Running gpg...");
        let outcome = orchestrator.encrypt_reported(&request);
        output::finish_spinner(sp);
        outcome
    };

    super::report_helpers::conclude("Encryption", outcome)
}
