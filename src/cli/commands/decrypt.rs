use std::path::Path;

use crate::cli::context::AppContext;
use crate::cli::output;
use crate::core::errors::Result;
use crate::core::models::request::DecryptionRequest;
use crate::core::services::orchestrator::planned_output;

/// Execute the `gpgfile decrypt` command.
///
/// Decrypts `<name>.gpg` into `<name>` next to it. Key material comes
/// from the gpg keyring or agent.
pub fn execute(ctx: &AppContext, file: &Path) -> Result<()> {
    output::header(&format!("Decrypting {}", file.display()));
    if let Some(dest) = planned_output(file, true) {
        output::detail(&format!("Destination: {}", dest.display()));
    }
    // No spinner: gpg's pinentry may need the terminal for the key passphrase.
    output::detail("gpg may ask for the secret key passphrase");

    let request = DecryptionRequest::new(file);
    let outcome = ctx.orchestrator().decrypt_reported(&request);

    super::report_helpers::conclude("Decryption", outcome)
}
