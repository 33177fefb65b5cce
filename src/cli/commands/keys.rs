use crate::cli::context::AppContext;
use crate::cli::output;
use crate::core::errors::Result;

/// Execute the `gpgfile keys` command.
///
/// Lists every recipient the catalog offers for encryption.
pub fn execute(ctx: &AppContext, json: bool) -> Result<()> {
    let catalog = ctx.catalog();

    if json {
        let rendered =
            serde_json::to_string_pretty(catalog.identities()).map_err(std::io::Error::from)?;
        println!("{rendered}");
        return Ok(());
    }

    if catalog.is_empty() {
        output::warning("No recipients available. Recipient encryption is disabled.");
        let backend = ctx.orchestrator().backend();
        if !backend.is_available() {
            println!(
                "  GnuPG was not found at '{}'. Install it or set [gpg] binary in the config file.",
                backend.gpg_path().display()
            );
        }
        println!("  Create a key with 'gpg --full-generate-key', or use 'gpgfile encrypt --passphrase'.");
        return Ok(());
    }

    output::header(&format!("Available recipients ({})", catalog.len()));
    for ki in catalog.identities() {
        println!("  • {}  {}", ki.display_name, ki.fingerprint);
    }

    Ok(())
}
