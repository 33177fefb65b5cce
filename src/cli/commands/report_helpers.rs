use crate::cli::output;
use crate::core::errors::{GpgFileError, Result};
use crate::core::models::outcome::Outcome;

/// Report an operation's outcome to the user.
///
/// A rejected request keeps its own error so the cause reaches stderr
/// whatever the log filter is.
pub fn conclude(operation: &str, outcome: Result<Outcome>) -> Result<()> {
    let outcome = outcome?;
    if !outcome.ok {
        return Err(GpgFileError::Backend {
            reason: format!("{operation} failed: {}", outcome.status_detail.trim_end()),
        });
    }

    output::success(&format!("Saved to {}", outcome.output_path.display()));
    output::detail(&format!("Status: {}", outcome.status_detail));
    Ok(())
}
