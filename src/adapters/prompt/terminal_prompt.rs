use std::io::{self, BufRead, IsTerminal};

use dialoguer::Password;
use tracing::warn;
use zeroize::Zeroizing;

use crate::core::traits::prompt::SecretPrompt;

/// Collects a passphrase from the terminal with hidden input.
///
/// When stdin is not a terminal (piped input), a single line is read
/// from it instead, so scripted use works without a TTY.
#[derive(Debug, Clone, Default)]
pub struct TerminalPrompt {
    confirm: bool,
}

impl TerminalPrompt {
    pub fn new() -> Self {
        Self::default()
    }

    /// Ask for the passphrase twice and require both entries to match.
    pub fn with_confirmation(mut self, confirm: bool) -> Self {
        self.confirm = confirm;
        self
    }

    fn read_piped(reader: &mut impl BufRead) -> Option<Zeroizing<String>> {
        let mut line = Zeroizing::new(String::new());
        match reader.read_line(&mut line) {
            Ok(0) => None,
            Ok(_) => {
                let len = line.trim_end_matches(['\r', '\n']).len();
                line.truncate(len);
                Some(line)
            }
            Err(e) => {
                warn!("Failed to read passphrase from stdin: {e}");
                None
            }
        }
    }
}

impl SecretPrompt for TerminalPrompt {
    fn prompt_for_secret(&self, prompt: &str) -> Option<Zeroizing<String>> {
        if !io::stdin().is_terminal() {
            return Self::read_piped(&mut io::stdin().lock());
        }

        let mut input = Password::new().with_prompt(prompt).allow_empty_password(true);
        if self.confirm {
            input = input.with_confirmation("Confirm password", "Passwords do not match");
        }

        match input.interact() {
            Ok(secret) => Some(Zeroizing::new(secret)),
            Err(e) => {
                warn!("Password prompt dismissed: {e}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn piped_line_drops_newline() {
        let mut input = io::Cursor::new(b"correct horse\r\nignored\n".to_vec());
        let secret = TerminalPrompt::read_piped(&mut input).unwrap();
        assert_eq!(secret.as_str(), "correct horse");
    }

    #[test]
    fn piped_eof_is_dismissal() {
        let mut input = io::Cursor::new(Vec::new());
        assert!(TerminalPrompt::read_piped(&mut input).is_none());
    }

    #[test]
    fn piped_blank_line_is_empty_secret() {
        let mut input = io::Cursor::new(b"\n".to_vec());
        let secret = TerminalPrompt::read_piped(&mut input).unwrap();
        assert!(secret.is_empty());
    }
}
