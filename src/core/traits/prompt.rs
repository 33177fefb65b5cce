use zeroize::Zeroizing;

/// Port for collecting a passphrase from the user.
///
/// The call blocks until the user confirms or dismisses the prompt.
/// `None` means the prompt was dismissed or could not be shown.
pub trait SecretPrompt {
    fn prompt_for_secret(&self, prompt: &str) -> Option<Zeroizing<String>>;
}
