use std::path::PathBuf;

/// Uniform result of a single backend operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendResult {
    pub ok: bool,
    /// Short human-readable status (e.g. "encryption ok").
    pub status: String,
    /// Error text the backend wrote, if any.
    pub stderr: Option<String>,
}

impl BackendResult {
    /// Human-readable detail: the status on success; on failure the
    /// backend's error text when present, otherwise the status.
    pub fn detail(&self) -> &str {
        if self.ok {
            return &self.status;
        }
        match self.stderr.as_deref() {
            Some(text) if !text.is_empty() => text,
            _ => &self.status,
        }
    }
}

/// What a single encrypt or decrypt request produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Outcome {
    pub ok: bool,
    pub output_path: PathBuf,
    pub status_detail: String,
}

impl Outcome {
    pub fn from_backend(result: &BackendResult, output_path: PathBuf) -> Self {
        Self {
            ok: result.ok,
            output_path,
            status_detail: result.detail().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result(ok: bool, status: &str, stderr: Option<&str>) -> BackendResult {
        BackendResult {
            ok,
            status: status.into(),
            stderr: stderr.map(String::from),
        }
    }

    #[test]
    fn failure_prefers_stderr() {
        let r = result(false, "decryption failed", Some("gpg: no valid OpenPGP data found.\n"));
        assert_eq!(r.detail(), "gpg: no valid OpenPGP data found.\n");
    }

    #[test]
    fn failure_falls_back_to_status() {
        assert_eq!(result(false, "no secret key", None).detail(), "no secret key");
        assert_eq!(result(false, "no secret key", Some("")).detail(), "no secret key");
    }

    #[test]
    fn success_uses_status() {
        let r = result(true, "encryption ok", Some("gpg: some chatter"));
        let outcome = Outcome::from_backend(&r, PathBuf::from("a.gpg"));
        assert!(outcome.ok);
        assert_eq!(outcome.status_detail, "encryption ok");
    }
}
