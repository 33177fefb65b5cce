use std::fs::File;
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};
use std::process::{Command, Output, Stdio};

use tracing::trace;

use crate::core::errors::{GpgFileError, Result};
use crate::core::models::key_identity::PublicKeyRecord;
use crate::core::models::outcome::BackendResult;
use crate::core::traits::backend::CryptoBackend;

/// Status keywords gpg writes to `--status-fd`, with the status text
/// reported for each. The last one seen wins.
const STATUS_MESSAGES: &[(&str, &str)] = &[
    ("END_ENCRYPTION", "encryption ok"),
    ("DECRYPTION_OKAY", "decryption ok"),
    ("DECRYPTION_FAILED", "decryption failed"),
    ("NO_SECKEY", "no secret key"),
    ("INV_RECP", "invalid recipient"),
    ("BAD_PASSPHRASE", "bad passphrase"),
    ("MISSING_PASSPHRASE", "need passphrase"),
    ("NODATA", "no data was provided"),
    ("FAILURE", "failure"),
    ("ERROR", "error"),
];

/// What gets written to gpg's stdin after an optional passphrase line.
enum Payload<'a> {
    File(&'a Path),
    Bytes(&'a [u8]),
}

/// GPG backend that shells out to the system `gpg` binary.
///
/// Every invocation runs non-interactively and writes machine-readable
/// status lines to stdout, which are turned into a `BackendResult`.
/// Plaintext and ciphertext are streamed through stdin; results go
/// straight to the `--output` file.
pub struct GpgBackend {
    /// Path to the gpg binary (defaults to "gpg").
    gpg_path: PathBuf,
    /// Optional keyring directory passed as `--homedir`.
    homedir: Option<PathBuf>,
}

impl GpgBackend {
    /// Create a new backend using the default `gpg` binary.
    pub fn new() -> Self {
        Self::with_path(PathBuf::from("gpg"))
    }

    /// Create a new backend with a custom gpg binary path.
    pub fn with_path(gpg_path: PathBuf) -> Self {
        Self {
            gpg_path,
            homedir: None,
        }
    }

    /// Use a specific keyring directory instead of gpg's default.
    pub fn with_homedir(mut self, homedir: Option<PathBuf>) -> Self {
        self.homedir = homedir;
        self
    }

    pub fn gpg_path(&self) -> &Path {
        &self.gpg_path
    }

    /// Check if GPG is available on the system.
    pub fn is_available(&self) -> bool {
        Command::new(&self.gpg_path)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok_and(|s| s.success())
    }

    /// Base command shared by every invocation.
    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.gpg_path);
        if let Some(homedir) = &self.homedir {
            cmd.arg("--homedir").arg(homedir);
        }
        cmd.args(["--batch", "--yes", "--no-tty"]);
        cmd
    }

    /// Run an operation and interpret its status output.
    ///
    /// The input is opened before gpg starts, so a vanished input file
    /// surfaces as an I/O `NotFound` error rather than a gpg failure.
    fn run(
        &self,
        mut cmd: Command,
        passphrase: Option<&str>,
        payload: Payload<'_>,
        success_keyword: &str,
    ) -> Result<BackendResult> {
        let mut source: Box<dyn Read + '_> = match payload {
            Payload::File(path) => Box::new(File::open(path)?),
            Payload::Bytes(bytes) => Box::new(bytes),
        };

        cmd.args(["--status-fd", "1"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());

        let args: Vec<_> = cmd.get_args().collect();
        trace!(gpg = %self.gpg_path.display(), ?args, "running gpg");

        let mut child = cmd.spawn().map_err(|e| GpgFileError::Backend {
            reason: format!("Failed to run gpg ({}): {e}", self.gpg_path.display()),
        })?;

        if let Some(mut stdin) = child.stdin.take() {
            // gpg stops reading early when it rejects the request; its
            // exit status and stderr describe why.
            match feed(&mut stdin, passphrase, &mut source) {
                Err(e) if e.kind() == ErrorKind::BrokenPipe => {}
                Err(e) => {
                    return Err(GpgFileError::Backend {
                        reason: format!("Failed to write to gpg stdin: {e}"),
                    });
                }
                Ok(()) => {}
            }
        }

        let output = child
            .wait_with_output()
            .map_err(|e| GpgFileError::Backend {
                reason: format!("gpg process failed: {e}"),
            })?;

        let result = interpret(&output, success_keyword);
        trace!(ok = result.ok, status = %result.status, "gpg finished");
        Ok(result)
    }
}

impl Default for GpgBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl CryptoBackend for GpgBackend {
    fn list_public_keys(&self) -> Result<Vec<PublicKeyRecord>> {
        let mut cmd = self.command();
        cmd.args(["--with-colons", "--fixed-list-mode", "--list-keys"]);

        let output = cmd.output().map_err(|e| GpgFileError::KeyringUnavailable {
            reason: format!("Failed to run gpg ({}): {e}", self.gpg_path.display()),
        })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(GpgFileError::KeyringUnavailable {
                reason: format!("gpg exited with error: {stderr}"),
            });
        }

        Ok(parse_colon_listing(&String::from_utf8_lossy(&output.stdout)))
    }

    fn encrypt_to_recipients(
        &self,
        input: &Path,
        fingerprints: &[String],
        output: &Path,
    ) -> Result<BackendResult> {
        if fingerprints.is_empty() {
            return Err(GpgFileError::Backend {
                reason: "No recipients provided".into(),
            });
        }

        let mut cmd = self.command();
        cmd.args(["--encrypt", "--trust-model", "always"]);
        for fingerprint in fingerprints {
            cmd.arg("--recipient").arg(fingerprint);
        }
        cmd.arg("--output").arg(output);

        self.run(cmd, None, Payload::File(input), "END_ENCRYPTION")
    }

    fn encrypt_symmetric(
        &self,
        input: &Path,
        passphrase: &str,
        output: &Path,
    ) -> Result<BackendResult> {
        let mut cmd = self.command();
        cmd.args([
            "--symmetric",
            "--pinentry-mode",
            "loopback",
            "--passphrase-fd",
            "0",
        ]);
        cmd.arg("--output").arg(output);

        self.run(cmd, Some(passphrase), Payload::File(input), "END_ENCRYPTION")
    }

    fn decrypt(&self, ciphertext: &[u8], output: &Path) -> Result<BackendResult> {
        let mut cmd = self.command();
        cmd.arg("--decrypt").arg("--output").arg(output);

        self.run(cmd, None, Payload::Bytes(ciphertext), "DECRYPTION_OKAY")
    }

    fn name(&self) -> &str {
        "gpg"
    }
}

/// Write the passphrase line (if any) and then the payload to gpg.
fn feed<W: Write>(stdin: &mut W, passphrase: Option<&str>, source: &mut dyn Read) -> std::io::Result<()> {
    if let Some(passphrase) = passphrase {
        stdin.write_all(passphrase.as_bytes())?;
        stdin.write_all(b"\n")?;
    }
    std::io::copy(source, stdin)?;
    Ok(())
}

/// Turn a finished gpg process into a `BackendResult`.
///
/// Success needs both a zero exit status and the operation's success
/// keyword on the status channel.
fn interpret(output: &Output, success_keyword: &str) -> BackendResult {
    let status_text = String::from_utf8_lossy(&output.stdout);
    let (saw_success, status) = parse_status(&status_text, success_keyword);

    let status = status.unwrap_or_else(|| match output.status.code() {
        Some(code) => format!("exit status {code}"),
        None => "terminated by signal".to_string(),
    });

    let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
    let stderr = (!stderr.trim().is_empty()).then_some(stderr);

    BackendResult {
        ok: output.status.success() && saw_success,
        status,
        stderr,
    }
}

/// Scan `[GNUPG:] KEYWORD ...` lines.
///
/// Returns whether `success_keyword` appeared, and the message for the
/// last keyword found in `STATUS_MESSAGES`.
fn parse_status(text: &str, success_keyword: &str) -> (bool, Option<String>) {
    let mut saw_success = false;
    let mut status = None;

    for line in text.lines() {
        let Some(rest) = line.strip_prefix("[GNUPG:] ") else {
            continue;
        };
        let keyword = rest.split_whitespace().next().unwrap_or_default();

        if keyword == success_keyword {
            saw_success = true;
        }
        if let Some((_, message)) = STATUS_MESSAGES.iter().find(|(k, _)| *k == keyword) {
            status = Some(message.to_string());
        }
    }

    (saw_success, status)
}

/// Parse `gpg --with-colons --fixed-list-mode --list-keys` output.
///
/// Each `pub` line starts a record. Its fingerprint is the first `fpr`
/// line before any `sub` line; `uid` lines are collected in order.
fn parse_colon_listing(text: &str) -> Vec<PublicKeyRecord> {
    let mut records = Vec::new();
    let mut current: Option<PublicKeyRecord> = None;
    let mut primary_fpr_pending = false;

    for line in text.lines() {
        let fields: Vec<&str> = line.split(':').collect();
        match fields[0] {
            "pub" => {
                records.extend(current.take());
                current = Some(PublicKeyRecord::default());
                primary_fpr_pending = true;
            }
            "fpr" if primary_fpr_pending => {
                if let (Some(record), Some(fpr)) = (current.as_mut(), fields.get(9)) {
                    record.fingerprint = fpr.to_string();
                }
                primary_fpr_pending = false;
            }
            "uid" => {
                if let (Some(record), Some(uid)) = (current.as_mut(), fields.get(9)) {
                    record.uids.push(unescape_field(uid));
                }
            }
            "sub" => primary_fpr_pending = false,
            _ => {}
        }
    }

    records.extend(current);
    records
}

/// Decode the `\xNN` escapes gpg uses inside colon-listing fields.
fn unescape_field(field: &str) -> String {
    let bytes = field.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;

    while i < bytes.len() {
        if bytes[i] == b'\\' && i + 3 < bytes.len() && bytes[i + 1] == b'x' {
            let decoded = std::str::from_utf8(&bytes[i + 2..i + 4])
                .ok()
                .and_then(|hex| u8::from_str_radix(hex, 16).ok());
            if let Some(byte) = decoded {
                out.push(byte);
                i += 4;
                continue;
            }
        }
        out.push(bytes[i]);
        i += 1;
    }

    String::from_utf8_lossy(&out).into_owned()
}
