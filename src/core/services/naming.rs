use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// Extension appended to encrypted files.
pub const ENCRYPTED_EXTENSION: &str = ".gpg";

/// Output path for encrypting `input`: the same path with `.gpg` appended.
pub fn encrypted_output_path(input: &Path) -> PathBuf {
    let mut raw = input.as_os_str().to_os_string();
    raw.push(ENCRYPTED_EXTENSION);
    PathBuf::from(raw)
}

/// Output path for decrypting `input`.
///
/// Every literal `.gpg` in the file name is removed; parent directories
/// are left alone. The name is handled as raw bytes, so names that are
/// not valid UTF-8 work too. Returns `None` when the name contains no
/// `.gpg` or nothing is left after removing it.
pub fn decrypted_output_path(input: &Path) -> Option<PathBuf> {
    let name = input.file_name()?.as_encoded_bytes();
    let needle = ENCRYPTED_EXTENSION.as_bytes();

    let mut stripped = OsString::new();
    let mut piece_start = 0;
    let mut removed = false;
    let mut i = 0;
    while i < name.len() {
        if name[i..].starts_with(needle) {
            stripped.push(encoded_piece(&name[piece_start..i]));
            i += needle.len();
            piece_start = i;
            removed = true;
        } else {
            i += 1;
        }
    }
    stripped.push(encoded_piece(&name[piece_start..]));

    if !removed || stripped.is_empty() {
        return None;
    }
    Some(input.with_file_name(stripped))
}

/// Rebuild an `OsStr` from a slice of a file name's encoded bytes.
fn encoded_piece(bytes: &[u8]) -> &OsStr {
    // SAFETY: every slice passed here starts and ends at the start or end of
    // the name or next to an ASCII `.gpg` match, which are valid split points
    // of the encoded bytes `as_encoded_bytes` returned.
    unsafe { OsStr::from_encoded_bytes_unchecked(bytes) }
}
