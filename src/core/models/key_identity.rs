use serde::Serialize;

/// A recipient that can be chosen for encryption: one e-mail-like
/// token taken from a keyring entry's primary user-id, together with
/// the fingerprint of that entry.
///
/// A keyring entry whose user-id carries several `<...>` tokens yields
/// one `KeyIdentity` per token, all sharing the same fingerprint.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct KeyIdentity {
    pub display_name: String,
    pub fingerprint: String,
}

impl std::fmt::Display for KeyIdentity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.display_name, self.fingerprint)
    }
}

/// One public key as listed by the backend's key store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PublicKeyRecord {
    pub fingerprint: String,
    /// User-ids in keyring order; the first one is the primary.
    pub uids: Vec<String>,
}

impl PublicKeyRecord {
    /// The primary user-id, if the key has any.
    pub fn primary_uid(&self) -> Option<&str> {
        self.uids.first().map(|s| s.as_str())
    }
}
