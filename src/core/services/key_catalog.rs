use std::sync::OnceLock;

use regex::Regex;
use tracing::{debug, error, info, warn};

use crate::core::models::key_identity::{KeyIdentity, PublicKeyRecord};
use crate::core::traits::backend::CryptoBackend;

/// Marker found in the primary user-id of keys the platform creates
/// for itself. Such keys are never offered as recipients.
pub const DEFAULT_EXCLUDE_MARKER: &str = "Created on UBUNTU";

static ADDRESS_PATTERN: OnceLock<Regex> = OnceLock::new();

fn address_pattern() -> &'static Regex {
    ADDRESS_PATTERN.get_or_init(|| Regex::new(r"<(.*?)>").expect("address pattern is valid"))
}

/// Recipients available for encryption, built once from the keyring.
///
/// Ordering follows the backend's listing; nothing is sorted or
/// de-duplicated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KeyCatalog {
    identities: Vec<KeyIdentity>,
}

impl KeyCatalog {
    /// Query the backend's key store and build the catalog.
    ///
    /// Never fails: an unreadable keyring or missing backend is logged
    /// and yields an empty catalog, which callers treat as "recipient
    /// encryption unavailable".
    pub fn load<B: CryptoBackend + ?Sized>(backend: &B, exclude_marker: &str) -> Self {
        info!(backend = backend.name(), "Loading public keys...");

        let records = match backend.list_public_keys() {
            Ok(records) => records,
            Err(e) => {
                error!("Error loading keys: {e}");
                return Self::default();
            }
        };

        if records.is_empty() {
            warn!("No public keys found. Create one using 'gpg --full-generate-key'.");
            return Self::default();
        }

        let catalog = Self::from_records(&records, exclude_marker);
        let found: Vec<String> = catalog.identities.iter().map(|k| k.to_string()).collect();
        info!("Keys found: [{}]", found.join(", "));
        catalog
    }

    /// Flatten keyring records into identities.
    ///
    /// Records without user-ids, or whose primary user-id contains
    /// `exclude_marker`, are skipped. Every non-empty `<...>` token in the
    /// primary user-id becomes one identity.
    pub fn from_records(records: &[PublicKeyRecord], exclude_marker: &str) -> Self {
        let mut identities = Vec::new();

        for record in records {
            let Some(uid) = record.primary_uid() else {
                debug!(fingerprint = %record.fingerprint, "skipping key without user-id");
                continue;
            };

            if !exclude_marker.is_empty() && uid.contains(exclude_marker) {
                debug!(fingerprint = %record.fingerprint, "skipping platform-default key");
                continue;
            }

            if record.fingerprint.is_empty() {
                debug!(uid, "skipping key without fingerprint");
                continue;
            }

            for capture in address_pattern().captures_iter(uid) {
                let address = &capture[1];
                if address.is_empty() {
                    continue;
                }
                identities.push(KeyIdentity {
                    display_name: address.to_string(),
                    fingerprint: record.fingerprint.clone(),
                });
            }
        }

        Self { identities }
    }

    pub fn identities(&self) -> &[KeyIdentity] {
        &self.identities
    }

    pub fn len(&self) -> usize {
        self.identities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.identities.is_empty()
    }

    /// Find the first identity whose display name or fingerprint matches
    /// `query`. Both comparisons ignore case; fingerprints also ignore spaces.
    pub fn resolve(&self, query: &str) -> Option<&KeyIdentity> {
        let query = query.trim();
        if query.is_empty() {
            return None;
        }
        let compact: String = query.chars().filter(|c| !c.is_whitespace()).collect();

        self.identities.iter().find(|ki| {
            ki.display_name.eq_ignore_ascii_case(query)
                || ki.fingerprint.eq_ignore_ascii_case(&compact)
        })
    }
}
