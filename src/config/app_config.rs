use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::core::errors::{GpgFileError, Result};
use crate::core::services::key_catalog::DEFAULT_EXCLUDE_MARKER;

/// Top-level configuration read from `config.toml`.
///
/// Every section is optional; missing values fall back to defaults.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub gpg: GpgSection,
    pub keyring: KeyringSection,
    pub output: OutputSection,
}

impl AppConfig {
    /// Load the configuration.
    ///
    /// An explicit path must exist. Without one, the per-user file under
    /// the platform config directory is used when present, and defaults
    /// otherwise.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        let path = match explicit {
            Some(path) => {
                if !path.exists() {
                    return Err(GpgFileError::InvalidConfig {
                        detail: format!("config file not found: {}", path.display()),
                    });
                }
                path.to_path_buf()
            }
            None => match Self::default_path() {
                Some(path) if path.exists() => path,
                _ => return Ok(Self::default()),
            },
        };

        let content = std::fs::read_to_string(&path)?;
        Self::from_toml(&content).map_err(|e| match e {
            GpgFileError::InvalidConfig { detail } => GpgFileError::InvalidConfig {
                detail: format!("{}: {detail}", path.display()),
            },
            other => other,
        })
    }

    /// Parse and validate configuration text.
    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| GpgFileError::InvalidConfig {
            detail: format!("Failed to parse config.toml: {e}"),
        })?;

        if config.gpg.binary.as_os_str().is_empty() {
            return Err(GpgFileError::InvalidConfig {
                detail: "[gpg] binary must not be empty".into(),
            });
        }

        Ok(config)
    }

    /// `<config dir>/gpgfile/config.toml`, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("gpgfile").join("config.toml"))
    }
}

/// The `[gpg]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GpgSection {
    /// Path to the gpg executable.
    pub binary: PathBuf,
    /// Keyring directory passed as `--homedir`.
    pub homedir: Option<PathBuf>,
}

impl Default for GpgSection {
    fn default() -> Self {
        Self {
            binary: PathBuf::from("gpg"),
            homedir: None,
        }
    }
}

/// The `[keyring]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct KeyringSection {
    /// Keys whose primary user-id contains this text are hidden.
    pub exclude_marker: String,
}

impl Default for KeyringSection {
    fn default() -> Self {
        Self {
            exclude_marker: DEFAULT_EXCLUDE_MARKER.to_string(),
        }
    }
}

/// The `[output]` section.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct OutputSection {
    /// Replace an existing output file instead of refusing to run.
    pub overwrite: bool,
}

impl Default for OutputSection {
    fn default() -> Self {
        Self { overwrite: true }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_file_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.gpg.binary, PathBuf::from("gpg"));
        assert!(config.gpg.homedir.is_none());
        assert_eq!(config.keyring.exclude_marker, DEFAULT_EXCLUDE_MARKER);
        assert!(config.output.overwrite);
    }

    #[test]
    fn full_file_parses() {
        let config = AppConfig::from_toml(
            r#"
[gpg]
binary = "/usr/local/bin/gpg2"
homedir = "/tmp/keys"

[keyring]
exclude_marker = "Created on FEDORA"

[output]
overwrite = false
"#,
        )
        .unwrap();
        assert_eq!(config.gpg.binary, PathBuf::from("/usr/local/bin/gpg2"));
        assert_eq!(config.gpg.homedir, Some(PathBuf::from("/tmp/keys")));
        assert_eq!(config.keyring.exclude_marker, "Created on FEDORA");
        assert!(!config.output.overwrite);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config = AppConfig::from_toml("[gpg]\nhomedir = \"/k\"\n").unwrap();
        assert_eq!(config.gpg.binary, PathBuf::from("gpg"));
        assert!(config.output.overwrite);
    }

    #[test]
    fn empty_binary_rejected() {
        let result = AppConfig::from_toml("[gpg]\nbinary = \"\"\n");
        assert!(matches!(result, Err(GpgFileError::InvalidConfig { .. })));
    }

    #[test]
    fn malformed_toml_rejected() {
        let result = AppConfig::from_toml("[gpg\nbinary = ");
        assert!(matches!(result, Err(GpgFileError::InvalidConfig { .. })));
    }

    #[test]
    fn explicit_missing_path_rejected() {
        let result = AppConfig::load(Some(Path::new("/nonexistent/gpgfile.toml")));
        assert!(matches!(result, Err(GpgFileError::InvalidConfig { .. })));
    }
}
