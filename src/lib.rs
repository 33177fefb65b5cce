//! gpgfile - encrypt a file for a keyring recipient or with a passphrase,
//! and decrypt it again, by driving GnuPG.
//!
//! The `core` layer holds the key catalog and the encrypt/decrypt
//! orchestration behind the `CryptoBackend` and `SecretPrompt` ports;
//! `adapters` binds those ports to the `gpg` binary and the terminal.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
