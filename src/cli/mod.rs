pub mod commands;
pub mod context;
pub mod output;

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Encrypt a file for a keyring recipient or with a passphrase, and decrypt it again.
#[derive(Parser, Debug)]
#[command(name = "gpgfile", version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Quiet mode: only show errors
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Path to alternative config file
    #[arg(long, global = true, env = "GPGFILE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Path to the gpg binary (overrides the config file)
    #[arg(long, global = true, env = "GPGFILE_GPG")]
    pub gpg: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the recipients available for encryption
    Keys {
        /// Print the list as JSON
        #[arg(long)]
        json: bool,
    },

    /// Encrypt a file to <FILE>.gpg
    Encrypt {
        /// File to encrypt
        file: PathBuf,

        /// Recipient e-mail or key fingerprint (see 'gpgfile keys')
        #[arg(short, long, required_unless_present = "passphrase")]
        recipient: Option<String>,

        /// Encrypt with a passphrase instead of a public key
        #[arg(short, long, conflicts_with = "recipient")]
        passphrase: bool,
    },

    /// Decrypt a .gpg file next to it
    Decrypt {
        /// File to decrypt
        file: PathBuf,
    },
}
