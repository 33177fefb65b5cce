use clap::Parser;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use gpgfile::cli::{self, Cli, Commands, output};
use gpgfile::config::app_config::AppConfig;

fn main() {
    let args = Cli::parse();

    let filter = EnvFilter::try_from_env("GPGFILE_LOG").unwrap_or_else(|_| {
        if args.verbose {
            EnvFilter::new("gpgfile=debug")
        } else if args.quiet {
            EnvFilter::new("gpgfile=error")
        } else {
            EnvFilter::new("gpgfile=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    let mut config = match AppConfig::load(args.config.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            output::error(&format!("Error: {e}"));
            std::process::exit(1);
        }
    };
    if let Some(gpg) = &args.gpg {
        config.gpg.binary = gpg.clone();
    }

    let ctx = cli::context::init(config);

    let result = match &args.command {
        Commands::Keys { json } => cli::commands::keys::execute(ctx, *json),
        Commands::Encrypt {
            file,
            recipient,
            passphrase,
        } => cli::commands::encrypt::execute(ctx, file, recipient.as_deref(), *passphrase),
        Commands::Decrypt { file } => cli::commands::decrypt::execute(ctx, file),
    };

    if let Err(e) = result {
        output::error(&format!("Error: {e}"));
        std::process::exit(1);
    }
}
