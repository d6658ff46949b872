//! Entry point for the command-line interface.
#![forbid(unsafe_code)]

use kerbside_cli::CliError;
use tracing_subscriber::EnvFilter;

fn main() {
    init_logging();
    match kerbside_cli::run() {
        Ok(()) => {}
        Err(CliError::ArgumentParsing(err)) => err.exit(),
        Err(err) => {
            eprintln!("kerbside: {err}");
            std::process::exit(1);
        }
    }
}

fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("kerbside=info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
