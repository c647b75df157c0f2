//! recordlayer console
//!
//! Loads users from a delimited file, then answers queries read from standard input.

use std::fs::File;
use std::io::{self, BufReader};

use clap::Parser;
use eyre::{Context, Result};
use tracing::info;

use recordlayer_console::cli::Cli;
use recordlayer_console::ingest::ingest;
use recordlayer_console::session::Session;
use recordlayer_console::user::user_store;

fn setup_logging(verbose: bool) {
    // Logs go to stderr so results on stdout stay clean
    let level = if verbose { tracing::Level::DEBUG } else { tracing::Level::INFO };

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    setup_logging(cli.verbose);

    let file = File::open(&cli.input)
        .with_context(|| format!("Failed to open {}", cli.input.display()))?;

    let store = user_store(1_000);
    let report = ingest(BufReader::new(file), cli.delimiter, &store).await?;
    info!(input = %cli.input.display(), ?report, "loaded users");

    println!("{}", store.row_count().await);

    let session = Session::new(store);
    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    session.run(stdin, &mut io::stdout(), cli.format).await?;

    info!("session closed");
    Ok(())
}
