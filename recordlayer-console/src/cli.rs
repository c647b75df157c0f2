//! CLI definitions

use clap::Parser;
use std::path::PathBuf;

/// Load users from a delimited file and query them interactively
#[derive(Debug, Parser)]
#[command(name = "recordlayer", about = "Load users into an in-memory record store and query them")]
pub struct Cli {
    /// Delimited input file, one `firstname,lastname,email,username` record per line
    #[arg(short, long, default_value = "MOCK_DATA.csv")]
    pub input: PathBuf,

    /// Field delimiter
    #[arg(short, long, default_value_t = ',')]
    pub delimiter: char,

    /// How found rows are printed
    #[arg(short, long, default_value = "debug")]
    pub format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Output format for found rows
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Debug,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" | "text" => Ok(Self::Debug),
            "json" => Ok(Self::Json),
            other => Err(format!("unknown output format: {other}")),
        }
    }
}
