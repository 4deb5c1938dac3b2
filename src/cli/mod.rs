//! CLI adapter for repovec
//!
//! A single entry operation: index one repository for one user.
//!
//! ```text
//! repovec <PATH> [USER_ID]
//! ```
//!
//! Credentials come from `OPENAI_API_KEY` and `QDRANT_API_KEY`;
//! everything else from the configuration file.

pub mod ingest;
pub mod output;

use clap::Parser;

use crate::core::config::Config;
use crate::core::services::Services;

/// repovec - chunk a repository and store its embeddings
///
/// Walks the repository, splits each source file into chunks of
/// whole lines, embeds every chunk and stores it in Qdrant.
#[derive(Parser, Debug)]
#[command(name = "repovec")]
#[command(version)]
#[command(about = "Chunk a repository and store its embeddings", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub ingest: ingest::IngestArgs,
}

/// Run the CLI with the provided arguments
pub async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::load()?;
    config.log_config();

    let services = Services::new(config)?;

    ingest::execute(cli.ingest, &services).await?;
    Ok(())
}
