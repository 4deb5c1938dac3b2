//! Ingest command - chunk, embed and store a repository

use crate::cli::output::{self, colors};
use crate::core::services::Services;
use crate::core::types::RunReport;
use clap::Args;
use std::path::PathBuf;

/// Arguments for the ingest command
#[derive(Args, Debug)]
pub struct IngestArgs {
    /// Path to the repository to index
    pub path: PathBuf,

    /// User id recorded on every stored chunk
    pub user_id: Option<String>,
}

/// Execute the ingest command
pub async fn execute(
    args: IngestArgs,
    services: &Services,
) -> Result<RunReport, Box<dyn std::error::Error>> {
    // Validate path
    let path = args.path.canonicalize().map_err(|e| {
        format!(
            "Invalid path '{}': {}. Make sure the path exists and is accessible.",
            args.path.display(),
            e
        )
    })?;

    if !path.is_dir() {
        return Err(format!(
            "Path '{}' is not a directory. repovec indexes directories, not individual files.",
            path.display()
        )
        .into());
    }

    let user_id = args
        .user_id
        .unwrap_or_else(|| services.config.run.default_user_id.clone());
    if user_id.trim().is_empty() {
        return Err("User id cannot be empty.".into());
    }

    eprintln!(
        "Indexing {} for {}...",
        colors::file_path(&path.display().to_string()),
        colors::label(&user_id)
    );

    let pipeline = services.create_pipeline()?;
    let report = pipeline.run(&path, &user_id, services.sink.as_ref()).await?;

    output::print_summary(&report);

    Ok(report)
}
