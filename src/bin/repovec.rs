//! repovec CLI - chunk a repository and store its embeddings
//!
//! # Examples
//!
//! ```bash
//! # Index a repository for the default user
//! OPENAI_API_KEY=sk-... repovec /path/to/repo
//!
//! # Index for a specific user
//! repovec /path/to/repo alice
//!
//! # Structured logs
//! REPOVEC_LOG_FORMAT=json RUST_LOG=repovec=debug repovec .
//! ```

use clap::Parser;
use repovec::cli::{output, run, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "repovec=info".into());
    let json = std::env::var("REPOVEC_LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    // Logs go to stderr; stdout carries the summary
    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_writer(std::io::stderr),
            )
            .init();
    }
}

#[tokio::main]
async fn main() {
    init_logging();

    let cli = Cli::parse();
    tracing::debug!("repovec {}", env!("CARGO_PKG_VERSION"));

    if let Err(e) = run(cli).await {
        output::print_error(&e.to_string());
        std::process::exit(1);
    }
}
