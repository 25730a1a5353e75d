// ------------------------------------------------------------
// Module declarations
// ------------------------------------------------------------
//
// Each module represents a well-defined responsibility:
//
// - cli:        Command-line parsing and usage text
// - config:     Runtime settings loaded from an optional JSON file
// - error:      Typed error taxonomy
// - schema:     Wire structs and the flat listing record
// - query:      Request target construction per collection
// - source:     Listing source seam + HTTP fetcher
// - normalizer: Payload decoding into flat records
// - collector:  Concurrent per-collection fetch and merge
// - writer:     CSV / JSON export
//
mod cli;
mod collector;
mod config;
mod error;
mod normalizer;
mod query;
mod schema;
mod source;
mod writer;

// ------------------------------------------------------------
// External dependencies
// ------------------------------------------------------------

use std::sync::Arc;

use anyhow::bail;
use log::info;

use cli::Invocation;
use collector::{FailurePolicy, run_collections};
use config::load_config;
use source::HttpListingSource;

// ------------------------------------------------------------
// Application entry point
// ------------------------------------------------------------
//
// Responsibilities:
// - Initialize logging
// - Parse arguments and load configuration
// - Run one fetch task per requested collection
// - Export the combined listings exactly once
//
// Exit status is non-zero when a collection fails (immediately
// under fail-fast, after the export under keep-going) or when
// the export itself fails.
//
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = match cli::parse_from(std::env::args_os())? {
        Invocation::Run(args) => args,
        Invocation::ShowUsage(usage) => {
            println!("{usage}");
            return Ok(());
        }
    };

    let mut config = load_config(args.config.as_deref())?;
    if args.keep_going {
        config.failure_policy = FailurePolicy::KeepGoing;
    }

    let source = Arc::new(HttpListingSource::new(
        config.api_base.clone(),
        config.timeout(),
    )?);

    let report = run_collections(
        source,
        &args.fetch_options(),
        &args.collections,
        config.failure_policy,
    )
    .await?;

    let path =
        writer::write_listings(&config.output_dir, args.output_format(), &report.listings)?;

    info!("{} output={}", report.summary(), path.display());

    if !report.failures.is_empty() {
        let failed: Vec<&str> = report
            .failures
            .iter()
            .map(|f| f.collection.as_str())
            .collect();
        bail!(
            "{} collection(s) failed: {}",
            failed.len(),
            failed.join(", ")
        );
    }

    Ok(())
}
