use anyhow::{Context, Result};
use log::info;
use std::env;
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::bibtex::read_bibliography;
use crate::cli::EnrichArgs;
use crate::common::{
    create_lookup_progress_bar, format_elapsed, setup_logging, write_report, EnrichStats,
};
use crate::resolve::{enrich_records, ScopusClient};

/// Environment variable consulted when --api-key is not given
pub const API_KEY_ENV: &str = "SCOPUS_API_KEY";

/// Run the full pipeline: read records, resolve metrics, write the report
pub fn run_enrich(args: EnrichArgs) -> Result<EnrichStats> {
    setup_logging(&args.log_level)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(run_enrich_async(args))
}

pub async fn run_enrich_async(args: EnrichArgs) -> Result<EnrichStats> {
    let start = Instant::now();

    // Fatal before any record is touched; lookups cannot work without it
    let api_key = resolve_api_key(args.api_key.clone())?;

    let records = read_bibliography(&args.input)?;

    let client = Arc::new(
        ScopusClient::new(api_key, Duration::from_secs(args.timeout))
            .context("Failed to build HTTP client")?,
    );

    info!(
        "Resolving journal metrics for {} records (concurrency: {})",
        records.len(),
        args.concurrency
    );
    let pb = create_lookup_progress_bar(records.len() as u64);
    let results = enrich_records(records, client, args.concurrency, Some(pb.clone())).await;
    pb.finish_and_clear();

    write_report(&args.output, &results.rows)?;
    let mut stats = results.stats;
    stats.rows_written = results.rows.len();

    info!("Enrichment complete in {}", format_elapsed(start.elapsed()));
    info!("  Records read: {}", stats.total_records);
    info!("  ISSN resolved: {}", stats.issn_resolved);
    info!("  CiteScore resolved: {}", stats.cite_score_resolved);
    info!("  Unresolved: {}", stats.unresolved);
    if stats.annotation_segments_skipped > 0 {
        info!(
            "  Annotation segments skipped: {}",
            stats.annotation_segments_skipped
        );
    }
    info!("Output: {}", args.output);

    Ok(stats)
}

/// A missing API key aborts the run before any record is processed
fn resolve_api_key(flag: Option<String>) -> Result<String> {
    flag.or_else(|| env::var(API_KEY_ENV).ok())
        .filter(|key| !key.trim().is_empty())
        .with_context(|| {
            format!(
                "Scopus API key missing: pass --api-key or set {}",
                API_KEY_ENV
            )
        })
}
