use futures::stream::{self, StreamExt};
use indicatif::ProgressBar;
use log::warn;
use std::sync::Arc;
use tokio::sync::Semaphore;

use super::client::MetricSource;
use super::resolver::resolve_journal_metric;
use crate::common::{CitationRecord, EnrichStats, JournalMetric, OutputRow};
use crate::extract::extract_annotation_fields;

/// Multiplier for buffer_unordered capacity relative to concurrency
const BUFFER_CAPACITY_MULTIPLIER: usize = 2;

/// Results from enriching a batch of records
pub struct EnrichmentResults {
    pub rows: Vec<OutputRow>,
    pub stats: EnrichStats,
}

/// Enrich records concurrently under a bounded concurrency cap.
///
/// Each record runs the full per-record pipeline (normalize, resolve metric,
/// extract annotations, assemble) independently; results are tagged with the
/// input index and re-sorted, so output rows always match input order. A soft
/// lookup failure on one record never affects the others.
pub async fn enrich_records<S>(
    records: Vec<CitationRecord>,
    source: Arc<S>,
    concurrency: usize,
    progress: Option<ProgressBar>,
) -> EnrichmentResults
where
    S: MetricSource + 'static,
{
    let concurrency = concurrency.max(1);
    let total_records = records.len();
    let semaphore = Arc::new(Semaphore::new(concurrency));

    let mut tagged: Vec<(usize, OutputRow, JournalMetric, usize)> =
        stream::iter(records.into_iter().enumerate())
            .map(|(index, record)| {
                let source = source.clone();
                let semaphore = semaphore.clone();
                let progress = progress.clone();

                async move {
                    let _permit = semaphore
                        .acquire()
                        .await
                        .expect("semaphore should never be closed");

                    let record = record.normalized();
                    let metric = resolve_journal_metric(source.as_ref(), &record).await;

                    let notes = extract_annotation_fields(record.annote.as_deref());
                    if !notes.skipped.is_empty() {
                        warn!(
                            "Record {}: {} annotation segment(s) did not match 'key: value': {:?}",
                            index + 1,
                            notes.skipped.len(),
                            notes.skipped
                        );
                    }
                    let skipped = notes.skipped.len();

                    let row = OutputRow::assemble(&record, &metric, &notes);
                    if let Some(pb) = &progress {
                        pb.inc(1);
                    }
                    (index, row, metric, skipped)
                }
            })
            .buffer_unordered(concurrency * BUFFER_CAPACITY_MULTIPLIER)
            .collect()
            .await;

    // Completion order is arbitrary; the report must follow input order
    tagged.sort_by_key(|(index, _, _, _)| *index);

    let mut stats = EnrichStats {
        total_records,
        ..Default::default()
    };
    let mut rows = Vec::with_capacity(tagged.len());

    for (_, row, metric, skipped) in tagged {
        if metric.has_issn() {
            stats.issn_resolved += 1;
        }
        if metric.has_cite_score() {
            stats.cite_score_resolved += 1;
        }
        if metric.is_unresolved() {
            stats.unresolved += 1;
        }
        stats.annotation_segments_skipped += skipped;
        rows.push(row);
    }

    EnrichmentResults { rows, stats }
}
