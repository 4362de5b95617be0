use log::debug;

use super::client::MetricSource;
use crate::common::{CitationRecord, JournalMetric};

/// Resolve (ISSN, CiteScore) for one record, tolerating partial availability.
///
/// Three stages, at most one external call each:
/// 1. DOI lookup for the ISSN, when the record has a DOI.
/// 2. CiteScore by ISSN, when stage 1 produced one.
/// 3. Title fallback, when either field is still empty: a non-empty candidate
///    list overwrites both fields with the first entry, including an ISSN the
///    DOI path already resolved.
///
/// No retries; whatever is still empty afterwards stays empty.
pub async fn resolve_journal_metric<S: MetricSource + ?Sized>(
    source: &S,
    record: &CitationRecord,
) -> JournalMetric {
    let mut metric = JournalMetric::default();

    if let Some(doi) = text_field(&record.doi) {
        if let Some(issn) = source.issn_by_doi(doi).await {
            metric.issn = issn;
        } else {
            debug!("No ISSN for DOI {}", doi);
        }
    }

    if metric.has_issn() {
        if let Some(entry) = source.serial_by_issn(&metric.issn).await {
            metric.cite_score = entry.cite_score;
        }
    }

    if !metric.has_issn() || !metric.has_cite_score() {
        if let Some(journal) = text_field(&record.journal) {
            if let Some(entry) = source.serial_by_title(journal).await {
                debug!("Title fallback matched for '{}'", journal);
                metric.issn = entry.issn;
                metric.cite_score = entry.cite_score;
            }
        }
    }

    metric
}

fn text_field(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|text| !text.is_empty())
}
