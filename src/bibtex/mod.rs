use anyhow::{anyhow, Context, Result};
use biblatex::{Bibliography, Chunk, Entry};
use log::{debug, info};
use std::fs;

use crate::common::CitationRecord;

/// Read a BibTeX file into citation records, in file order
pub fn read_bibliography(input_path: &str) -> Result<Vec<CitationRecord>> {
    info!("Reading citation database: {}", input_path);

    let raw = fs::read_to_string(input_path)
        .with_context(|| format!("Failed to open: {}", input_path))?;

    let bibliography = Bibliography::parse(&raw)
        .map_err(|e| anyhow!("Failed to parse BibTeX file {}: {}", input_path, e))?;

    let records: Vec<CitationRecord> = bibliography
        .iter()
        .map(|entry| {
            let record = record_from_entry(entry);
            debug!(
                "Parsed entry '{}' (doi: {})",
                entry.key,
                record.doi.as_deref().unwrap_or("-")
            );
            record
        })
        .collect();

    info!("Parsed {} citation records", records.len());
    Ok(records)
}

fn record_from_entry(entry: &Entry) -> CitationRecord {
    CitationRecord {
        year: raw_field(entry, "year"),
        journal: raw_field(entry, "journal"),
        title: raw_field(entry, "title"),
        author: raw_field(entry, "author"),
        doi: raw_field(entry, "doi"),
        annote: raw_field(entry, "annote"),
    }
}

/// Reconstruct the raw text of a field, keeping the brace protection the file
/// had. The parser models protected spans as verbatim chunks; the normalizer
/// downstream decides what to do with the braces.
fn raw_field(entry: &Entry, name: &str) -> Option<String> {
    let chunks = entry.get(name)?;
    let mut out = String::new();
    for chunk in chunks {
        match &chunk.v {
            Chunk::Normal(text) => out.push_str(text),
            Chunk::Verbatim(text) => {
                out.push('{');
                out.push_str(text);
                out.push('}');
            }
            Chunk::Math(text) => {
                out.push('$');
                out.push_str(text);
                out.push('$');
            }
        }
    }
    Some(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    const SAMPLE_BIB: &str = r#"
@article{doe2021,
    year = {2021},
    journal = {{ACME} Journal},
    title = {A Study of Things},
    author = {Doe, Jane and Roe, Richard},
    doi = {10.1/x},
    annote = {Hypothesis: H1 holds; SampleSize: 200}
}

@article{minimal1999,
    title = {Untitled Findings}
}
"#;

    fn write_temp_bib(content: &str) -> NamedTempFile {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{}", content).unwrap();
        file.flush().unwrap();
        file
    }

    #[test]
    fn test_read_bibliography_preserves_raw_braces() {
        let file = write_temp_bib(SAMPLE_BIB);
        let records = read_bibliography(file.path().to_str().unwrap()).unwrap();

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].journal.as_deref(), Some("{ACME} Journal"));
        assert_eq!(records[0].year.as_deref(), Some("2021"));
        assert_eq!(records[0].doi.as_deref(), Some("10.1/x"));
        assert_eq!(
            records[0].annote.as_deref(),
            Some("Hypothesis: H1 holds; SampleSize: 200")
        );
    }

    #[test]
    fn test_read_bibliography_missing_fields_are_none() {
        let file = write_temp_bib(SAMPLE_BIB);
        let records = read_bibliography(file.path().to_str().unwrap()).unwrap();

        let minimal = &records[1];
        assert_eq!(minimal.title.as_deref(), Some("Untitled Findings"));
        assert!(minimal.journal.is_none());
        assert!(minimal.doi.is_none());
        assert!(minimal.annote.is_none());
    }

    #[test]
    fn test_read_bibliography_missing_file_is_an_error() {
        let result = read_bibliography("/nonexistent/refs.bib");
        assert!(result.is_err());
    }
}
