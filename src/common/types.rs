use serde::Serialize;

use crate::extract::{strip_braces, AnnotationFields};

/// Column header of the review table. "Theorectical" is intentional:
/// downstream spreadsheets key on this exact header.
pub const REPORT_COLUMNS: [&str; 14] = [
    "Year",
    "Journal",
    "VHB / SJR / CiteScore Rank",
    "Title",
    "Author(s)",
    "Research Problem/Gap",
    "Research Question(s)",
    "Hypothesis(es)",
    "Theorectical Model / Framework",
    "Method(s)",
    "Sample Size",
    "Main Results",
    "Conclusions",
    "DOI / Link to article",
];

/// A single citation entry as read from the BibTeX database. Fields keep the
/// raw text from the file, brace protection included; `normalized` produces
/// the cleaned copy the rest of the pipeline works on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CitationRecord {
    pub year: Option<String>,
    pub journal: Option<String>,
    pub title: Option<String>,
    pub author: Option<String>,
    pub doi: Option<String>,
    pub annote: Option<String>,
}

impl CitationRecord {
    /// Copy of the record with one level of brace protection stripped from the
    /// bibliographic fields. The annotation blob is free text, not BibTeX
    /// markup, and stays as entered.
    pub fn normalized(&self) -> Self {
        let clean = |field: &Option<String>| field.as_deref().map(strip_braces);
        Self {
            year: clean(&self.year),
            journal: clean(&self.journal),
            title: clean(&self.title),
            author: clean(&self.author),
            doi: clean(&self.doi),
            annote: self.annote.clone(),
        }
    }
}

/// Journal identifier and quality score resolved from Scopus. An empty string
/// means the field could not be resolved; there is no numeric zero sentinel.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct JournalMetric {
    pub issn: String,
    pub cite_score: String,
}

impl JournalMetric {
    pub fn has_issn(&self) -> bool {
        !self.issn.is_empty()
    }

    pub fn has_cite_score(&self) -> bool {
        !self.cite_score.is_empty()
    }

    pub fn is_unresolved(&self) -> bool {
        self.issn.is_empty() && self.cite_score.is_empty()
    }
}

/// One row of the review table, field order matching `REPORT_COLUMNS`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct OutputRow {
    pub year: String,
    pub journal: String,
    pub rank: String,
    pub title: String,
    pub authors: String,
    pub research_problem: String,
    pub research_question: String,
    pub hypothesis: String,
    pub theoretical_model: String,
    pub method: String,
    pub sample_size: String,
    pub main_results: String,
    pub conclusions: String,
    pub doi: String,
}

impl OutputRow {
    /// Assemble a row from a normalized record, its resolved metric, and the
    /// extracted annotation fields. Annotation keys absent from the mapping
    /// leave their column empty; assembly cannot fail.
    pub fn assemble(
        record: &CitationRecord,
        metric: &JournalMetric,
        notes: &AnnotationFields,
    ) -> Self {
        let text = |field: &Option<String>| field.clone().unwrap_or_default();
        Self {
            year: text(&record.year),
            journal: text(&record.journal),
            rank: metric.cite_score.clone(),
            title: text(&record.title),
            authors: text(&record.author),
            research_problem: notes.get("researchproblem").to_string(),
            research_question: notes.get("researchquestion").to_string(),
            hypothesis: notes.get("hypothesis").to_string(),
            theoretical_model: notes.get("theoreticalmodel").to_string(),
            method: notes.get("method").to_string(),
            sample_size: notes.get("samplesize").to_string(),
            main_results: notes.get("mainresults").to_string(),
            conclusions: notes.get("conclusions").to_string(),
            doi: text(&record.doi),
        }
    }

    /// Field values in column order
    pub fn to_record(&self) -> [&str; 14] {
        [
            &self.year,
            &self.journal,
            &self.rank,
            &self.title,
            &self.authors,
            &self.research_problem,
            &self.research_question,
            &self.hypothesis,
            &self.theoretical_model,
            &self.method,
            &self.sample_size,
            &self.main_results,
            &self.conclusions,
            &self.doi,
        ]
    }
}

/// Statistics from the offline convert command
#[derive(Debug, Clone, Default)]
pub struct ConvertStats {
    pub total_records: usize,
    pub rows_written: usize,
    pub annotation_segments_skipped: usize,
}

/// Statistics from the enrich command
#[derive(Debug, Clone, Default)]
pub struct EnrichStats {
    pub total_records: usize,
    pub issn_resolved: usize,
    pub cite_score_resolved: usize,
    pub unresolved: usize,
    pub annotation_segments_skipped: usize,
    pub rows_written: usize,
}
