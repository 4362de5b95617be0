use lazy_static::lazy_static;
use regex::Regex;
use std::collections::HashMap;

lazy_static! {
    static ref SEGMENT_BOUNDARY: Regex = Regex::new(r";\s*").unwrap();
    static ref KEY_VALUE_PAIR: Regex = Regex::new(r"^(\w+)\s*:\s*(.*)").unwrap();
}

/// Structured fields parsed from the free-text annotation blob of a record.
///
/// Keys are lower-cased, so lookups are case-insensitive; a key repeated in
/// one blob keeps its last value. Segments that did not match the
/// "key: value" shape are kept in `skipped` for diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnnotationFields {
    fields: HashMap<String, String>,
    pub skipped: Vec<String>,
}

impl AnnotationFields {
    /// Value for a lower-cased key, empty string if absent
    pub fn get(&self, key: &str) -> &str {
        self.fields.get(key).map(String::as_str).unwrap_or("")
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Parse a semicolon-delimited annotation blob into structured fields.
///
/// Annotations are hand-entered notes, so this is a best-effort parse: a
/// segment without a leading `key:` contributes nothing and is only recorded
/// in the skipped list. Absent or empty input yields an empty mapping.
pub fn extract_annotation_fields(annote: Option<&str>) -> AnnotationFields {
    let mut notes = AnnotationFields::default();

    let blob = match annote {
        Some(blob) if !blob.trim().is_empty() => blob,
        _ => return notes,
    };

    for segment in SEGMENT_BOUNDARY.split(blob) {
        if segment.trim().is_empty() {
            continue;
        }
        match KEY_VALUE_PAIR.captures(segment) {
            Some(cap) => {
                let key = cap[1].trim().to_lowercase();
                let value = cap[2].trim().to_string();
                notes.fields.insert(key, value);
            }
            None => notes.skipped.push(segment.trim().to_string()),
        }
    }

    notes
}
