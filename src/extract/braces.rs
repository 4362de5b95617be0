use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    // Shortest bracketed span; one level of nesting per pass, so "{{X}}"
    // becomes "{X}", not "X".
    static ref BRACED_SPAN: Regex = Regex::new(r"\{(.*?)\}").unwrap();
}

/// Strip the outermost pair of braces from every non-overlapping bracketed
/// span. BibTeX uses braces to protect capitalization; the report should show
/// the bare text. Pure function, text without braces passes through untouched.
pub fn strip_braces(text: &str) -> String {
    BRACED_SPAN.replace_all(text, "$1").into_owned()
}
