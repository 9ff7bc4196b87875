//! Parsing helpers for scraped metadata
//!
//! Scraped fields arrive as loosely formatted strings; parse failures are
//! always recovered locally, never surfaced to the caller.

/// Parse a scraped ratings count like "41,236" into a number.
///
/// Thousands separators (commas and spaces) are stripped first. Returns
/// `None` for anything that still fails to parse, e.g. "N/A" or an empty
/// string.
pub fn parse_ratings_count(raw: &str) -> Option<u64> {
    let cleaned: String = raw
        .chars()
        .filter(|c| !matches!(c, ',' | ' ' | '\u{a0}'))
        .collect();

    if cleaned.is_empty() {
        return None;
    }

    cleaned.parse().ok()
}
