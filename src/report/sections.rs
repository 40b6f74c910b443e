//! Splitting a raw model reply into ordered report sections.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use super::header::clean_header;

/// A standalone line of three or more dashes.
static DELIMITER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?m)^[ \t]*-{3,}[ \t]*\r?$").unwrap());

/// The opening section of a well-formed report: `1. ` after optional decoration.
static FIRST_SECTION_MARKER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^[*#_`\s]*1\.\s").unwrap());

/// One labeled block of the report.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportSection {
    pub header: String,
    pub body: String,
}

/// Split `raw` into report sections, preserving the model's order.
///
/// Fragments that trim to nothing are skipped. The first fragment is kept
/// only when it opens with the first-section marker, which drops any
/// preamble the model writes before the report proper. A section whose body
/// is empty is still returned.
pub fn sectionize(raw: &str) -> Vec<ReportSection> {
    DELIMITER
        .split(raw)
        .enumerate()
        .filter_map(|(index, fragment)| {
            let fragment = fragment.trim();
            if fragment.is_empty() {
                return None;
            }
            if index == 0 && !FIRST_SECTION_MARKER.is_match(fragment) {
                tracing::debug!(len = fragment.len(), "Dropping report preamble");
                return None;
            }
            Some(split_fragment(fragment))
        })
        .collect()
}

fn split_fragment(fragment: &str) -> ReportSection {
    let (raw_header, rest) = fragment.split_once('\n').unwrap_or((fragment, ""));
    ReportSection {
        header: clean_header(raw_header),
        body: rest.trim().to_string(),
    }
}
