//! Presentation cleanup for section header lines.
//!
//! The model decorates its headers with emphasis/heading markup and a
//! leading ordinal (`*1. Preliminary Overview:*`). Two independent passes
//! remove that noise; [`clean_header`] composes them.

use std::sync::LazyLock;

use regex::Regex;

/// Markup glyphs with no meaning in a panel title.
static DECORATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[*#_`]+").unwrap());

/// One or more leading `<digits><sep>` markers, `sep` one of `. : ) -`.
///
/// Repeated markers are consumed together so the pass is idempotent.
static ORDINAL_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(?:\d+[.:)\-]\s*)+").unwrap());

/// Remove every decoration glyph, wherever it occurs.
pub fn strip_decoration(line: &str) -> String {
    DECORATION.replace_all(line, "").into_owned()
}

/// Remove a leading ordinal marker such as `1. `, `2:`, `3) ` or `4-`.
pub fn strip_ordinal_prefix(line: &str) -> String {
    ORDINAL_PREFIX.replace(line, "").into_owned()
}

/// Full header cleanup: decoration, then ordinal, then whitespace.
pub fn clean_header(raw: &str) -> String {
    strip_ordinal_prefix(&strip_decoration(raw)).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_emphasis_and_heading_glyphs() {
        assert_eq!(strip_decoration("*1. Overview*"), "1. Overview");
        assert_eq!(strip_decoration("## **Findings**"), " Findings");
        assert_eq!(strip_decoration("__Risk__ `Factors`"), "Risk Factors");
    }

    #[test]
    fn decoration_pass_leaves_plain_text_alone() {
        assert_eq!(strip_decoration("Plain header"), "Plain header");
    }

    #[test]
    fn strips_each_ordinal_separator() {
        assert_eq!(strip_ordinal_prefix("1. Overview"), "Overview");
        assert_eq!(strip_ordinal_prefix("2: Observations"), "Observations");
        assert_eq!(strip_ordinal_prefix("3) Diagnosis"), "Diagnosis");
        assert_eq!(strip_ordinal_prefix("4-Next Steps"), "Next Steps");
        assert_eq!(strip_ordinal_prefix("  12.   Notes"), "Notes");
    }

    #[test]
    fn ordinal_requires_separator() {
        assert_eq!(strip_ordinal_prefix("3D Reconstruction"), "3D Reconstruction");
        assert_eq!(strip_ordinal_prefix("10 findings"), "10 findings");
    }

    #[test]
    fn ordinal_only_stripped_at_start() {
        assert_eq!(strip_ordinal_prefix("Grade 2. lesion"), "Grade 2. lesion");
    }

    #[test]
    fn clean_header_composes_both_passes() {
        assert_eq!(clean_header("*1. Preliminary Overview:*"), "Preliminary Overview:");
        assert_eq!(clean_header("### 3) **Differential Diagnosis**  "), "Differential Diagnosis");
        assert_eq!(clean_header("**"), "");
    }

    #[test]
    fn stacked_ordinals_are_all_stripped() {
        assert_eq!(clean_header("1. 2. Nested ordinals"), "Nested ordinals");
        assert_eq!(clean_header("*1.*2.*3. Stacked"), "Stacked");
    }
}
