//! Line-bounded text truncation.
//!
//! Extracted page text can run to hundreds of lines; callers bound it here
//! before handing it to the model call, which has a payload limit.

/// Marker appended when content is cut off, so the downstream prompt knows
/// the text is partial.
pub const DEFAULT_TRUNCATION_MARKER: &str = "... (content truncated)";

/// Bounds `text` to at most `max_lines` lines, appending the default marker
/// when anything was dropped.
pub fn truncate_text_by_lines(text: &str, max_lines: usize) -> String {
    truncate_text_by_lines_with(text, max_lines, DEFAULT_TRUNCATION_MARKER)
}

/// As [`truncate_text_by_lines`] with a caller-supplied marker.
///
/// Text within the bound is returned byte-for-byte unchanged, trailing blank
/// lines included. Empty input yields an empty string.
pub fn truncate_text_by_lines_with(text: &str, max_lines: usize, marker: &str) -> String {
    if text.is_empty() {
        return String::new();
    }

    let lines: Vec<&str> = text.split('\n').collect();
    if lines.len() <= max_lines {
        return text.to_string();
    }

    let kept = lines[..max_lines].join("\n");
    format!("{kept}\n\n{marker}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_within_bound_is_identity() {
        assert_eq!(truncate_text_by_lines("a\nb\nc", 5), "a\nb\nc");
        assert_eq!(truncate_text_by_lines("a\nb\nc", 3), "a\nb\nc");
        // Trailing blank lines count as lines but are preserved verbatim.
        assert_eq!(truncate_text_by_lines("a\nb\n\n", 4), "a\nb\n\n");
    }

    #[test]
    fn test_over_bound_appends_marker() {
        assert_eq!(
            truncate_text_by_lines("a\nb\nc\nd", 2),
            format!("a\nb\n\n{DEFAULT_TRUNCATION_MARKER}")
        );
    }

    #[test]
    fn test_zero_lines_is_marker_only() {
        assert_eq!(
            truncate_text_by_lines("a\nb", 0),
            format!("\n\n{DEFAULT_TRUNCATION_MARKER}")
        );
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(truncate_text_by_lines("", 3), "");
    }

    #[test]
    fn test_custom_marker() {
        assert_eq!(
            truncate_text_by_lines_with("a\nb\nc", 1, "[cut]"),
            "a\n\n[cut]"
        );
    }
}
