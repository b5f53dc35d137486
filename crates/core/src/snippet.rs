//! Context windows around the first case-insensitive match of a query.
//!
//! All offsets are counted in `char`s, so a window never splits a code point.

use crate::SnippetOptions;

/// Snippet with the default 75-character context and `...` markers.
pub fn snippet(content: &str, query: &str) -> String {
    snippet_with(content, query, &SnippetOptions::default())
}

pub fn snippet_with(content: &str, query: &str, options: &SnippetOptions) -> String {
    let chars: Vec<char> = content.chars().collect();

    let Some(index) = find_case_insensitive(&chars, query) else {
        let head: String = chars.iter().take(options.fallback_chars).collect();
        let truncated = chars.len() > options.fallback_chars;
        return if options.always_mark_fallback || truncated {
            head + options.marker
        } else {
            head
        };
    };

    let query_len = query.chars().count();
    let start = index.saturating_sub(options.context_chars);
    let end = chars
        .len()
        .min(index + query_len + options.context_chars);

    let mut snippet = String::new();
    if start > 0 {
        snippet.push_str(options.marker);
    }
    snippet.extend(&chars[start..end]);
    if end < chars.len() {
        snippet.push_str(options.marker);
    }
    snippet
}

/// Per-character lower-casing shared by matching and snippet placement.
fn fold_case(text: &str) -> String {
    text.chars().flat_map(char::to_lowercase).collect()
}

/// Case-insensitive substring test, consistent with where [`snippet`] places its window.
pub fn contains_ignore_case(content: &str, query: &str) -> bool {
    fold_case(content).contains(&fold_case(query))
}

/// Char index in `haystack` of the first match of `query`, ignoring case.
///
/// Lower-casing can change a character's length (`İ` becomes two chars), so every
/// lowered char remembers which original char it came from.
fn find_case_insensitive(haystack: &[char], query: &str) -> Option<usize> {
    let needle = fold_case(query);

    let mut lowered = String::with_capacity(haystack.len());
    let mut origin = Vec::with_capacity(haystack.len());
    for (position, ch) in haystack.iter().enumerate() {
        for lower in ch.to_lowercase() {
            lowered.push(lower);
            origin.push(position);
        }
    }

    let byte_offset = lowered.find(&needle)?;
    let lowered_index = lowered[..byte_offset].chars().count();
    // An empty needle matches at the end of empty content.
    Some(origin.get(lowered_index).copied().unwrap_or(haystack.len()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_in_the_middle_is_marked_on_both_sides() {
        let content = format!("{}TARGET{}", "x".repeat(150), "y".repeat(150));

        let result = snippet(&content, "TARGET");

        let expected = format!("...{}TARGET{}...", "x".repeat(75), "y".repeat(75));
        assert_eq!(result, expected);
    }

    #[test]
    fn match_near_the_start_has_no_leading_marker() {
        let content = format!("Hello World{}", "z".repeat(200));

        let result = snippet(&content, "hello");

        assert!(result.starts_with("Hello World"));
        assert_eq!(result.chars().count(), 5 + 75 + 3);
        assert!(result.ends_with("..."));
    }

    #[test]
    fn short_content_is_returned_whole() {
        assert_eq!(snippet("Hello World", "WORLD"), "Hello World");
    }

    #[test]
    fn no_match_falls_back_to_the_head_with_a_marker() {
        let content = "a".repeat(200);

        let result = snippet(&content, "missing");

        assert_eq!(result, format!("{}...", "a".repeat(150)));
    }

    #[test]
    fn fallback_marker_is_unconditional_by_default() {
        assert_eq!(snippet("short text", "missing"), "short text...");
    }

    #[test]
    fn fallback_marker_can_require_truncation() {
        let options = SnippetOptions {
            always_mark_fallback: false,
            ..SnippetOptions::default()
        };

        assert_eq!(snippet_with("short text", "missing", &options), "short text");
        assert_eq!(
            snippet_with(&"b".repeat(160), "missing", &options),
            format!("{}...", "b".repeat(150))
        );
    }

    #[test]
    fn windows_are_counted_in_characters() {
        let content = format!("{}ünïcode{}", "é".repeat(100), "ß".repeat(100));

        let result = snippet(&content, "ÜNÏCODE");

        let expected = format!("...{}ünïcode{}...", "é".repeat(75), "ß".repeat(75));
        assert_eq!(result, expected);
    }

    #[test]
    fn empty_query_matches_at_the_start() {
        assert_eq!(snippet("abc", ""), "abc");
        assert_eq!(snippet("", ""), "");

        let content = "q".repeat(100);
        assert_eq!(snippet(&content, ""), format!("{}...", "q".repeat(75)));
    }

    #[test]
    fn containment_ignores_case() {
        assert!(contains_ignore_case("Hello World", "hello"));
        assert!(contains_ignore_case("Hello World", "WORLD"));
        assert!(!contains_ignore_case("Hello World", "worlds"));
    }

    #[test]
    fn expanding_lowercase_keeps_original_positions() {
        let content = "İstanbul is a city";
        assert_eq!(find_case_insensitive(&content.chars().collect::<Vec<_>>(), "city"), Some(14));
    }
}
