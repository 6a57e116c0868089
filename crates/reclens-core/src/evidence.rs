//! Evidence text cleaning and bounding
//!
//! Extraction records short, human-readable excerpts so reports can quote the
//! page without leaking markup or breaking layouts. The helpers here strip
//! tags and decorative glyph noise, collapse whitespace, and truncate on char
//! boundaries; extraction code stays free of string-formatting concerns.

use once_cell::sync::Lazy;
use regex::Regex;

/// Evidence excerpts never exceed these bounds.
pub const MAX_HEADING_CHARS: usize = 160;
pub const MAX_SNIPPET_CHARS: usize = 200;

static RE_TAG_BLOCKS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?is)<script[^>]*?>[\s\S]*?</script>",
        r"(?is)<style[^>]*?>[\s\S]*?</style>",
        r"(?is)<noscript[^>]*?>[\s\S]*?</noscript>",
        r"(?is)<template[^>]*?>[\s\S]*?</template>",
        r"(?is)<!--.*?-->",
    ]
    .into_iter()
    .map(|pattern| Regex::new(pattern).expect("invalid block regex"))
    .collect()
});

static RE_TAG: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?s)<[^>]*>").expect("invalid tag regex"));

/// Remove script/style/comment blocks and all remaining tags, leaving text.
pub fn strip_markup(html: &str) -> String {
    let mut clean = html.to_string();
    for re in RE_TAG_BLOCKS.iter() {
        clean = re.replace_all(&clean, " ").into_owned();
    }
    RE_TAG.replace_all(&clean, " ").into_owned()
}

/// Collapse runs of whitespace and drop decorative glyphs (bullets, arrows,
/// box-drawing, emoji) so excerpts read as plain prose.
pub fn clean_text(text: &str) -> String {
    let filtered: String = text
        .chars()
        .map(|c| if is_decorative(c) { ' ' } else { c })
        .collect();

    filtered.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn is_decorative(c: char) -> bool {
    matches!(c, '\u{2022}' | '\u{25CF}' | '\u{25AA}' | '\u{2190}' | '\u{2192}' | '\u{00AB}' | '\u{00BB}' | '|')
        || ('\u{2500}'..='\u{257F}').contains(&c)
        || ('\u{2600}'..='\u{27BF}').contains(&c)
        || ('\u{1F000}'..='\u{1FAFF}').contains(&c)
}

/// Truncate to at most `max` chars, appending an ellipsis when shortened.
///
/// Operates on chars, not bytes, so multi-byte text never splits mid-char.
pub fn truncate_chars(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(1)).collect();
    format!("{}…", cut.trim_end())
}

/// Clean and bound a heading or title excerpt.
pub fn heading_excerpt(text: &str) -> String {
    truncate_chars(&clean_text(text), MAX_HEADING_CHARS)
}

/// Clean and bound a body snippet.
pub fn snippet_excerpt(text: &str) -> String {
    truncate_chars(&clean_text(text), MAX_SNIPPET_CHARS)
}

/// A cleaned snippet of text surrounding byte position `at`, for quoting a
/// pattern match in context. `at` may point anywhere inside `text`.
pub fn snippet_around(text: &str, at: usize, radius: usize) -> String {
    let start = text
        .char_indices()
        .map(|(i, _)| i)
        .take_while(|&i| i <= at)
        .find(|&i| at - i <= radius)
        .unwrap_or(0);
    let end = text
        .char_indices()
        .map(|(i, _)| i)
        .chain(std::iter::once(text.len()))
        .find(|&i| i >= at && i - at >= radius)
        .unwrap_or(text.len());

    snippet_excerpt(&text[start..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_markup_removes_scripts_and_tags() {
        let html = r#"<p>Keep this</p><script>alert('x')</script><div>and this</div>"#;
        let stripped = strip_markup(html);
        assert!(stripped.contains("Keep this"));
        assert!(stripped.contains("and this"));
        assert!(!stripped.contains("alert"));
        assert!(!stripped.contains('<'));
    }

    #[test]
    fn test_strip_markup_removes_comments() {
        let stripped = strip_markup("<p>Visible</p><!-- hidden note -->");
        assert!(stripped.contains("Visible"));
        assert!(!stripped.contains("hidden"));
    }

    #[test]
    fn test_clean_text_collapses_whitespace() {
        assert_eq!(clean_text("  a\n\n  b\t c  "), "a b c");
    }

    #[test]
    fn test_clean_text_drops_glyph_noise() {
        assert_eq!(clean_text("✓ Fast → reliable ★ | done 🚀"), "Fast reliable done");
    }

    #[test]
    fn test_truncate_chars_bounds() {
        assert_eq!(truncate_chars("short", 160), "short");
        let long = "x".repeat(300);
        let truncated = truncate_chars(&long, 200);
        assert_eq!(truncated.chars().count(), 200);
        assert!(truncated.ends_with('…'));
    }

    #[test]
    fn test_truncate_chars_multibyte_safe() {
        let text = "é".repeat(250);
        let truncated = truncate_chars(&text, 200);
        assert_eq!(truncated.chars().count(), 200);
    }

    #[test]
    fn test_snippet_around_window() {
        let text = format!("{}PRICE{}", "a".repeat(500), "b".repeat(500));
        let snippet = snippet_around(&text, 500, 40);
        assert!(snippet.contains("PRICE"));
        assert!(snippet.chars().count() <= MAX_SNIPPET_CHARS);
    }

    #[test]
    fn test_heading_excerpt_bound() {
        let heading = format!("<b>{}</b>", "h".repeat(400));
        let excerpt = heading_excerpt(&strip_markup(&heading));
        assert!(excerpt.chars().count() <= MAX_HEADING_CHARS);
    }
}
