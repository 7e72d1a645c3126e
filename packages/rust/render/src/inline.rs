//! Inline markup transform.
//!
//! Five global substitutions applied in a fixed order. The triple-asterisk
//! pass runs first so a `***x***` run is never read as bold around `*x*`.
//! Every pattern is non-greedy, so `**a** and **b**` yields two spans.

use std::sync::LazyLock;

use regex::Regex;

static BOLD_ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*\*(.+?)\*\*\*").expect("valid regex"));

static BOLD_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*\*(.+?)\*\*").expect("valid regex"));

static STAR_ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\*(.+?)\*").expect("valid regex"));

static UNDERSCORE_ITALIC_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"_(.+?)_").expect("valid regex"));

static LINK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));

/// Convert one line of inline markup to HTML.
///
/// `link_style`, when set, is added as an inline `style` attribute on links.
pub(crate) fn to_html(line: &str, link_style: Option<&str>) -> String {
    let html = BOLD_ITALIC_RE.replace_all(line, "<strong><em>${1}</em></strong>");
    let html = BOLD_RE.replace_all(&html, "<strong>${1}</strong>");
    let html = STAR_ITALIC_RE.replace_all(&html, "<em>${1}</em>");
    let html = UNDERSCORE_ITALIC_RE.replace_all(&html, "<em>${1}</em>");

    let style = link_style
        .map(|s| format!(r#" style="{s}""#))
        .unwrap_or_default();
    let link = format!(
        r#"<a href="${{2}}" target="_blank" rel="noopener noreferrer"{style}>${{1}}</a>"#
    );

    LINK_RE.replace_all(&html, link.as_str()).into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold_and_italic_stay_separate() {
        assert_eq!(
            to_html("**bold** and *italic*", None),
            "<strong>bold</strong> and <em>italic</em>"
        );
    }

    #[test]
    fn triple_asterisks_are_one_combined_span() {
        assert_eq!(to_html("***x***", None), "<strong><em>x</em></strong>");
    }

    #[test]
    fn shortest_match_gives_two_bold_spans() {
        assert_eq!(
            to_html("**a** and **b**", None),
            "<strong>a</strong> and <strong>b</strong>"
        );
    }

    #[test]
    fn underscore_is_italic() {
        assert_eq!(to_html("un _vrai_ test", None), "un <em>vrai</em> test");
    }

    #[test]
    fn links_open_in_new_context() {
        assert_eq!(
            to_html("voir [le site](https://example.com)", None),
            r#"voir <a href="https://example.com" target="_blank" rel="noopener noreferrer">le site</a>"#
        );
    }

    #[test]
    fn links_carry_dialect_style() {
        let html = to_html("[ici](https://example.com)", Some("color: #232323;"));
        assert!(html.contains(r#"rel="noopener noreferrer" style="color: #232323;">ici</a>"#));
    }

    #[test]
    fn unmatched_markers_render_literally() {
        assert_eq!(to_html("5 * 3 = 15", None), "5 * 3 = 15");
        assert_eq!(to_html("[broken](link", None), "[broken](link");
        assert_eq!(to_html("", None), "");
    }
}
