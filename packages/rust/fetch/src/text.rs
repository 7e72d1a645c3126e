//! Page flattening and fallback title extraction.

use std::sync::LazyLock;

use regex::Regex;
use scraper::{Html, Selector};

static SCRIPT_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<script[^>]*>.*?</script>").expect("valid regex"));

static STYLE_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?is)<style[^>]*>.*?</style>").expect("valid regex"));

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"<[^>]+>").expect("valid regex"));

static WHITESPACE_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").expect("valid regex"));

/// Decoded in this order, so `&amp;lt;` ends up as `<`.
const ENTITIES: [(&str, &str); 6] = [
    ("&nbsp;", " "),
    ("&amp;", "&"),
    ("&lt;", "<"),
    ("&gt;", ">"),
    ("&quot;", "\""),
    ("&#39;", "'"),
];

/// Flatten an HTML page to a single line of plain text.
///
/// Scripts and styles are dropped with their content, every other tag becomes
/// a space, a handful of common entities are decoded and whitespace runs are
/// collapsed.
pub fn page_to_text(html: &str) -> String {
    let text = SCRIPT_RE.replace_all(html, "");
    let text = STYLE_RE.replace_all(&text, "");
    let mut text = TAG_RE.replace_all(&text, " ").into_owned();

    for (entity, decoded) in ENTITIES {
        text = text.replace(entity, decoded);
    }

    collapse(&text)
}

fn collapse(s: &str) -> String {
    WHITESPACE_RE.replace_all(s, " ").trim().to_string()
}

/// Titles the page itself advertises, used when the model gives none.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FallbackTitles {
    /// `<title>` text.
    pub page_title: Option<String>,
    /// `og:title` meta content.
    pub og_title: Option<String>,
    /// Text of the first `<h1>`.
    pub h1: Option<String>,
}

impl FallbackTitles {
    pub fn from_html(html: &str) -> Self {
        let doc = Html::parse_document(html);

        let og_title = Selector::parse(r#"meta[property="og:title"]"#)
            .ok()
            .and_then(|sel| {
                doc.select(&sel)
                    .find_map(|el| el.value().attr("content").map(collapse))
            });

        Self {
            page_title: first_text(&doc, "title"),
            og_title: og_title.filter(|t| !t.is_empty()),
            h1: first_text(&doc, "h1"),
        }
    }

    /// First non-empty title: `<title>`, then `og:title`, then `<h1>`.
    pub fn first(&self) -> Option<&str> {
        [&self.page_title, &self.og_title, &self.h1]
            .into_iter()
            .flatten()
            .map(String::as_str)
            .next()
    }
}

fn first_text(doc: &Html, selector: &str) -> Option<String> {
    let sel = Selector::parse(selector).ok()?;
    let text = collapse(&doc.select(&sel).next()?.text().collect::<Vec<_>>().join(" "));
    (!text.is_empty()).then_some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_scripts_styles_and_tags() {
        let html = r#"<html><head><STYLE>body { color: red }</STYLE>
            <script type="text/javascript">var x = "<p>";</script></head>
            <body><p>Hello</p><p>world</p></body></html>"#;
        assert_eq!(page_to_text(html), "Hello world");
    }

    #[test]
    fn decodes_entities_in_order() {
        assert_eq!(
            page_to_text("Tom&nbsp;&amp;&nbsp;Jerry &lt;3 &quot;hi&quot; it&#39;s &amp;lt;"),
            r#"Tom & Jerry <3 "hi" it's <"#
        );
    }

    #[test]
    fn collapses_whitespace() {
        assert_eq!(page_to_text("  a\n\n\t b  "), "a b");
        assert_eq!(page_to_text(""), "");
    }

    #[test]
    fn titles_prefer_title_then_og_then_h1() {
        let html = r#"<html><head><title>  Page
            title </title><meta property="og:title" content="OG title"></head>
            <body><h1>Main <em>heading</em></h1></body></html>"#;
        let titles = FallbackTitles::from_html(html);
        assert_eq!(titles.og_title.as_deref(), Some("OG title"));
        assert_eq!(titles.page_title.as_deref(), Some("Page title"));
        assert_eq!(titles.h1.as_deref(), Some("Main heading"));
        assert_eq!(titles.first(), Some("Page title"));

        let titles = FallbackTitles::from_html(
            r#"<head><meta property="og:title" content="OG only"></head><body><h1>Heading</h1></body>"#,
        );
        assert_eq!(titles.first(), Some("OG only"));

        let titles = FallbackTitles::from_html("<body><h1>Only heading</h1></body>");
        assert_eq!(titles.first(), Some("Only heading"));

        assert_eq!(FallbackTitles::from_html("<p>nothing</p>").first(), None);
    }
}
