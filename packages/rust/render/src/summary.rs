//! Line segmentation shared by both dialects.
//!
//! A summary is split into trimmed, non-empty lines. Lines starting with `#`
//! are headers (markers stripped), everything else is body text. The inline
//! transform is applied here, so assemblers only decide on spacing.

use crate::inline;

/// Classification of a surviving summary line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Header,
    Body,
}

/// One classified line with its inline markup already resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryLine {
    pub kind: LineKind,
    pub html: String,
}

impl SummaryLine {
    pub fn is_header(&self) -> bool {
        self.kind == LineKind::Header
    }
}

/// Split, trim, drop blank lines, classify, and transform inline markup.
pub fn segment(summary: &str, link_style: Option<&str>) -> Vec<SummaryLine> {
    summary
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| match line.strip_prefix('#') {
            Some(_) => SummaryLine {
                kind: LineKind::Header,
                html: inline::to_html(strip_header_markers(line), link_style),
            },
            None => SummaryLine {
                kind: LineKind::Body,
                html: inline::to_html(line, link_style),
            },
        })
        .collect()
}

/// Title used when a record carries none: the first non-empty line with its
/// header markers and every `**` removed.
pub fn derive_title(summary: &str) -> String {
    summary
        .lines()
        .map(str::trim)
        .find(|line| !line.is_empty())
        .map(|line| strip_header_markers(line).replace("**", ""))
        .unwrap_or_default()
}

fn strip_header_markers(line: &str) -> &str {
    line.trim_start_matches('#').trim_start()
}
