//! Newsletter markup rendering.
//!
//! Turns generated summaries into markup and assembles whole issues in two
//! dialects:
//! - [`Dialect::Email`]: a self-contained HTML email with inline CSS
//! - [`Dialect::Template`]: the email builder's nested template document
//!
//! Both dialects share [`summary::segment`] (line classification plus inline
//! markup) and differ only in how they lay the lines out. Everything here is
//! pure and total: malformed input renders literally, it never fails.
//!
//! Model output is embedded without HTML escaping; the model API is trusted.

mod email;
mod inline;
pub mod summary;
mod template;

pub use email::render_email;
pub use summary::{LineKind, SummaryLine, derive_title};
pub use template::{escape_single_quotes, render_template};

use growthnews_shared::{ContentRecord, NewsletterBundle};

/// Shown when an article has no author.
pub const UNKNOWN_AUTHOR: &str = "Auteur inconnu";
/// Shown when the tool has no name.
pub const DEFAULT_TOOL_NAME: &str = "Outil";
/// Shown when the companion article has no title.
pub const DEFAULT_COMPANION_TITLE: &str = "Article deux.io";
/// Shown when the social post has no excerpt.
pub const DEFAULT_SOCIAL_EXCERPT: &str = "Post LinkedIn";

const BRAND_NAME: &str = "LaGrowthNews";
const LOGO_URL: &str =
    "https://img.mailinblue.com/4032979/images/content_library/original/67482c9fa108a4b37484c08b.png";
const TOOL_IMAGE_URL: &str =
    "https://img.mailinblue.com/4032979/images/content_library/original/68da9b135ccbe12268dff65d.png";
const COMPANION_SITE_URL: &str = "https://deux.io/?utm_source=newsletter&utm_medium=email";
const BOOKING_URL: &str = "https://deuxio.typeform.com/to/MMUCIr?typeform-source=newsletter";

/// Target markup for a rendered summary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Dialect {
    /// Standalone HTML email; spacing via inline margins.
    Email,
    /// Email-builder template document; spacing via explicit break paragraphs.
    Template,
}

impl Dialect {
    fn link_style(&self) -> Option<&'static str> {
        match self {
            Self::Email => Some(email::LINK_STYLE),
            Self::Template => None,
        }
    }
}

/// Render a summary into a markup fragment for the given dialect.
pub fn render(summary: &str, dialect: Dialect) -> String {
    let lines = summary::segment(summary, dialect.link_style());
    match dialect {
        Dialect::Email => email::assemble_summary(&lines),
        Dialect::Template => template::assemble_summary(&lines),
    }
}

// ---------------------------------------------------------------------------
// Display fallbacks shared by both assemblers
// ---------------------------------------------------------------------------

fn display_title(record: &ContentRecord) -> String {
    record
        .title()
        .map(str::to_string)
        .unwrap_or_else(|| derive_title(&record.summary))
}

fn display_author(record: &ContentRecord) -> &str {
    record.author().unwrap_or(UNKNOWN_AUTHOR)
}

fn display_tool_name(record: &ContentRecord) -> &str {
    record.tool_name().unwrap_or(DEFAULT_TOOL_NAME)
}

fn display_tag(record: &ContentRecord) -> String {
    record.tag().unwrap_or_default().to_uppercase()
}

/// Link to a record with campaign tracking parameters.
///
/// `amp` is the parameter separator (`&` or `&amp;` depending on context).
fn tracked_url(url: &str, sequence_id: &str, amp: &str) -> String {
    format!("{url}?utm_source=newsletter{amp}utm_medium=email{amp}utm_campaign={sequence_id}")
}

/// Intro lines announcing each present section, with per-slot markers.
fn intro_items(bundle: &NewsletterBundle) -> Vec<String> {
    const MARKERS: [&str; 3] = ["1️⃣", "2️⃣", "3️⃣"];

    let mut items: Vec<String> = bundle
        .articles()
        .into_iter()
        .zip(MARKERS)
        .filter_map(|(article, marker)| article.map(|a| format!("{marker} {}", display_title(a))))
        .collect();

    if let Some(tool) = &bundle.tool {
        items.push(format!(
            "⚒️ L'outil de la semaine : {}",
            display_tool_name(tool)
        ));
    }

    items
}
