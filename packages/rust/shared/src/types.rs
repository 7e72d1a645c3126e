//! Core domain types: extracted content, the newsletter bundle, and the
//! editor's issue sources.

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// ContentKind
// ---------------------------------------------------------------------------

/// Which prompt set an extraction uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    /// One of the three weekly articles.
    #[default]
    Article,
    /// The "tool of the week".
    Tool,
    /// An article from the companion site; only its title is generated.
    #[serde(alias = "deuxio")]
    Companion,
}

impl ContentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article => "article",
            Self::Tool => "tool",
            Self::Companion => "companion",
        }
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ContentKind {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "article" => Ok(Self::Article),
            "tool" => Ok(Self::Tool),
            "companion" | "deuxio" => Ok(Self::Companion),
            other => Err(format!(
                "unknown content kind '{other}': expected article, tool or companion"
            )),
        }
    }
}

// ---------------------------------------------------------------------------
// ContentRecord
// ---------------------------------------------------------------------------

/// The result of extracting and summarizing one source URL.
///
/// Every optional field is display metadata; renderers substitute a fallback
/// when it is absent or blank.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentRecord {
    /// Source address, kept opaque.
    pub url: String,
    /// Flattened plain text of the source page.
    #[serde(rename = "text", default)]
    pub raw_text: String,
    /// Generated body using the inline markup dialect, with optional `#` headers.
    #[serde(default)]
    pub summary: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
    /// Category label, conventionally `"{emoji} {Category}"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tag: Option<String>,
}

impl ContentRecord {
    pub fn author(&self) -> Option<&str> {
        non_blank(self.author.as_deref())
    }

    pub fn title(&self) -> Option<&str> {
        non_blank(self.title.as_deref())
    }

    pub fn tool_name(&self) -> Option<&str> {
        non_blank(self.tool_name.as_deref())
    }

    pub fn tag(&self) -> Option<&str> {
        non_blank(self.tag.as_deref())
    }
}

// ---------------------------------------------------------------------------
// NewsletterBundle
// ---------------------------------------------------------------------------

/// Everything one issue's renderers consume. Built in memory, never persisted
/// beyond the editable bundle file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterBundle {
    /// Issue number; interpolated for display and as `utm_campaign`.
    pub sequence_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article1: Option<ContentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article2: Option<ContentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub article3: Option<ContentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool: Option<ContentRecord>,
    /// Companion-site article; only its title and url are rendered.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub companion: Option<ContentRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_post_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub social_post_excerpt: Option<String>,
}

impl NewsletterBundle {
    /// The three article slots in display order.
    pub fn articles(&self) -> [Option<&ContentRecord>; 3] {
        [
            self.article1.as_ref(),
            self.article2.as_ref(),
            self.article3.as_ref(),
        ]
    }

    pub fn social_post_url(&self) -> Option<&str> {
        non_blank(self.social_post_url.as_deref())
    }

    pub fn social_post_excerpt(&self) -> Option<&str> {
        non_blank(self.social_post_excerpt.as_deref())
    }

    /// Store an extracted record in the given slot.
    pub fn set(&mut self, slot: Slot, record: ContentRecord) {
        let target = match slot {
            Slot::Article1 => &mut self.article1,
            Slot::Article2 => &mut self.article2,
            Slot::Article3 => &mut self.article3,
            Slot::Tool => &mut self.tool,
            Slot::Companion => &mut self.companion,
        };
        *target = Some(record);
    }
}

// ---------------------------------------------------------------------------
// Slots and issue sources
// ---------------------------------------------------------------------------

/// Position of a record inside a bundle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Slot {
    Article1,
    Article2,
    Article3,
    Tool,
    Companion,
}

impl Slot {
    /// The prompt set used to extract this slot.
    pub fn kind(&self) -> ContentKind {
        match self {
            Self::Article1 | Self::Article2 | Self::Article3 => ContentKind::Article,
            Self::Tool => ContentKind::Tool,
            Self::Companion => ContentKind::Companion,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Article1 => "article1",
            Self::Article2 => "article2",
            Self::Article3 => "article3",
            Self::Tool => "tool",
            Self::Companion => "companion",
        }
    }
}

/// The editor's input form for one issue, loaded from TOML.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IssueSources {
    /// Issue number.
    pub sequence_id: String,
    #[serde(default)]
    pub article1: Option<String>,
    #[serde(default)]
    pub article2: Option<String>,
    #[serde(default)]
    pub article3: Option<String>,
    #[serde(default)]
    pub tool: Option<String>,
    #[serde(default)]
    pub companion: Option<String>,
    #[serde(default)]
    pub social_post_url: Option<String>,
    #[serde(default)]
    pub social_post_excerpt: Option<String>,
}

impl IssueSources {
    /// Every filled-in URL with its slot, in form order.
    pub fn urls(&self) -> Vec<(Slot, &str)> {
        [
            (Slot::Article1, self.article1.as_deref()),
            (Slot::Article2, self.article2.as_deref()),
            (Slot::Article3, self.article3.as_deref()),
            (Slot::Tool, self.tool.as_deref()),
            (Slot::Companion, self.companion.as_deref()),
        ]
        .into_iter()
        .filter_map(|(slot, url)| non_blank(url).map(|u| (slot, u.trim())))
        .collect()
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn record_uses_form_field_names() {
        let record = ContentRecord {
            url: "https://example.com/a".into(),
            raw_text: "body".into(),
            summary: "#1. Intro".into(),
            tool_name: Some("Notion".into()),
            ..Default::default()
        };
        let json = serde_json::to_value(&record).expect("serialize");
        assert_eq!(json["text"], "body");
        assert_eq!(json["toolName"], "Notion");
        assert!(json.get("author").is_none());
    }

    #[test]
    fn blank_optional_fields_count_as_absent() {
        let record = ContentRecord {
            author: Some("  ".into()),
            tag: Some("🔍 SEO".into()),
            ..Default::default()
        };
        assert_eq!(record.author(), None);
        assert_eq!(record.tag(), Some("🔍 SEO"));
    }

    #[test]
    fn bundle_parses_with_missing_slots() {
        let json = r#"{
            "sequenceId": "142",
            "article2": { "url": "https://example.com/b", "summary": "Hello" },
            "socialPostUrl": ""
        }"#;
        let bundle: NewsletterBundle = serde_json::from_str(json).expect("deserialize");
        assert_eq!(bundle.sequence_id, "142");
        let [a1, a2, a3] = bundle.articles();
        assert!(a1.is_none() && a3.is_none());
        assert_eq!(a2.map(|r| r.summary.as_str()), Some("Hello"));
        assert_eq!(bundle.social_post_url(), None);
    }

    #[test]
    fn kind_accepts_legacy_companion_name() {
        let kind: ContentKind = serde_json::from_str(r#""deuxio""#).expect("deserialize");
        assert_eq!(kind, ContentKind::Companion);
        assert_eq!("tool".parse::<ContentKind>(), Ok(ContentKind::Tool));
        assert!("video".parse::<ContentKind>().is_err());
    }

    #[test]
    fn issue_sources_skip_blank_urls() {
        let toml_str = r#"
sequence_id = "142"
article1 = "https://example.com/a"
article2 = "   "
tool = " https://tool.example.com "
"#;
        let issue: IssueSources = toml::from_str(toml_str).expect("parse");
        let urls = issue.urls();
        assert_eq!(
            urls,
            vec![
                (Slot::Article1, "https://example.com/a"),
                (Slot::Tool, "https://tool.example.com"),
            ]
        );
        assert_eq!(urls[1].0.kind(), ContentKind::Tool);
    }

    #[test]
    fn bundle_set_fills_slot() {
        let mut bundle = NewsletterBundle::default();
        bundle.set(
            Slot::Companion,
            ContentRecord {
                url: "https://deux.io/blog".into(),
                ..Default::default()
            },
        );
        assert!(bundle.companion.is_some());
        assert!(bundle.tool.is_none());
    }
}
