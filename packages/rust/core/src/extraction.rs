//! Single-URL extraction: fetch the page, run the kind's model calls
//! concurrently, map the replies onto a [`ContentRecord`].

use std::sync::LazyLock;

use futures::future::try_join_all;
use regex::Regex;
use tracing::{info, instrument};

use growthnews_fetch::{FallbackTitles, PageFetcher};
use growthnews_shared::{AppConfig, ContentKind, ContentRecord, GrowthNewsError, Result};

use crate::llm::ChatClient;
use crate::prompts::{self, Field};

static TITLE_LABEL_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)^Titre\s*:\s*").expect("valid regex"));

/// Fetches pages and turns them into content records.
#[derive(Debug, Clone)]
pub struct Extractor {
    fetcher: PageFetcher,
    chat: ChatClient,
}

impl Extractor {
    pub fn new(fetcher: PageFetcher, chat: ChatClient) -> Self {
        Self { fetcher, chat }
    }

    /// Credentials are read here, so a missing key fails before any request.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let chat = ChatClient::from_config(&config.openai)?;
        let fetcher = PageFetcher::new(&config.http)?;
        Ok(Self::new(fetcher, chat))
    }

    /// Extract one page.
    ///
    /// All of the kind's model calls run concurrently; the first failure fails
    /// the whole extraction and nothing partial is returned.
    #[instrument(skip(self), fields(kind = %kind))]
    pub async fn extract(&self, url: &str, kind: ContentKind) -> Result<ContentRecord> {
        let url = url.trim();
        if url.is_empty() {
            return Err(GrowthNewsError::missing_input("URL is required"));
        }

        let page = self.fetcher.fetch(url).await?;

        let calls = prompts::calls_for(kind);
        let replies = try_join_all(calls.iter().map(|call| {
            let user = prompts::user_message(kind, call.field, &page.text);
            async move {
                self.chat
                    .complete(call.system, &user, call.temperature, call.max_tokens)
                    .await
            }
        }))
        .await?;

        info!(calls = calls.len(), "extraction complete");

        let mut record = ContentRecord {
            url: url.to_string(),
            raw_text: page.text,
            ..Default::default()
        };
        let mut generated_title = None;

        for (call, reply) in calls.iter().zip(replies) {
            match call.field {
                Field::Summary => record.summary = reply,
                Field::Author => record.author = present(&reply),
                Field::ToolName => record.tool_name = present(&reply),
                Field::Tag => record.tag = present(&reply),
                Field::Title => generated_title = present(&clean_title(&reply)),
            }
        }

        record.title = match kind {
            ContentKind::Article => with_fallback(generated_title, &page.titles),
            ContentKind::Companion => with_fallback(present(&record.summary), &page.titles),
            ContentKind::Tool => None,
        };

        Ok(record)
    }
}

/// Trimmed value, or `None` when blank.
fn present(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Drop a leading `Titre :` label and one pair of surrounding double quotes.
fn clean_title(raw: &str) -> String {
    let title = TITLE_LABEL_RE.replace(raw.trim(), "");
    let title = title.strip_prefix('"').unwrap_or(&title);
    let title = title.strip_suffix('"').unwrap_or(title);
    title.trim().to_string()
}

fn with_fallback(title: Option<String>, fallbacks: &FallbackTitles) -> Option<String> {
    title.or_else(|| fallbacks.first().map(str::to_string))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::test_support::{api_error, reply};
    use growthnews_shared::HttpConfig;
    use serde_json::json;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    const PAGE: &str = r#"<html><head><title>Page title</title>
        <meta property="og:title" content="OG title"></head>
        <body><h1>Heading</h1><p>Growth &amp; marketing</p></body></html>"#;

    async fn server_with_page() -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/page"))
            .respond_with(ResponseTemplate::new(200).set_body_string(PAGE))
            .mount(&server)
            .await;
        server
    }

    async fn reply_for(server: &MockServer, max_tokens: u32, content: &str) {
        Mock::given(method("POST"))
            .and(path("/chat/completions"))
            .and(body_partial_json(json!({ "max_tokens": max_tokens })))
            .respond_with(reply(content))
            .expect(1)
            .mount(server)
            .await;
    }

    fn extractor(server: &MockServer) -> Extractor {
        Extractor::new(
            PageFetcher::new(&HttpConfig::default()).unwrap(),
            ChatClient::new("sk-test", "gpt-4o-mini", server.uri()),
        )
    }

    #[test]
    fn title_label_and_quotes_are_stripped() {
        assert_eq!(clean_title("Titre : \"Le vrai titre\""), "Le vrai titre");
        assert_eq!(clean_title("titre:Sans espace"), "Sans espace");
        assert_eq!(clean_title("  Déjà propre  "), "Déjà propre");
        assert_eq!(clean_title("\"\""), "");
    }

    #[tokio::test]
    async fn article_fills_every_field() {
        let server = server_with_page().await;
        reply_for(&server, 2000, "#1. Point clé\nLe texte.\n").await;
        reply_for(&server, 50, "  Jane Doe\n").await;
        reply_for(&server, 30, "📊 Analytics").await;
        reply_for(&server, 60, "Titre : \"Le vrai titre\"").await;

        let url = format!("{}/page", server.uri());
        let record = extractor(&server)
            .extract(&url, ContentKind::Article)
            .await
            .unwrap();

        assert_eq!(record.url, url);
        assert_eq!(record.raw_text, "Page title Heading Growth & marketing");
        assert_eq!(record.summary, "#1. Point clé\nLe texte.\n");
        assert_eq!(record.author.as_deref(), Some("Jane Doe"));
        assert_eq!(record.tag.as_deref(), Some("📊 Analytics"));
        assert_eq!(record.title.as_deref(), Some("Le vrai titre"));
        assert_eq!(record.tool_name, None);
    }

    #[tokio::test]
    async fn article_title_falls_back_to_page_title() {
        let server = server_with_page().await;
        reply_for(&server, 2000, "Résumé").await;
        reply_for(&server, 50, "Auteur inconnu").await;
        reply_for(&server, 30, "").await;
        reply_for(&server, 60, "Titre :  ").await;

        let record = extractor(&server)
            .extract(&format!("{}/page", server.uri()), ContentKind::Article)
            .await
            .unwrap();

        assert_eq!(record.title.as_deref(), Some("Page title"));
        assert_eq!(record.tag, None);
        assert_eq!(record.author.as_deref(), Some("Auteur inconnu"));
    }

    #[tokio::test]
    async fn tool_gets_name_and_tag() {
        let server = server_with_page().await;
        reply_for(&server, 800, "Un outil pratique.").await;
        reply_for(&server, 50, "Notion").await;
        reply_for(&server, 30, "🛠️ Automation").await;

        let record = extractor(&server)
            .extract(&format!("{}/page", server.uri()), ContentKind::Tool)
            .await
            .unwrap();

        assert_eq!(record.summary, "Un outil pratique.");
        assert_eq!(record.tool_name.as_deref(), Some("Notion"));
        assert_eq!(record.tag.as_deref(), Some("🛠️ Automation"));
        assert_eq!(record.title, None);
        assert_eq!(record.author, None);
    }

    #[tokio::test]
    async fn companion_title_is_the_generated_text() {
        let server = server_with_page().await;
        reply_for(&server, 100, " Le guide du growth \n").await;

        let record = extractor(&server)
            .extract(&format!("{}/page", server.uri()), ContentKind::Companion)
            .await
            .unwrap();

        assert_eq!(record.summary, " Le guide du growth \n");
        assert_eq!(record.title.as_deref(), Some("Le guide du growth"));
        assert_eq!(record.tag, None);
    }

    #[tokio::test]
    async fn companion_blank_title_uses_page_titles() {
        let server = server_with_page().await;
        reply_for(&server, 100, "").await;

        let record = extractor(&server)
            .extract(&format!("{}/page", server.uri()), ContentKind::Companion)
            .await
            .unwrap();

        assert_eq!(record.title.as_deref(), Some("Page title"));
    }

    #[tokio::test]
    async fn one_failed_call_fails_the_url() {
        let server = server_with_page().await;
        Mock::given(method("POST"))
            .and(body_partial_json(json!({ "max_tokens": 30 })))
            .respond_with(api_error(500, "The server had an error"))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(reply("ok"))
            .mount(&server)
            .await;

        let err = extractor(&server)
            .extract(&format!("{}/page", server.uri()), ContentKind::Tool)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(500));
        assert!(err.to_string().contains("OpenAI API error: The server had an error"));
    }

    #[tokio::test]
    async fn page_failure_skips_the_model() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403))
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .respond_with(reply("never"))
            .expect(0)
            .mount(&server)
            .await;

        let err = extractor(&server)
            .extract(&format!("{}/blocked", server.uri()), ContentKind::Article)
            .await
            .unwrap_err();

        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("failed to fetch"));
    }

    #[tokio::test]
    async fn blank_url_is_missing_input() {
        let server = MockServer::start().await;
        let err = extractor(&server)
            .extract("   ", ContentKind::Article)
            .await
            .unwrap_err();
        assert!(matches!(err, GrowthNewsError::MissingInput { .. }));
    }
}
