//! Page fetching for GrowthNews.
//!
//! Downloads a source page, flattens it to plain text for the model and
//! collects the titles the page advertises for use as fallbacks.

mod text;

pub use text::{FallbackTitles, page_to_text};

use std::time::Duration;

use reqwest::Client;
use tracing::{debug, instrument};
use url::Url;

use growthnews_shared::{GrowthNewsError, HttpConfig, Result};

/// Maximum number of redirects to follow.
const MAX_REDIRECTS: usize = 5;

/// Request timeout for page downloads.
const TIMEOUT: Duration = Duration::from_secs(30);

/// A downloaded page, flattened.
#[derive(Debug, Clone)]
pub struct FetchedPage {
    /// Final URL after redirects.
    pub url: String,
    pub html: String,
    /// Plain text handed to the model.
    pub text: String,
    pub titles: FallbackTitles,
}

/// HTTP client for source pages.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: Client,
}

impl PageFetcher {
    pub fn new(config: &HttpConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .redirect(reqwest::redirect::Policy::limited(MAX_REDIRECTS))
            .timeout(TIMEOUT)
            .build()
            .map_err(|e| GrowthNewsError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { client })
    }

    /// Fetch a page. Non-success statuses surface as [`GrowthNewsError::Upstream`]
    /// with the page's own status code.
    #[instrument(skip(self))]
    pub async fn fetch(&self, url: &str) -> Result<FetchedPage> {
        let parsed = Url::parse(url)
            .map_err(|e| GrowthNewsError::missing_input(format!("invalid URL {url}: {e}")))?;

        let response = self
            .client
            .get(parsed)
            .send()
            .await
            .map_err(|e| GrowthNewsError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let reason = status.canonical_reason().unwrap_or("unknown status");
            return Err(GrowthNewsError::upstream(
                status.as_u16(),
                format!("failed to fetch {url}: {reason}"),
            ));
        }

        let final_url = response.url().to_string();
        let html = response
            .text()
            .await
            .map_err(|e| GrowthNewsError::Network(format!("{url}: body read failed: {e}")))?;

        let text = page_to_text(&html);
        let titles = FallbackTitles::from_html(&html);
        debug!(bytes = html.len(), chars = text.len(), "page fetched");

        Ok(FetchedPage {
            url: final_url,
            html,
            text,
            titles,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher() -> PageFetcher {
        PageFetcher::new(&HttpConfig::default()).unwrap()
    }

    #[tokio::test]
    async fn fetches_and_flattens() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/post"))
            .and(header("user-agent", HttpConfig::default().user_agent.as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "<html><head><title>Le titre</title></head><body><h1>Grand</h1><p>Bonjour&nbsp;!</p></body></html>",
            ))
            .mount(&server)
            .await;

        let page = fetcher()
            .fetch(&format!("{}/post", server.uri()))
            .await
            .unwrap();

        assert_eq!(page.text, "Le titre Grand Bonjour !");
        assert_eq!(page.titles.first(), Some("Le titre"));
        assert!(page.url.ends_with("/post"));
    }

    #[tokio::test]
    async fn error_status_is_upstream() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(404))
            .mount(&server)
            .await;

        let url = format!("{}/missing", server.uri());
        let err = fetcher().fetch(&url).await.unwrap_err();

        assert_eq!(err.status(), Some(404));
        assert!(err.to_string().contains(&format!("failed to fetch {url}: Not Found")));
    }

    #[tokio::test]
    async fn rejects_malformed_url() {
        let err = fetcher().fetch("not a url").await.unwrap_err();
        assert!(matches!(err, GrowthNewsError::MissingInput { .. }));
    }
}
