//! Email campaign creation on the Brevo API.

use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{info, instrument, warn};

use growthnews_shared::{BrevoConfig, GrowthNewsError, Result};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CampaignPayload<'a> {
    name: String,
    subject: &'a str,
    sender: Sender<'a>,
    html_content: &'a str,
    recipients: Recipients,
    inline_image_activation: bool,
    mirror_active: bool,
    recurring: bool,
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct Sender<'a> {
    name: &'a str,
    email: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct Recipients {
    list_ids: Vec<i64>,
}

#[derive(Debug, Deserialize)]
struct CampaignCreated {
    id: i64,
}

/// Creates draft campaigns addressed to the configured list.
#[derive(Clone)]
pub struct CampaignClient {
    http_client: Client,
    api_key: String,
    list_id: i64,
    config: BrevoConfig,
}

impl std::fmt::Debug for CampaignClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CampaignClient")
            .field("list_id", &self.list_id)
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl CampaignClient {
    pub fn new(api_key: impl Into<String>, list_id: i64, config: BrevoConfig) -> Self {
        Self {
            http_client: Client::new(),
            api_key: api_key.into(),
            list_id,
            config,
        }
    }

    /// Reads the API key and list id from the environment.
    pub fn from_config(config: &BrevoConfig) -> Result<Self> {
        let api_key = config.api_key()?;
        let list_id = config.list_id()?;
        Ok(Self::new(api_key, list_id, config.clone()))
    }

    /// Create a classic campaign named `"{prefix} {sequence_id}"` and return its id.
    #[instrument(skip(self, html), fields(list_id = self.list_id))]
    pub async fn create_campaign(
        &self,
        html: &str,
        sequence_id: &str,
        subject: &str,
    ) -> Result<i64> {
        if subject.trim().is_empty() {
            return Err(GrowthNewsError::missing_input(
                "subject is required, generate one first",
            ));
        }

        let payload = CampaignPayload {
            name: format!("{} {sequence_id}", self.config.campaign_prefix),
            subject,
            sender: Sender {
                name: &self.config.sender_name,
                email: &self.config.sender_email,
            },
            html_content: html,
            recipients: Recipients {
                list_ids: vec![self.list_id],
            },
            inline_image_activation: false,
            mirror_active: false,
            recurring: false,
            kind: "classic",
        };

        let base_url = self.config.base_url.trim_end_matches('/');
        let response = self
            .http_client
            .post(format!("{base_url}/emailCampaigns"))
            .header("Accept", "application/json")
            .header("api-key", &self.api_key)
            .json(&payload)
            .send()
            .await
            .map_err(|e| {
                warn!(error = %e, "campaign request failed");
                GrowthNewsError::Network(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, error = %body, "campaign API error");
            return Err(GrowthNewsError::upstream(
                status.as_u16(),
                format!("Brevo API error: {body}"),
            ));
        }

        let created: CampaignCreated = response
            .json()
            .await
            .map_err(|e| GrowthNewsError::parse(format!("campaign response: {e}")))?;

        info!(campaign_id = created.id, name = %payload.name, "campaign created");
        Ok(created.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{body_json, header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client(server: &MockServer) -> CampaignClient {
        let config = BrevoConfig {
            base_url: server.uri(),
            ..Default::default()
        };
        CampaignClient::new("xkeysib-test", 12, config)
    }

    #[tokio::test]
    async fn posts_classic_campaign() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/emailCampaigns"))
            .and(header("api-key", "xkeysib-test"))
            .and(body_json(json!({
                "name": "LGN 142",
                "subject": "Un objet",
                "sender": { "name": "Fabien Guilleux", "email": "fabien@deux.io" },
                "htmlContent": "<html></html>",
                "recipients": { "listIds": [12] },
                "inlineImageActivation": false,
                "mirrorActive": false,
                "recurring": false,
                "type": "classic"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({ "id": 987 })))
            .expect(1)
            .mount(&server)
            .await;

        let id = client(&server)
            .create_campaign("<html></html>", "142", "Un objet")
            .await
            .unwrap();
        assert_eq!(id, 987);
    }

    #[tokio::test]
    async fn blank_subject_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(201))
            .expect(0)
            .mount(&server)
            .await;

        let err = client(&server)
            .create_campaign("<html></html>", "142", "  ")
            .await
            .unwrap_err();
        assert!(matches!(err, GrowthNewsError::MissingInput { .. }));
    }

    #[tokio::test]
    async fn api_error_carries_body() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(
                ResponseTemplate::new(400).set_body_string(
                    r#"{"code":"missing_parameter","message":"sender is missing"}"#,
                ),
            )
            .mount(&server)
            .await;

        let err = client(&server)
            .create_campaign("<html></html>", "142", "Objet")
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(400));
        assert!(err.to_string().contains("sender is missing"));
    }

    #[test]
    fn missing_credentials_fail_early() {
        let config = BrevoConfig {
            api_key_env: "GROWTHNEWS_TEST_UNSET_BREVO_KEY".into(),
            ..Default::default()
        };
        let err = CampaignClient::from_config(&config).unwrap_err();
        assert!(matches!(err, GrowthNewsError::Config { .. }));
    }
}
