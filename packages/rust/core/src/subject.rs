//! Subject-line generation.

use tracing::{info, instrument};

use growthnews_shared::{ContentRecord, GrowthNewsError, NewsletterBundle, Result};

use crate::llm::ChatClient;
use crate::prompts::{
    SUBJECT_MAX_TOKENS, SUBJECT_SYSTEM_PROMPT, SUBJECT_TEMPERATURE, subject_user_prompt,
};

/// The three article summaries and the tool summary, absent ones as `""`.
pub fn subject_inputs(bundle: &NewsletterBundle) -> [&str; 4] {
    let [a1, a2, a3] = bundle.articles();
    [a1, a2, a3, bundle.tool.as_ref()].map(summary_of)
}

fn summary_of(record: Option<&ContentRecord>) -> &str {
    record.map(|r| r.summary.as_str()).unwrap_or_default()
}

/// Ask the model for one catchy subject line.
#[instrument(skip_all)]
pub async fn compose_subject(client: &ChatClient, summaries: [&str; 4]) -> Result<String> {
    if summaries.iter().all(|s| s.trim().is_empty()) {
        return Err(GrowthNewsError::missing_input(
            "at least one summary is required to compose a subject",
        ));
    }

    let subject = client
        .complete(
            SUBJECT_SYSTEM_PROMPT,
            &subject_user_prompt(summaries),
            SUBJECT_TEMPERATURE,
            SUBJECT_MAX_TOKENS,
        )
        .await?
        .trim()
        .to_string();

    info!(chars = subject.chars().count(), "subject composed");
    Ok(subject)
}
