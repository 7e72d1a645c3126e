//! Whole-issue extraction.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Instant;

use futures::future::join_all;
use tracing::{info, instrument, warn};

use growthnews_shared::{
    ContentRecord, GrowthNewsError, IssueSources, NewsletterBundle, Result, Slot,
};

use crate::extraction::Extractor;

/// Progress callback for batch extraction.
pub trait ProgressReporter: Send + Sync {
    /// Called once before any request with the number of URLs.
    fn started(&self, total: usize);
    /// Called as each URL settles, in completion order.
    fn slot_done(&self, slot: Slot, ok: bool, completed: usize, total: usize);
    /// Called when every URL succeeded.
    fn done(&self, bundle: &NewsletterBundle);
}

/// No-op progress reporter for headless/test usage.
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {
    fn started(&self, _total: usize) {}
    fn slot_done(&self, _slot: Slot, _ok: bool, _completed: usize, _total: usize) {}
    fn done(&self, _bundle: &NewsletterBundle) {}
}

/// Extract every URL of an issue into a bundle.
///
/// URLs run concurrently and a failing one does not cancel the others. Once
/// all have settled, the first failure in slot order fails the batch.
#[instrument(skip_all, fields(sequence_id = %sources.sequence_id))]
pub async fn extract_issue(
    extractor: &Extractor,
    sources: &IssueSources,
    progress: &dyn ProgressReporter,
) -> Result<NewsletterBundle> {
    let sequence_id = sources.sequence_id.trim();
    if sequence_id.is_empty() {
        return Err(GrowthNewsError::missing_input("sequence id is required"));
    }

    let urls = sources.urls();
    if urls.is_empty() {
        return Err(GrowthNewsError::missing_input(
            "at least one content URL is required",
        ));
    }

    let start = Instant::now();
    let total = urls.len();
    let completed = AtomicUsize::new(0);
    progress.started(total);

    let results: Vec<(Slot, Result<ContentRecord>)> =
        join_all(urls.iter().map(|&(slot, url)| {
            let completed = &completed;
            async move {
                let result = extractor.extract(url, slot.kind()).await;
                let n = completed.fetch_add(1, Ordering::Relaxed) + 1;
                if let Err(e) = &result {
                    warn!(slot = slot.as_str(), url, error = %e, "extraction failed");
                }
                progress.slot_done(slot, result.is_ok(), n, total);
                (slot, result)
            }
        }))
        .await;

    let mut bundle = NewsletterBundle {
        sequence_id: sequence_id.to_string(),
        social_post_url: trimmed(sources.social_post_url.as_deref()),
        social_post_excerpt: trimmed(sources.social_post_excerpt.as_deref()),
        ..Default::default()
    };

    for (slot, result) in results {
        bundle.set(slot, result?);
    }

    info!(
        urls = total,
        elapsed_ms = start.elapsed().as_millis(),
        "issue extracted"
    );
    progress.done(&bundle);

    Ok(bundle)
}

fn trimmed(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
