//! Core workflows for GrowthNews.
//!
//! Ties page fetching and the language model together into content
//! extraction ([`Extractor`], [`extract_issue`]), subject-line generation
//! ([`compose_subject`]) and campaign creation ([`CampaignClient`]).

pub mod campaign;
pub mod extraction;
pub mod llm;
pub mod pipeline;
mod prompts;
pub mod subject;

pub use campaign::CampaignClient;
pub use extraction::Extractor;
pub use llm::ChatClient;
pub use pipeline::{ProgressReporter, SilentProgress, extract_issue};
pub use subject::{compose_subject, subject_inputs};
