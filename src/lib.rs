//! Custode - content moderation classifier for media uploads
//!
//! A deterministic, explainable rule-based classifier that scores a media
//! item's text metadata (and, optionally, an external provider's scan
//! labels) across six sensitivity categories and derives the content rating
//! persisted on the record.
//!
//! # Architecture
//!
//! One classification is a single pass:
//! 1. Lexical keyword tables over title + description
//! 2. External provider labels, merged per category by max confidence
//! 3. A word-bounded pattern fallback when no strong signal exists
//! 4. An ordered decision list from the merged analysis to the final rating
//!
//! The [`pipeline`] module drives this pass against a persistence seam with
//! staged progress writes, the way the upload flow consumes it.
//!
//! # Example
//!
//! ```no_run
//! use custode::{Classifier, ClassifierConfig, MediaKind};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let classifier = Classifier::new(ClassifierConfig::default());
//! let outcome = classifier
//!     .classify("Zombie Graveyard Horror Nightmare", "", None, MediaKind::Video)
//!     .await;
//!
//! println!("{} ({})", outcome.content_rating, outcome.sensitivity_status);
//! println!("Reason: {}", outcome.reason);
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::info;

// Analysis: categories, detections, scorers, orchestration
pub mod analysis;

// Immutable thresholds and pacing
pub mod config;

// Staged processing against the persistence seam
pub mod pipeline;

// External moderation provider seam and HTTP client
pub mod provider;

// Analysis -> rating decision policy
pub mod rating;

#[cfg(test)]
mod samples_test;

pub use analysis::{Analysis, AnalysisMethod, Category, Detection};
pub use config::{ClassifierConfig, Pacing, Thresholds};
pub use pipeline::{MediaRecord, MediaStore, ProcessingStatus, Processor};
pub use provider::{ModerationProvider, ModerationScan, ProviderLabel};
pub use rating::{determine_rating, ContentRating, Rating, SensitivityStatus};

/// Errors surfaced by the pipeline and the provider client. The classifier
/// itself never fails.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("media record not found: {0}")]
    NotFound(String),

    #[error("moderation provider error: {0}")]
    Provider(String),

    #[error("http transport error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("store error: {0}")]
    Store(String),
}

/// What kind of resource a media item is, as the provider and the stage
/// plans see it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MediaKind {
    Image,
    Video,
}

impl MediaKind {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            MediaKind::Image => "image",
            MediaKind::Video => "video",
        }
    }
}

impl fmt::Display for MediaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Everything one classification produced: the full analysis plus the
/// rating derived from it.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModerationOutcome {
    pub analysis: Analysis,
    pub content_rating: ContentRating,
    pub sensitivity_status: SensitivityStatus,
    pub reason: String,
}

/// The main classifier. Holds the immutable configuration and an optional
/// provider handle; cheap to clone.
#[derive(Clone)]
pub struct Classifier {
    config: ClassifierConfig,
    provider: Option<Arc<dyn ModerationProvider>>,
}

impl Classifier {
    /// A classifier with no external provider.
    pub fn new(config: ClassifierConfig) -> Self {
        Self {
            config,
            provider: None,
        }
    }

    /// Attach an external moderation provider.
    pub fn with_provider(mut self, provider: Arc<dyn ModerationProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Classify one item. Never fails; always returns a best-effort outcome.
    pub async fn classify(
        &self,
        title: &str,
        description: &str,
        resource_id: Option<&str>,
        kind: MediaKind,
    ) -> ModerationOutcome {
        info!(title, "starting content moderation");

        let analyzer = match self.provider.as_deref() {
            Some(provider) => analysis::Analyzer::with_provider(&self.config.thresholds, provider),
            None => analysis::Analyzer::new(&self.config.thresholds),
        };
        let analysis = analyzer.analyze(title, description, resource_id, kind).await;
        let rating = rating::determine_rating(&analysis);

        info!(
            rating = rating.content_rating.as_str(),
            status = rating.sensitivity_status.as_str(),
            reason = %rating.reason,
            "moderation result"
        );

        ModerationOutcome {
            analysis,
            content_rating: rating.content_rating,
            sensitivity_status: rating.sensitivity_status,
            reason: rating.reason,
        }
    }
}
