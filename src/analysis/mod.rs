//! Moderation analysis for uploaded media.
//!
//! The analysis runs as a short pipeline over the item's text metadata and,
//! when available, the external provider's scan labels:
//!
//! 1. **Keywords** - lexical tables over title + description
//! 2. **Provider** - external scan labels, merged by max confidence
//! 3. **Patterns** - word-bounded regex fallback when nothing primary fired
//!
//! The orchestrator never fails: provider errors are logged, the method tag
//! is downgraded to `fallback`, and the best-effort analysis is returned.

pub mod keywords;
pub mod patterns;
mod types;

pub use keywords::{analyze_text, TextAnalysis};
pub use types::{Analysis, AnalysisMethod, Category, Detection};

use tracing::{debug, warn};

use crate::config::Thresholds;
use crate::provider::{self, ModerationProvider};
use crate::MediaKind;

/// Runs one complete analysis pass. Cheap to build per request.
pub struct Analyzer<'a> {
    thresholds: &'a Thresholds,
    provider: Option<&'a dyn ModerationProvider>,
}

impl<'a> Analyzer<'a> {
    /// Lexical-and-pattern analysis only.
    pub fn new(thresholds: &'a Thresholds) -> Self {
        Self {
            thresholds,
            provider: None,
        }
    }

    /// Also consult the external provider when a resource id is supplied.
    pub fn with_provider(thresholds: &'a Thresholds, provider: &'a dyn ModerationProvider) -> Self {
        Self {
            thresholds,
            provider: Some(provider),
        }
    }

    /// Produce one complete [`Analysis`] for the item.
    pub async fn analyze(
        &self,
        title: &str,
        description: &str,
        resource_id: Option<&str>,
        kind: MediaKind,
    ) -> Analysis {
        let mut analysis = Analysis::new();

        // Lexical pass. Only detections seed the analysis; weak scores are
        // left clear so the pattern fallback can still fire.
        let text = keywords::analyze_text(title, description);
        if text.horror.detected {
            analysis.horror = text.horror;
        }
        if text.violence.detected {
            analysis.violence = text.violence;
        }
        if text.adult.detected {
            analysis.nudity = text.adult;
        }

        // Provider pass, when we have something to ask about.
        if let (Some(provider), Some(resource_id)) = (self.provider, resource_id) {
            match provider.labels(resource_id, kind).await {
                Ok(scans) => {
                    debug!(resource_id, scans = scans.len(), "merging provider labels");
                    for (category, detection) in
                        provider::external_detections(&scans, self.thresholds)
                    {
                        analysis.merge_max(category, detection);
                    }
                }
                Err(error) => {
                    warn!(resource_id, %error, "moderation provider unavailable, continuing without labels");
                    analysis.analysis_method = AnalysisMethod::Fallback;
                }
            }
        }

        // Pattern fallback, only when no primary category fired.
        if !(analysis.nudity.detected
            || analysis.horror.detected
            || analysis.violence.detected
            || analysis.gore.detected)
        {
            debug!("no primary detection, running pattern fallback");
            for (category, detection) in patterns::scan(title, description, self.thresholds) {
                analysis.merge_max(category, detection);
            }
        }

        analysis
    }
}
