//! Immutable classifier configuration.
//!
//! Keyword and pattern tables live next to the scorers that use them; the
//! tunable part is here: per-category detection thresholds and the pacing of
//! staged progress writes. Built once at startup and passed in, never
//! mutated.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::analysis::Category;
use crate::MediaKind;

/// Confidence threshold per category, used to turn a score into a detection
/// flag. Gore and weapons are stricter on purpose.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thresholds {
    pub nudity: f32,
    pub violence: f32,
    pub horror: f32,
    pub gore: f32,
    pub drugs: f32,
    pub weapons: f32,
}

impl Thresholds {
    /// Look up the threshold for a category.
    pub fn for_category(&self, category: Category) -> f32 {
        match category {
            Category::Nudity => self.nudity,
            Category::Violence => self.violence,
            Category::Horror => self.horror,
            Category::Gore => self.gore,
            Category::Drugs => self.drugs,
            Category::Weapons => self.weapons,
        }
    }
}

impl Default for Thresholds {
    fn default() -> Self {
        Self {
            nudity: 0.6,
            violence: 0.5,
            horror: 0.5,
            gore: 0.4,
            drugs: 0.5,
            weapons: 0.4,
        }
    }
}

/// Configuration for the [`Classifier`](crate::Classifier).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifierConfig {
    pub thresholds: Thresholds,
}

/// Pacing of the staged progress writes in the processing pipeline.
///
/// The pauses simulate work between stages; they are cooperative
/// (`tokio::time::sleep`) and never block other classifications. Tests run
/// with [`Pacing::instant`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pacing {
    pub video_pause: Duration,
    pub image_pause: Duration,
}

impl Pacing {
    /// Zero-delay pacing for tests and batch backfills.
    pub const fn instant() -> Self {
        Self {
            video_pause: Duration::ZERO,
            image_pause: Duration::ZERO,
        }
    }

    /// The pause used between stages for a media kind.
    pub fn pause_for(&self, kind: MediaKind) -> Duration {
        match kind {
            MediaKind::Video => self.video_pause,
            MediaKind::Image => self.image_pause,
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            video_pause: Duration::from_millis(800),
            image_pause: Duration::from_millis(400),
        }
    }
}
