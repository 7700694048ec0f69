//! External moderation provider integration.
//!
//! An upstream scan service (reached through the asset CDN's admin API)
//! attaches per-label confidences to uploaded media. This module maps those
//! labels onto our categories and merges them into an analysis. Only two
//! scan backends are trusted; anything else is ignored.

mod http;

pub use http::{HttpModerationProvider, HttpProviderConfig};

use async_trait::async_trait;
use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::analysis::{Category, Detection};
use crate::config::Thresholds;
use crate::{Error, MediaKind};

/// Scan backends whose labels we accept.
pub const TRUSTED_KINDS: &[&str] = &["aws_rek", "google_video_intelligence"];

/// Categories the provider can supply. Horror is ours alone.
pub const EXTERNAL_CATEGORIES: [Category; 5] = [
    Category::Nudity,
    Category::Violence,
    Category::Gore,
    Category::Drugs,
    Category::Weapons,
];

/// One label from a scan backend. Confidence arrives on a 0-100 scale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProviderLabel {
    pub name: String,
    pub confidence: f32,
}

/// The labels one scan backend produced for a resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModerationScan {
    pub kind: String,
    pub labels: Vec<ProviderLabel>,
}

/// Source of moderation labels for uploaded resources.
#[async_trait]
pub trait ModerationProvider: Send + Sync {
    /// Fetch all scans recorded for a resource.
    async fn labels(&self, resource_id: &str, kind: MediaKind) -> Result<Vec<ModerationScan>, Error>;
}

/// Which categories a label name speaks to. Substring rules; one label can
/// feed several categories ("graphic_violence" hits both violence and gore).
fn categories_for(label_name: &str) -> Vec<Category> {
    let name = label_name.to_lowercase();
    let mut categories = Vec::new();

    if name.contains("nudity") || name.contains("explicit") {
        categories.push(Category::Nudity);
    }
    if name.contains("violence") || name.contains("graphic") {
        categories.push(Category::Violence);
    }
    if name.contains("gore") || name.contains("graphic_violence") {
        categories.push(Category::Gore);
    }
    if name.contains("drug") || name.contains("tobacco") {
        categories.push(Category::Drugs);
    }
    if name.contains("weapon") || name.contains("gun") || name.contains("knife") {
        categories.push(Category::Weapons);
    }

    categories
}

/// Reduce a set of scans to at most one detection per external category,
/// keeping the highest-confidence label for each. Untrusted scan kinds are
/// skipped entirely.
pub fn external_detections(
    scans: &[ModerationScan],
    thresholds: &Thresholds,
) -> Vec<(Category, Detection)> {
    let mut detections = Vec::new();

    for category in EXTERNAL_CATEGORIES {
        let mut best: Option<f32> = None;

        for scan in scans {
            if !TRUSTED_KINDS.contains(&scan.kind.as_str()) {
                continue;
            }
            for label in &scan.labels {
                if !categories_for(&label.name).contains(&category) {
                    continue;
                }
                let confidence = label.confidence / 100.0;
                if best.map_or(true, |current| confidence > current) {
                    best = Some(confidence);
                }
            }
        }

        if let Some(confidence) = best {
            let detection = Detection::scored(confidence, thresholds.for_category(category));
            detections.push((category, detection));
        }
    }

    detections
}

static VERSIONED_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)/v\d+/(.+?)(?:\.[a-z]+)?$").unwrap());

/// Extract the provider-side resource identifier from a versioned delivery
/// URL (`.../v1712345/folder/name.jpg` -> `folder/name`). Returns `None`
/// when the path does not look like one, which disables the provider pass.
pub fn resource_id_from_url(url: &str) -> Option<String> {
    VERSIONED_URL
        .captures(url)
        .and_then(|captures| captures.get(1))
        .map(|id| id.as_str().to_string())
}
