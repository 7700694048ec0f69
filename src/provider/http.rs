//! HTTP client for the asset CDN's admin API.
//!
//! The CDN records moderation scans alongside each uploaded resource; the
//! admin endpoint returns them as `moderation[].response.moderation_labels`.
//! This client fetches that document and flattens it into
//! [`ModerationScan`]s. Transport and decode failures surface as errors and
//! are recovered by the analysis orchestrator.

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::provider::{ModerationProvider, ModerationScan, ProviderLabel};
use crate::{Error, MediaKind};

/// Connection settings for the admin API.
#[derive(Debug, Clone)]
pub struct HttpProviderConfig {
    /// Account-scoped API root, e.g. `https://api.cdn.example.com/v1_1/acme`.
    pub base_url: String,
    pub api_key: String,
    pub api_secret: String,
    pub timeout: Duration,
}

impl HttpProviderConfig {
    pub fn new(base_url: impl Into<String>, api_key: impl Into<String>, api_secret: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            api_key: api_key.into(),
            api_secret: api_secret.into(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// [`ModerationProvider`] backed by the admin API.
pub struct HttpModerationProvider {
    client: reqwest::Client,
    config: HttpProviderConfig,
}

impl HttpModerationProvider {
    pub fn new(config: HttpProviderConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder().timeout(config.timeout).build()?;
        Ok(Self { client, config })
    }

    fn resource_url(&self, resource_id: &str, kind: MediaKind) -> String {
        format!(
            "{}/resources/{}/upload/{}",
            self.config.base_url.trim_end_matches('/'),
            kind.as_str(),
            resource_id
        )
    }
}

#[async_trait]
impl ModerationProvider for HttpModerationProvider {
    async fn labels(&self, resource_id: &str, kind: MediaKind) -> Result<Vec<ModerationScan>, Error> {
        let url = self.resource_url(resource_id, kind);
        let response = self
            .client
            .get(&url)
            .basic_auth(&self.config.api_key, Some(&self.config.api_secret))
            .query(&[("moderation_status", "true")])
            .send()
            .await?
            .error_for_status()?;

        let info: ResourceInfo = response.json().await?;
        Ok(scans_from(info))
    }
}

#[derive(Debug, Deserialize)]
struct ResourceInfo {
    #[serde(default)]
    moderation: Vec<RawScan>,
}

#[derive(Debug, Deserialize)]
struct RawScan {
    kind: String,
    #[serde(default)]
    response: Option<RawScanResponse>,
}

#[derive(Debug, Deserialize)]
struct RawScanResponse {
    #[serde(default)]
    moderation_labels: Vec<RawLabel>,
}

#[derive(Debug, Deserialize)]
struct RawLabel {
    name: Option<String>,
    #[serde(default)]
    confidence: f32,
}

/// Flatten the admin document. Scans without a response body yield no
/// labels; labels without a name are dropped.
fn scans_from(info: ResourceInfo) -> Vec<ModerationScan> {
    info.moderation
        .into_iter()
        .map(|scan| ModerationScan {
            kind: scan.kind,
            labels: scan
                .response
                .map(|response| response.moderation_labels)
                .unwrap_or_default()
                .into_iter()
                .filter_map(|label| {
                    label.name.map(|name| ProviderLabel {
                        name,
                        confidence: label.confidence,
                    })
                })
                .collect(),
        })
        .collect()
}
