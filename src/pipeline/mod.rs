//! Processing pipeline: staged progress, classification, persistence.
//!
//! One classification request is request-scoped and runs to completion or
//! failure; there is no cancellation and no same-item mutual exclusion (the
//! store must serialize writes per record if it needs that guarantee). The
//! pauses between progress writes are cooperative and configurable through
//! [`Pacing`], so tests run the full pipeline with zero wall-clock delay.

pub mod legacy;

use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::time::sleep;
use tracing::{debug, error, info, warn};

use crate::analysis::Analysis;
use crate::config::Pacing;
use crate::provider;
use crate::rating::{ContentRating, SensitivityStatus};
use crate::{Classifier, Error, MediaKind};

/// Lifecycle of a record's classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProcessingStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ProcessingStatus {
    /// Get the string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProcessingStatus::Pending => "pending",
            ProcessingStatus::Processing => "processing",
            ProcessingStatus::Completed => "completed",
            ProcessingStatus::Failed => "failed",
        }
    }
}

/// The pipeline's view of a persisted media item.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaRecord {
    pub id: String,
    pub title: String,
    pub description: String,
    pub filepath: String,
    pub kind: MediaKind,
    pub processing_status: ProcessingStatus,
    pub processing_progress: u8,
    pub content_rating: ContentRating,
    pub sensitivity_status: SensitivityStatus,
    pub moderation_analysis: Option<Analysis>,
}

impl MediaRecord {
    /// A freshly uploaded record, before any classification ran.
    pub fn new(
        id: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        filepath: impl Into<String>,
        kind: MediaKind,
    ) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            description: description.into(),
            filepath: filepath.into(),
            kind,
            processing_status: ProcessingStatus::Pending,
            processing_progress: 0,
            content_rating: ContentRating::Pending,
            sensitivity_status: SensitivityStatus::Pending,
            moderation_analysis: None,
        }
    }
}

/// Persistence seam. The store exclusively owns storage; the pipeline only
/// computes values to be written.
#[async_trait]
pub trait MediaStore: Send + Sync {
    /// Load a record by id; `None` when it does not exist.
    async fn load(&self, id: &str) -> Result<Option<MediaRecord>, Error>;

    /// Persist the record's current state.
    async fn save(&self, record: &MediaRecord) -> Result<(), Error>;
}

/// A named point in the staged progress ramp.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProcessingStage {
    pub name: &'static str,
    pub progress: u8,
}

/// The stages walked for one media kind, split around the classification
/// call. The terminal 100% write happens with the final results.
#[derive(Debug, Clone, Copy)]
pub struct ProcessingPlan {
    pub pre_moderation: &'static [ProcessingStage],
    pub post_moderation: &'static [ProcessingStage],
}

const VIDEO_PLAN: ProcessingPlan = ProcessingPlan {
    pre_moderation: &[
        ProcessingStage { name: "prepare", progress: 20 },
        ProcessingStage { name: "extract-frames", progress: 40 },
    ],
    post_moderation: &[ProcessingStage { name: "moderate", progress: 80 }],
};

const IMAGE_PLAN: ProcessingPlan = ProcessingPlan {
    pre_moderation: &[ProcessingStage { name: "prepare", progress: 25 }],
    post_moderation: &[ProcessingStage { name: "moderate", progress: 75 }],
};

/// The staged plan for a media kind.
pub fn plan_for(kind: MediaKind) -> ProcessingPlan {
    match kind {
        MediaKind::Video => VIDEO_PLAN,
        MediaKind::Image => IMAGE_PLAN,
    }
}

/// Drives classification for stored media records.
pub struct Processor {
    store: Arc<dyn MediaStore>,
    classifier: Classifier,
    pacing: Pacing,
}

impl Processor {
    pub fn new(store: Arc<dyn MediaStore>, classifier: Classifier) -> Self {
        Self {
            store,
            classifier,
            pacing: Pacing::default(),
        }
    }

    /// Override the stage pacing (tests use [`Pacing::instant`]).
    pub fn with_pacing(mut self, pacing: Pacing) -> Self {
        self.pacing = pacing;
        self
    }

    /// Classify one record and persist the outcome.
    ///
    /// Store errors are returned to the caller after a best-effort
    /// compensating write that marks the record failed with its ratings
    /// reset to pending. A partial rating is never persisted: rating fields
    /// are only written in the terminal save.
    pub async fn process(&self, id: &str) -> Result<(), Error> {
        match self.run(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                error!(id, error = %err, "media processing failed");
                self.mark_failed(id).await;
                Err(err)
            }
        }
    }

    async fn run(&self, id: &str) -> Result<(), Error> {
        let mut record = self
            .store
            .load(id)
            .await?
            .ok_or_else(|| Error::NotFound(id.to_string()))?;

        info!(id, title = %record.title, kind = record.kind.as_str(), "starting media processing");

        record.processing_status = ProcessingStatus::Processing;
        record.processing_progress = 0;
        self.store.save(&record).await?;

        let plan = plan_for(record.kind);
        let pause = self.pacing.pause_for(record.kind);

        self.walk_stages(&mut record, plan.pre_moderation, pause).await?;

        let resource_id = provider::resource_id_from_url(&record.filepath);
        let outcome = self
            .classifier
            .classify(
                &record.title,
                &record.description,
                resource_id.as_deref(),
                record.kind,
            )
            .await;

        self.walk_stages(&mut record, plan.post_moderation, pause).await?;

        record.moderation_analysis = Some(outcome.analysis);
        record.content_rating = outcome.content_rating;
        record.sensitivity_status = outcome.sensitivity_status;
        record.processing_status = ProcessingStatus::Completed;
        record.processing_progress = 100;
        self.store.save(&record).await?;

        info!(
            id,
            rating = record.content_rating.as_str(),
            status = record.sensitivity_status.as_str(),
            reason = %outcome.reason,
            "media processing completed"
        );
        Ok(())
    }

    async fn walk_stages(
        &self,
        record: &mut MediaRecord,
        stages: &[ProcessingStage],
        pause: std::time::Duration,
    ) -> Result<(), Error> {
        for stage in stages {
            debug!(id = %record.id, stage = stage.name, progress = stage.progress, "processing stage");
            sleep(pause).await;
            record.processing_progress = stage.progress;
            self.store.save(record).await?;
        }
        Ok(())
    }

    /// Compensating write after a failure. Its own failure is logged only.
    async fn mark_failed(&self, id: &str) {
        let mut record = match self.store.load(id).await {
            Ok(Some(record)) => record,
            Ok(None) => {
                warn!(id, "record vanished before it could be marked failed");
                return;
            }
            Err(err) => {
                warn!(id, error = %err, "could not load record to mark it failed");
                return;
            }
        };

        record.processing_status = ProcessingStatus::Failed;
        record.processing_progress = 0;
        record.content_rating = ContentRating::Pending;
        record.sensitivity_status = SensitivityStatus::Pending;

        if let Err(err) = self.store.save(&record).await {
            warn!(id, error = %err, "failed to persist the failure state");
        }
    }
}
