//! Legacy simulated processing path.
//!
//! Predates the rule-based classifier: walks five equal progress steps and
//! draws the sensitivity verdict at random (80% safe). Kept for demo
//! environments that have no classifier configured; nothing selects it by
//! default, and it never touches the analysis or rating fields the real
//! pipeline owns.

use std::sync::Arc;
use std::time::Duration;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::Mutex;
use tokio::time::sleep;
use tracing::{error, info, warn};

use crate::pipeline::{MediaStore, ProcessingStatus};
use crate::rating::SensitivityStatus;
use crate::Error;

const STEPS: u32 = 5;
const SAFE_PROBABILITY: f64 = 0.8;

/// Simulated processor. Explicitly constructed, never the default path.
pub struct LegacyProcessor {
    store: Arc<dyn MediaStore>,
    rng: Mutex<StdRng>,
    pause: Duration,
}

impl LegacyProcessor {
    pub fn new(store: Arc<dyn MediaStore>) -> Self {
        Self {
            store,
            rng: Mutex::new(StdRng::from_entropy()),
            pause: Duration::from_millis(500),
        }
    }

    /// Deterministic draws for tests.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn with_pause(mut self, pause: Duration) -> Self {
        self.pause = pause;
        self
    }

    /// Walk the simulated steps and draw a verdict.
    pub async fn process(&self, id: &str) -> Result<(), Error> {
        match self.run(id).await {
            Ok(()) => Ok(()),
            Err(err) => {
                error!(id, error = %err, "legacy processing failed");
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

        record.processing_status = ProcessingStatus::Processing;
        record.processing_progress = 0;
        self.store.save(&record).await?;

        for step in 1..=STEPS {
            sleep(self.pause).await;
            record.processing_progress = (step * 100 / STEPS) as u8;
            self.store.save(&record).await?;
        }

        let safe = self.rng.lock().await.gen::<f64>() < SAFE_PROBABILITY;
        record.sensitivity_status = if safe {
            SensitivityStatus::Safe
        } else {
            SensitivityStatus::Flagged
        };
        record.processing_status = ProcessingStatus::Completed;
        record.processing_progress = 100;
        self.store.save(&record).await?;

        info!(id, status = record.sensitivity_status.as_str(), "legacy processing completed");
        Ok(())
    }

    async fn mark_failed(&self, id: &str) {
        let loaded = self.store.load(id).await;
        let mut record = match loaded {
            Ok(Some(record)) => record,
            _ => {
                warn!(id, "could not load record to mark it failed");
                return;
            }
        };

        record.processing_status = ProcessingStatus::Failed;
        record.processing_progress = 0;
        if let Err(err) = self.store.save(&record).await {
            warn!(id, error = %err, "failed to persist the failure state");
        }
    }
}
