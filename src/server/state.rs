//! Server shared state
//!
//! Holds configuration, the current reference point and the load
//! coordinator that keeps the latest snapshot.

use crate::config::Config;
use crate::coord::Coordinates;
use crate::dataset::coordinator::{LoadCoordinator, LoadState, LoadStatus};
use crate::dataset::{DatasetLoader, Snapshot, Source};
use crate::error::Error;
use crate::geo::reference::{fallback, resolve};
use crate::geo::ResolvedReference;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Shared state for the HTTP server
pub struct AppState {
    /// Configuration
    pub config: Config,

    coordinator: LoadCoordinator,

    reference: RwLock<ResolvedReference>,
}

impl AppState {
    /// Create state for the configured dataset and start the first load
    ///
    /// Must be called from within a tokio runtime.
    pub fn new(config: Config) -> Self {
        let source = config.dataset_source();
        Self::with_source(config, source)
    }

    /// Create state for an explicit dataset source
    pub fn with_source(config: Config, source: Source) -> Self {
        let loader = DatasetLoader::new(source, config.display.locale);
        let coordinator = LoadCoordinator::new(loader);

        let reference = fallback(&config.reference, None);
        coordinator.request(Some(reference.point));

        Self {
            config,
            coordinator,
            reference: RwLock::new(reference),
        }
    }

    /// Dataset source the loads read from
    pub fn source(&self) -> &Source {
        self.coordinator.loader().source()
    }

    /// Latest snapshot, waiting for a running load to finish
    pub async fn snapshot(&self) -> Result<Arc<Snapshot>, Arc<Error>> {
        match self.coordinator.settled().await.status {
            LoadStatus::Ready(snapshot) => Ok(snapshot),
            LoadStatus::Failed(err) => Err(err),
            LoadStatus::Pending => Err(Arc::new(Error::Server(
                "Dataset is still loading".to_string(),
            ))),
        }
    }

    /// Load state right now, without waiting
    pub fn load_state(&self) -> LoadState {
        self.coordinator.current()
    }

    /// Current reference point
    pub async fn reference(&self) -> ResolvedReference {
        self.reference.read().await.clone()
    }

    /// Take a new device reading (or the lack of one) and reload
    ///
    /// The reading goes through the region check; the resulting point
    /// supersedes any load still running for the previous one.
    pub async fn update_reference(&self, reading: Option<Coordinates>) -> (ResolvedReference, u64) {
        let reading = reading.ok_or_else(|| {
            Error::GeolocationUnavailable("No location reading provided".to_string())
        });
        let resolved = resolve(reading, &self.config.reference);

        let mut current = self.reference.write().await;
        *current = resolved.clone();
        let generation = self.coordinator.request(Some(resolved.point));

        (resolved, generation)
    }
}
