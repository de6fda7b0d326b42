//! Superseding loads
//!
//! A consumer asks for a snapshot ranked from some reference point. When a
//! newer reference point arrives before the previous load has finished,
//! the older load is aborted, and if it still manages to finish its result
//! is thrown away. Consumers only ever see the snapshot for the latest
//! request.

use crate::coord::Coordinates;
use crate::dataset::loader::DatasetLoader;
use crate::dataset::Snapshot;
use crate::error::Error;
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::watch;
use tokio::task::AbortHandle;
use tracing::{debug, warn};

/// Outcome of the latest load request
#[derive(Debug, Clone)]
pub enum LoadStatus {
    /// Nothing requested yet, or the latest request is still running
    Pending,
    Ready(Arc<Snapshot>),
    Failed(Arc<Error>),
}

/// Published state: which request it belongs to and how it went
#[derive(Debug, Clone)]
pub struct LoadState {
    /// Increases by one with every request
    pub generation: u64,
    pub reference: Option<Coordinates>,
    pub status: LoadStatus,
}

impl LoadState {
    pub fn snapshot(&self) -> Option<Arc<Snapshot>> {
        match &self.status {
            LoadStatus::Ready(snapshot) => Some(Arc::clone(snapshot)),
            _ => None,
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self.status, LoadStatus::Pending)
    }
}

#[derive(Debug, Default)]
struct Inflight {
    generation: u64,
    handle: Option<AbortHandle>,
}

/// Runs loads in the background, newest request wins
#[derive(Debug)]
pub struct LoadCoordinator {
    loader: Arc<DatasetLoader>,
    state: Arc<watch::Sender<LoadState>>,
    inflight: Mutex<Inflight>,
}

impl LoadCoordinator {
    pub fn new(loader: DatasetLoader) -> Self {
        let (state, _) = watch::channel(LoadState {
            generation: 0,
            reference: None,
            status: LoadStatus::Pending,
        });

        Self {
            loader: Arc::new(loader),
            state: Arc::new(state),
            inflight: Mutex::new(Inflight::default()),
        }
    }

    pub fn loader(&self) -> &DatasetLoader {
        &self.loader
    }

    /// Start a load ranked from `reference`, superseding any earlier one
    ///
    /// Returns the generation of the new request. Must be called from
    /// within a tokio runtime.
    pub fn request(&self, reference: Option<Coordinates>) -> u64 {
        let mut inflight = self.inflight.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(previous) = inflight.handle.take() {
            if !previous.is_finished() {
                debug!("Aborting load generation {}", inflight.generation);
            }
            previous.abort();
        }

        inflight.generation += 1;
        let generation = inflight.generation;

        self.state.send_replace(LoadState {
            generation,
            reference,
            status: LoadStatus::Pending,
        });

        let loader = Arc::clone(&self.loader);
        let state = Arc::clone(&self.state);
        let task = tokio::spawn(async move {
            let status = match loader.load(reference).await {
                Ok(snapshot) => LoadStatus::Ready(Arc::new(snapshot)),
                Err(e) => {
                    warn!("Load generation {} failed: {}", generation, e);
                    LoadStatus::Failed(Arc::new(e))
                }
            };

            let published = state.send_if_modified(|current| {
                if current.generation != generation {
                    return false;
                }
                current.status = status;
                true
            });

            if !published {
                debug!("Discarding superseded load generation {}", generation);
            }
        });

        inflight.handle = Some(task.abort_handle());
        generation
    }

    /// Latest published state, without waiting
    pub fn current(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Watch state changes
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Wait until the latest request has finished
    ///
    /// If another request arrives while waiting, this keeps waiting for
    /// that one instead.
    pub async fn settled(&self) -> LoadState {
        let mut rx = self.state.subscribe();
        let settled = rx.wait_for(|state| !state.is_pending()).await;
        match settled {
            Ok(state) => state.clone(),
            Err(_) => self.current(),
        }
    }
}

impl Drop for LoadCoordinator {
    fn drop(&mut self) {
        let inflight = self.inflight.get_mut().unwrap_or_else(PoisonError::into_inner);
        if let Some(handle) = inflight.handle.take() {
            handle.abort();
        }
    }
}
