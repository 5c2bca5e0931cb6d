use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use tokio::sync::{Mutex, Notify, watch};
use tokio::task::JoinHandle;
use uuid::Uuid;

use portage_core::collection;
use portage_core::error::CoreError;
use portage_core::models::Child;
use portage_storage::CollectionStore;

use crate::error::SyncError;
use crate::status::{SyncStatus, WritePhase};

#[derive(Debug, Clone)]
pub struct SyncConfig {
    /// Quiet period after the last edit before the collection is written.
    pub debounce: Duration,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            debounce: Duration::from_millis(1000),
        }
    }
}

struct State {
    loaded: bool,
    /// What the user sees, including optimistic edits.
    local: Vec<Child>,
    /// Last collection known to match the store. Rollback target.
    confirmed: Vec<Child>,
    phase: WritePhase,
    /// `local` holds edits not yet handed to a write.
    dirty: bool,
}

struct Shared {
    store: Arc<dyn CollectionStore>,
    state: Mutex<State>,
    status: watch::Sender<SyncStatus>,
    edited: Notify,
    flush_now: Notify,
    /// A fetch is in progress. Only set or read while `state` is locked.
    loading: AtomicBool,
}

/// Clears `Shared::loading` when a load ends, including when its future is
/// dropped mid-fetch.
struct LoadingGuard<'a>(&'a AtomicBool);

impl Drop for LoadingGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::SeqCst);
    }
}

struct Worker(JoinHandle<()>);

impl Drop for Worker {
    fn drop(&mut self) {
        self.0.abort();
    }
}

/// Reconciles the local patient collection with a [`CollectionStore`].
///
/// Saves are refused until a load has succeeded once. An accepted save
/// replaces the local collection immediately and wakes the writer task, which
/// waits for `debounce` without further edits (each new edit restarts the
/// wait) and then writes the latest collection. At most one write is in
/// flight; edits arriving meanwhile are written after it in the next quiet
/// period. A failed write restores the last confirmed collection and reports
/// [`SyncStatus::SaveFailed`].
///
/// Must be created inside a Tokio runtime. Cloning shares the same state;
/// the writer stops when the last clone is dropped.
#[derive(Clone)]
pub struct SyncController {
    shared: Arc<Shared>,
    _worker: Arc<Worker>,
}

impl SyncController {
    pub fn new(store: Arc<dyn CollectionStore>, config: SyncConfig) -> Self {
        let (status, _) = watch::channel(SyncStatus::NotLoaded);
        let shared = Arc::new(Shared {
            store,
            state: Mutex::new(State {
                loaded: false,
                local: Vec::new(),
                confirmed: Vec::new(),
                phase: WritePhase::Idle,
                dirty: false,
            }),
            status,
            edited: Notify::new(),
            flush_now: Notify::new(),
            loading: AtomicBool::new(false),
        });
        let worker = tokio::spawn(run_writer(shared.clone(), config.debounce));
        Self {
            shared,
            _worker: Arc::new(Worker(worker)),
        }
    }

    /// Fetch the full collection from the store and make it the local state.
    ///
    /// On failure before any successful load the controller stays in the
    /// not-loaded state and keeps refusing saves. Edits are refused while the
    /// fetch is in progress.
    pub async fn load(&self) -> Result<Vec<Child>, SyncError> {
        let _loading = {
            let state = self.shared.state.lock().await;
            if self.shared.loading.load(Ordering::SeqCst) {
                return Err(SyncError::LoadInProgress);
            }
            if state.dirty || state.phase == WritePhase::InFlight {
                return Err(SyncError::UnsyncedChanges);
            }
            self.shared.loading.store(true, Ordering::SeqCst);
            LoadingGuard(&self.shared.loading)
        };

        let fetched = self.shared.store.load().await;

        let mut state = self.shared.state.lock().await;
        self.shared.loading.store(false, Ordering::SeqCst);
        match fetched {
            Ok(children) => {
                state.local = children.clone();
                state.confirmed = children.clone();
                state.loaded = true;
                self.shared.status.send_replace(SyncStatus::Synced);
                tracing::info!(children = children.len(), "collection loaded");
                Ok(children)
            }
            Err(e) => {
                if !state.loaded {
                    self.shared
                        .status
                        .send_replace(SyncStatus::LoadFailed(e.to_string()));
                }
                tracing::warn!(error = %e, "failed to load collection");
                Err(SyncError::LoadFailed(e))
            }
        }
    }

    /// Replace the local collection and schedule a debounced write.
    pub async fn save(&self, children: Vec<Child>) -> Result<(), SyncError> {
        self.apply(move |local| {
            *local = children;
            Ok(())
        })
        .await
    }

    /// Register a new child.
    pub async fn add_child(&self, child: Child) -> Result<(), SyncError> {
        self.apply(move |local| Ok(collection::insert(local, child)?))
            .await
    }

    /// Insert or replace a child by id, e.g. a snapshot emitted by an
    /// assessment session.
    pub async fn update_child(&self, child: Child) -> Result<(), SyncError> {
        self.apply(move |local| {
            collection::upsert(local, child);
            Ok(())
        })
        .await
    }

    /// Delete a child and, with it, all of its assessments.
    pub async fn delete_child(&self, id: Uuid) -> Result<Child, SyncError> {
        let mut removed = None;
        self.apply(|local| {
            removed = Some(collection::remove(local, id)?);
            Ok(())
        })
        .await?;
        removed.ok_or(SyncError::Core(CoreError::ChildNotFound(id)))
    }

    async fn apply<F>(&self, edit: F) -> Result<(), SyncError>
    where
        F: FnOnce(&mut Vec<Child>) -> Result<(), SyncError>,
    {
        let mut state = self.shared.state.lock().await;
        if !state.loaded {
            tracing::warn!("save refused: collection not loaded");
            return Err(SyncError::NotLoaded);
        }
        if self.shared.loading.load(Ordering::SeqCst) {
            tracing::warn!("save refused: collection is being reloaded");
            return Err(SyncError::LoadInProgress);
        }

        let mut next = state.local.clone();
        edit(&mut next)?;
        state.local = next;
        state.dirty = true;
        if state.phase == WritePhase::Idle {
            state.phase = WritePhase::Pending;
            self.shared.status.send_replace(SyncStatus::Pending);
        }
        drop(state);

        self.shared.edited.notify_one();
        Ok(())
    }

    /// Write pending edits now instead of waiting for the quiet period, and
    /// wait for the outcome.
    pub async fn flush(&self) -> Result<(), SyncError> {
        let mut status = self.shared.status.subscribe();
        {
            let state = self.shared.state.lock().await;
            if !state.loaded {
                return Err(SyncError::NotLoaded);
            }
            if !state.dirty && state.phase == WritePhase::Idle {
                return Ok(());
            }
            if state.dirty {
                self.shared.flush_now.notify_one();
            }
        }

        loop {
            {
                let state = self.shared.state.lock().await;
                if !state.dirty && state.phase == WritePhase::Idle {
                    return match &*status.borrow_and_update() {
                        SyncStatus::SaveFailed(message) => {
                            Err(SyncError::SaveFailed(message.clone()))
                        }
                        _ => Ok(()),
                    };
                }
            }
            if status.changed().await.is_err() {
                return Ok(());
            }
        }
    }

    /// The local collection, including edits not yet written.
    pub async fn children(&self) -> Vec<Child> {
        self.shared.state.lock().await.local.clone()
    }

    pub async fn child(&self, id: Uuid) -> Option<Child> {
        collection::find(&self.shared.state.lock().await.local, id).cloned()
    }

    pub async fn is_loaded(&self) -> bool {
        self.shared.state.lock().await.loaded
    }

    pub async fn phase(&self) -> WritePhase {
        self.shared.state.lock().await.phase
    }

    pub fn status(&self) -> SyncStatus {
        self.shared.status.borrow().clone()
    }

    /// Receive every status change, e.g. to surface a retryable save error.
    pub fn subscribe(&self) -> watch::Receiver<SyncStatus> {
        self.shared.status.subscribe()
    }
}

async fn run_writer(shared: Arc<Shared>, debounce: Duration) {
    loop {
        shared.edited.notified().await;

        // Debounce: every new edit restarts the quiet period.
        loop {
            tokio::select! {
                _ = tokio::time::sleep(debounce) => break,
                _ = shared.flush_now.notified() => break,
                _ = shared.edited.notified() => continue,
            }
        }

        write_latest(&shared).await;
    }
}

async fn write_latest(shared: &Shared) {
    let snapshot = {
        let mut state = shared.state.lock().await;
        if !state.dirty {
            if state.phase == WritePhase::Pending {
                state.phase = WritePhase::Idle;
            }
            return;
        }
        state.dirty = false;
        state.phase = WritePhase::InFlight;
        shared.status.send_replace(SyncStatus::Saving);
        state.local.clone()
    };

    let result = shared.store.save(&snapshot).await;

    let mut state = shared.state.lock().await;
    match result {
        Ok(()) => {
            state.confirmed = snapshot;
            if state.dirty {
                state.phase = WritePhase::Pending;
                shared.status.send_replace(SyncStatus::Pending);
            } else {
                state.phase = WritePhase::Idle;
                shared.status.send_replace(SyncStatus::Synced);
            }
            tracing::debug!(children = state.confirmed.len(), "collection written");
        }
        Err(e) => {
            state.local = state.confirmed.clone();
            state.dirty = false;
            state.phase = WritePhase::Idle;
            shared.status.send_replace(SyncStatus::SaveFailed(e.to_string()));
            tracing::warn!(error = %e, "collection write failed, local changes rolled back");
        }
    }
}
