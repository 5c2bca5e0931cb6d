use serde::Serialize;

/// State of the single write slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum WritePhase {
    /// Nothing waiting to be written.
    Idle,
    /// Local edits waiting out the debounce period.
    Pending,
    /// A write is on its way to the store.
    InFlight,
}

/// User-visible synchronisation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "state", content = "message", rename_all = "snake_case")]
pub enum SyncStatus {
    /// No successful load yet; saves are refused.
    NotLoaded,
    /// The initial load failed; saves are refused until a load succeeds.
    LoadFailed(String),
    /// Local state matches the store.
    Synced,
    /// Edits are waiting for the debounce period to end.
    Pending,
    /// A write is in flight.
    Saving,
    /// The last write failed and local state was rolled back. Retryable.
    SaveFailed(String),
}

impl SyncStatus {
    pub fn is_error(&self) -> bool {
        matches!(self, SyncStatus::LoadFailed(_) | SyncStatus::SaveFailed(_))
    }
}
