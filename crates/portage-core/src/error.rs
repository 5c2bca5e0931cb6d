use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("invalid score ordinal: {0} (expected 1, 0.5 or 0)")]
    InvalidScore(f64),

    #[error("child not found: {0}")]
    ChildNotFound(uuid::Uuid),

    #[error("duplicate child id: {0}")]
    DuplicateChild(uuid::Uuid),
}
