use thiserror::Error;
use uuid::Uuid;

use portage_instruments::error::ScoringError;

#[derive(Debug, Error)]
pub enum SessionError {
    #[error("no respondent identity available; scoring action abandoned")]
    IdentityMissing,

    #[error("cannot finalize assessment: {0}")]
    FinalizeRejected(String),

    #[error("assessment {assessment_id} not found for child {child_id}")]
    AssessmentNotFound { child_id: Uuid, assessment_id: Uuid },

    #[error("unknown question: {0}")]
    UnknownQuestion(String),

    #[error("no response recorded for question: {0}")]
    NotRecorded(String),

    #[error("no config directory found")]
    NoConfigDir,

    #[error("preferences io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("preferences serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<ScoringError> for SessionError {
    fn from(e: ScoringError) -> Self {
        match e {
            ScoringError::IdentityMissing => SessionError::IdentityMissing,
            ScoringError::NotRecorded(id) => SessionError::NotRecorded(id),
        }
    }
}
