use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("duplicate question id: {0}")]
    DuplicateQuestion(String),

    #[error("question '{question_id}' belongs to undeclared area '{area}'")]
    UndeclaredArea { question_id: String, area: String },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScoringError {
    #[error("no respondent identity available for this scoring action")]
    IdentityMissing,

    #[error("no response recorded for question: {0}")]
    NotRecorded(String),
}
