use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum NarrativeError {
    #[error("template parse error: {0}")]
    TemplateParse(String),

    #[error("template rendering failed: {0}")]
    TemplateRender(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("narrative generation failed: {0}")]
    Generation(String),

    #[error("assessment {assessment_id} not found for child {child_id}")]
    AssessmentNotFound { child_id: Uuid, assessment_id: Uuid },
}

impl From<tera::Error> for NarrativeError {
    fn from(e: tera::Error) -> Self {
        NarrativeError::TemplateRender(e.to_string())
    }
}
