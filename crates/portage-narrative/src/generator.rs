use std::future::Future;
use std::pin::Pin;

use crate::error::NarrativeError;

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Text some providers return in place of a narrative when they fail. A
/// reply equal to it is treated as a failed generation.
pub const FAILURE_SENTINEL: &str = "Automatic analysis could not be generated at this time.";

/// External text generator. Implementations wrap a language-model provider;
/// the prompt comes from [`crate::prompt::build_prompt`].
pub trait NarrativeGenerator: Send + Sync {
    fn generate<'a>(&'a self, prompt: &'a str) -> BoxFuture<'a, Result<String, NarrativeError>>;
}

/// Normalise a generator reply: blank text and the failure sentinel are
/// failures.
pub fn accept_reply(reply: Result<String, NarrativeError>) -> Result<String, NarrativeError> {
    let text = reply?;
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Err(NarrativeError::Generation("empty reply".to_string()));
    }
    if trimmed == FAILURE_SENTINEL {
        return Err(NarrativeError::Generation("generator reported failure".to_string()));
    }
    Ok(text)
}
