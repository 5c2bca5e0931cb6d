/// Outcome of asking the user who is recording a response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Identity {
    Provided(String),
    Declined,
}

/// Synchronous source of a respondent name, consulted only when the session
/// has none. A blank name counts as declined.
pub trait IdentityProvider: Send + Sync {
    fn resolve(&self) -> Identity;
}

impl<F> IdentityProvider for F
where
    F: Fn() -> Identity + Send + Sync,
{
    fn resolve(&self) -> Identity {
        self()
    }
}

/// Provider for contexts with no interactive user: always declines.
pub struct NoPrompt;

impl IdentityProvider for NoPrompt {
    fn resolve(&self) -> Identity {
        Identity::Declined
    }
}
