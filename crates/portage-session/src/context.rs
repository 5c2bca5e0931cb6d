use std::sync::Arc;

use crate::error::SessionError;
use crate::identity::{Identity, IdentityProvider};
use crate::preferences::{LAST_RESPONDENT, LAST_ROLE, PreferenceStore};

/// Who is operating the current editing session.
///
/// Seeded from the preference store, completed on demand through the
/// identity provider, and written back to the store whenever it changes.
pub struct SessionContext {
    respondent: Option<String>,
    role: Option<String>,
    identity: Arc<dyn IdentityProvider>,
    preferences: Arc<dyn PreferenceStore>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl SessionContext {
    pub fn new(identity: Arc<dyn IdentityProvider>, preferences: Arc<dyn PreferenceStore>) -> Self {
        Self {
            respondent: non_blank(preferences.get(LAST_RESPONDENT)),
            role: non_blank(preferences.get(LAST_ROLE)),
            identity,
            preferences,
        }
    }

    pub fn respondent(&self) -> Option<&str> {
        self.respondent.as_deref()
    }

    pub fn role(&self) -> Option<&str> {
        self.role.as_deref()
    }

    /// Change the current respondent. A blank name clears it, so the next
    /// scoring action prompts again.
    pub fn set_respondent(&mut self, name: &str) {
        self.respondent = non_blank(Some(name.to_string()));
        if let Some(name) = &self.respondent {
            remember(self.preferences.as_ref(), LAST_RESPONDENT, name);
        }
    }

    pub fn set_role(&mut self, role: &str) {
        self.role = non_blank(Some(role.to_string()));
        if let Some(role) = &self.role {
            remember(self.preferences.as_ref(), LAST_ROLE, role);
        }
    }

    /// The current respondent, prompting through the identity provider when
    /// there is none. Declining leaves the context unchanged.
    pub fn resolve_respondent(&mut self) -> Result<String, SessionError> {
        if let Some(name) = &self.respondent {
            return Ok(name.clone());
        }
        match self.identity.resolve() {
            Identity::Provided(name) if !name.trim().is_empty() => {
                self.set_respondent(&name);
                Ok(name.trim().to_string())
            }
            _ => {
                tracing::debug!("respondent identification declined");
                Err(SessionError::IdentityMissing)
            }
        }
    }
}

fn remember(store: &dyn PreferenceStore, key: &str, value: &str) {
    if let Err(e) = store.set(key, value) {
        tracing::warn!(error = %e, key, "failed to remember session preference");
    }
}
