use serde::{Deserialize, Serialize};

use super::traits::ContentProvider;

/// Monotonically increasing session identifier, assigned at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    pub fn new(value: u64) -> Self {
        Self(value)
    }

    pub fn get(&self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A live presentation: one root content provider plus its identity.
///
/// Only [`super::SessionController`] constructs and dismisses sessions.
pub struct Session {
    id: SessionId,
    provider: Box<dyn ContentProvider>,
    live: bool,
    created_at: String,
}

impl Session {
    pub(crate) fn new(id: SessionId, provider: Box<dyn ContentProvider>) -> Self {
        Self {
            id,
            provider,
            live: true,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn provider(&self) -> &dyn ContentProvider {
        self.provider.as_ref()
    }

    pub fn is_live(&self) -> bool {
        self.live
    }

    pub fn created_at(&self) -> &str {
        &self.created_at
    }

    /// Release the provider and mark the session dead. Idempotent.
    pub(crate) fn dismiss(&mut self) {
        if !self.live {
            return;
        }
        self.provider.dismiss();
        self.live = false;
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            provider: self.provider.describe(),
            widgets: self.provider.widget_ids(),
            live: self.live,
            created_at: self.created_at.clone(),
        }
    }
}

impl std::fmt::Debug for Session {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Session")
            .field("id", &self.id)
            .field("provider", &self.provider.describe())
            .field("live", &self.live)
            .field("created_at", &self.created_at)
            .finish()
    }
}

/// Owned, serializable view of a session for logs and status output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    pub provider: String,
    pub widgets: Vec<String>,
    pub live: bool,
    pub created_at: String,
}
