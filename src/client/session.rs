//! Bearer token storage for the dashboard session.

use std::sync::{PoisonError, RwLock};

/// Source of the bearer token attached to API calls.
pub trait TokenStore: Send + Sync {
    fn token(&self) -> Option<String>;
    fn set_token(&self, token: String);
    fn clear(&self);
}

/// In-process store, the counterpart of the browser's `token` entry.
#[derive(Debug, Default)]
pub struct MemoryTokenStore {
    token: RwLock<Option<String>>,
}

impl MemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_token(token: impl Into<String>) -> Self {
        Self {
            token: RwLock::new(Some(token.into())),
        }
    }
}

impl TokenStore for MemoryTokenStore {
    fn token(&self) -> Option<String> {
        let guard = self.token.read().unwrap_or_else(PoisonError::into_inner);
        guard.clone().filter(|t| !t.trim().is_empty())
    }

    fn set_token(&self, token: String) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = Some(token);
    }

    fn clear(&self) {
        *self.token.write().unwrap_or_else(PoisonError::into_inner) = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_token_counts_as_missing() {
        let store = MemoryTokenStore::with_token("  ");
        assert_eq!(store.token(), None);
    }

    #[test]
    fn clear_removes_token() {
        let store = MemoryTokenStore::new();
        store.set_token("abc".to_string());
        assert_eq!(store.token().as_deref(), Some("abc"));
        store.clear();
        assert_eq!(store.token(), None);
    }
}
