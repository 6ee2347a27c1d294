// Round-robin pool over the currently active API keys.

use crate::error::GenerationError;
use std::sync::{Mutex, PoisonError};
use tracing::info;

#[derive(Debug, Default)]
struct Rotation {
    secrets: Vec<String>,
    // None means "before first": the next acquisition returns index 0.
    cursor: Option<usize>,
}

#[derive(Debug, Default)]
pub struct CredentialPool {
    state: Mutex<Rotation>,
}

impl CredentialPool {
    pub fn new() -> CredentialPool {
        CredentialPool::default()
    }

    /// Replaces the active set. Rotation always restarts, even when the new
    /// list equals the old one.
    pub fn set_active(&self, secrets: Vec<String>) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        info!("Updating active API keys (total: {})", secrets.len());
        state.secrets = secrets;
        state.cursor = None;
    }

    /// Advances the cursor and returns the key under it. The read-modify-write
    /// happens under one lock so concurrent callers never share an index.
    pub fn acquire_next(&self) -> Result<String, GenerationError> {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let total = state.secrets.len();
        if total == 0 {
            return Err(GenerationError::ServiceDisabled);
        }

        let index = state.cursor.map_or(0, |c| (c + 1) % total);
        state.cursor = Some(index);
        info!("Using API key (index: {}, total: {})", index, total);
        Ok(state.secrets[index].clone())
    }

    pub fn active_len(&self) -> usize {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .secrets
            .len()
    }

    pub fn is_disabled(&self) -> bool {
        self.active_len() == 0
    }
}
