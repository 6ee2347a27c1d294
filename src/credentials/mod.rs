mod pool;
mod settings;

pub use pool::CredentialPool;
pub use settings::{Credential, CredentialId, CredentialSettings};

use serde_json::Value;
use std::sync::{Arc, PoisonError, RwLock};
use tracing::info;

/// Owns the credential settings and keeps the pool in lockstep with them.
#[derive(Debug)]
pub struct CredentialStore {
    process_key: String,
    settings: RwLock<CredentialSettings>,
    pool: Arc<CredentialPool>,
}

impl CredentialStore {
    pub fn new(process_key: impl Into<String>) -> CredentialStore {
        let process_key = process_key.into();
        let settings = CredentialSettings::initial(&process_key);
        CredentialStore::with_settings(process_key, settings)
    }

    /// Restores settings persisted by an earlier session.
    pub fn restore(process_key: impl Into<String>, saved: &Value) -> CredentialStore {
        let process_key = process_key.into();
        let settings = CredentialSettings::merge_saved(&process_key, saved);
        CredentialStore::with_settings(process_key, settings)
    }

    fn with_settings(process_key: String, settings: CredentialSettings) -> CredentialStore {
        let pool = Arc::new(CredentialPool::new());
        pool.set_active(settings.active_secrets());
        CredentialStore {
            process_key,
            settings: RwLock::new(settings),
            pool,
        }
    }

    pub fn pool(&self) -> Arc<CredentialPool> {
        self.pool.clone()
    }

    pub fn settings(&self) -> CredentialSettings {
        self.settings
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Replaces the settings. Secrets sent back masked are restored from the
    /// stored ones, and the pool is updated before the write lock is released,
    /// so no acquisition can observe the old active set afterwards.
    pub fn save(&self, mut settings: CredentialSettings) -> CredentialSettings {
        let mut guard = self
            .settings
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        settings.unmask_from(&guard);
        settings.pin_default_secret(&self.process_key);
        self.pool.set_active(settings.active_secrets());
        *guard = settings.clone();
        info!(
            "API settings saved (master enabled = {})",
            settings.default.enabled
        );
        settings
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use serde_json::json;

    #[test]
    fn new_store_activates_process_key() {
        let store = CredentialStore::new("k1");
        assert_eq!(store.pool().acquire_next().unwrap(), "k1");
    }

    #[test]
    fn save_resyncs_pool_immediately() {
        let store = CredentialStore::new("k1");
        let pool = store.pool();

        let mut s = store.settings();
        s.api1.enabled = true;
        s.api1.secret = "k2".into();
        store.save(s);

        assert_eq!(pool.acquire_next().unwrap(), "k1");
        assert_eq!(pool.acquire_next().unwrap(), "k2");

        let mut s = store.settings();
        s.default.enabled = false;
        store.save(s);
        assert_eq!(
            pool.acquire_next().unwrap_err().kind(),
            ErrorKind::ServiceDisabled
        );
    }

    #[test]
    fn save_ignores_user_supplied_default_secret() {
        let store = CredentialStore::new("k1");
        let mut s = store.settings();
        s.default.secret = "typed-by-user".into();
        let saved = store.save(s);
        assert_eq!(saved.default.secret, "k1");
        assert_eq!(store.settings().default.secret, "k1");
    }

    #[test]
    fn user_keys_rotate_without_process_key() {
        let store = CredentialStore::new("");
        assert!(store.pool().is_disabled());

        let mut s = store.settings();
        s.api1.enabled = true;
        s.api1.secret = "user-1".into();
        let saved = store.save(s);

        assert!(saved.default.enabled);
        assert_eq!(saved.default.secret, "");
        let pool = store.pool();
        assert_eq!(pool.active_len(), 1);
        assert_eq!(pool.acquire_next().unwrap(), "user-1");
        assert_eq!(pool.acquire_next().unwrap(), "user-1");
    }

    #[test]
    fn save_restores_masked_secrets_under_the_lock() {
        let store = CredentialStore::new("k1");
        let mut s = store.settings();
        s.api2.enabled = true;
        s.api2.secret = "user-secret-2".into();
        let masked = store.save(s).masked();

        let saved = store.save(masked);
        assert_eq!(saved.api2.secret, "user-secret-2");
        assert_eq!(store.pool().active_len(), 2);
    }

    #[test]
    fn restore_merges_saved_slots() {
        let saved = json!({ "api3": { "key": "k3", "enabled": true } });
        let store = CredentialStore::restore("k1", &saved);
        let pool = store.pool();
        assert_eq!(pool.active_len(), 2);
        assert_eq!(pool.acquire_next().unwrap(), "k1");
        assert_eq!(pool.acquire_next().unwrap(), "k3");
    }
}
