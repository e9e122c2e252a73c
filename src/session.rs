use std::cell::RefCell;

/// Where the bearer credential is persisted between page loads.
pub trait CredentialStorage {
    fn load(&self, key: &str) -> Option<String>;
    fn store(&self, key: &str, value: &str);
    fn remove(&self, key: &str);
}

#[derive(Debug, Default)]
pub struct MemoryStorage {
    value: RefCell<Option<(String, String)>>,
}

impl CredentialStorage for MemoryStorage {
    fn load(&self, key: &str) -> Option<String> {
        self.value
            .borrow()
            .as_ref()
            .filter(|(stored_key, _)| stored_key == key)
            .map(|(_, value)| value.clone())
    }

    fn store(&self, key: &str, value: &str) {
        *self.value.borrow_mut() = Some((key.to_string(), value.to_string()));
    }

    fn remove(&self, key: &str) {
        let mut slot = self.value.borrow_mut();
        if slot.as_ref().is_some_and(|(stored_key, _)| stored_key == key) {
            *slot = None;
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use browser::LocalStorage;

#[cfg(target_arch = "wasm32")]
mod browser {
    use super::CredentialStorage;

    /// `window.localStorage`. Storage failures are logged and treated as absent.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct LocalStorage;

    impl LocalStorage {
        fn storage() -> Option<web_sys::Storage> {
            let window = web_sys::window()?;
            match window.local_storage() {
                Ok(storage) => storage,
                Err(_) => {
                    log::warn!("local storage is unavailable");
                    None
                }
            }
        }
    }

    impl CredentialStorage for LocalStorage {
        fn load(&self, key: &str) -> Option<String> {
            Self::storage()?.get_item(key).ok()?
        }

        fn store(&self, key: &str, value: &str) {
            let Some(storage) = Self::storage() else {
                return;
            };
            if storage.set_item(key, value).is_err() {
                log::warn!("failed to persist credential under {key}");
            }
        }

        fn remove(&self, key: &str) {
            if let Some(storage) = Self::storage() {
                let _ = storage.remove_item(key);
            }
        }
    }
}

/// Process-wide session context. Only login and logout write to it.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    key: String,
    credential: RefCell<Option<String>>,
    username: RefCell<Option<String>>,
}

impl<S: CredentialStorage> SessionStore<S> {
    /// Restores a credential persisted by an earlier page load.
    pub fn restore(storage: S, key: impl Into<String>) -> Self {
        let key = key.into();
        let credential = storage.load(&key).filter(|token| !token.is_empty());
        if credential.is_some() {
            log::debug!("restored persisted session");
        }
        Self {
            storage,
            key,
            credential: RefCell::new(credential),
            username: RefCell::new(None),
        }
    }

    pub fn get(&self) -> Option<String> {
        self.credential.borrow().clone()
    }

    pub fn set(&self, credential: &str, username: Option<&str>) {
        self.storage.store(&self.key, credential);
        *self.credential.borrow_mut() = Some(credential.to_string());
        *self.username.borrow_mut() = username.map(str::to_string);
    }

    pub fn clear(&self) {
        self.storage.remove(&self.key);
        self.credential.borrow_mut().take();
        self.username.borrow_mut().take();
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential.borrow().is_some()
    }

    /// Only known for sessions started in this page load; restored sessions
    /// carry the token alone.
    pub fn username(&self) -> Option<String> {
        self.username.borrow().clone()
    }

    pub fn bearer(&self) -> Option<String> {
        self.get().map(|token| format!("Bearer {token}"))
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_restore_reads_persisted_token() {
        let storage = MemoryStorage::default();
        storage.store("token", "abc");
        let session = SessionStore::restore(storage, "token");
        assert!(session.is_authenticated());
        assert_eq!(session.bearer().as_deref(), Some("Bearer abc"));
        assert_eq!(session.username(), None);
    }

    #[test]
    fn test_restore_ignores_other_keys_and_empty_tokens() {
        let storage = MemoryStorage::default();
        storage.store("other", "abc");
        assert!(!SessionStore::restore(storage, "token").is_authenticated());

        let storage = MemoryStorage::default();
        storage.store("token", "");
        assert!(!SessionStore::restore(storage, "token").is_authenticated());
    }

    #[test]
    fn test_set_and_clear_persist() {
        let session = SessionStore::restore(MemoryStorage::default(), "token");
        session.set("xyz", Some("alice"));
        assert_eq!(session.storage().load("token").as_deref(), Some("xyz"));
        assert_eq!(session.username().as_deref(), Some("alice"));

        session.clear();
        assert!(!session.is_authenticated());
        assert_eq!(session.storage().load("token"), None);
        assert_eq!(session.username(), None);
    }
}
