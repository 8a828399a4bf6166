//! Session store.
//!
//! Owns the current user and is the only writer of the durable token/user keys.
//! Other components read the token through [`TokenSource`].

use crate::{ApiError, ApiResult, STORAGE_TOKEN_KEY, STORAGE_USER_KEY, User};
use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

// =========================================================
// Storage seam
// =========================================================

/// Durable string key/value storage (browser `localStorage` in production).
///
/// Writes report success as `bool`; storage failures are never fatal to the caller.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&self, key: &str, value: &str) -> bool;
    fn delete(&self, key: &str) -> bool;
    fn clear(&self) -> bool;
}

/// Read-only view used by the HTTP wrapper to attach credentials.
pub trait TokenSource {
    fn bearer_token(&self) -> Option<String>;
}

impl<S: KeyValueStore + ?Sized> TokenSource for S {
    fn bearer_token(&self) -> Option<String> {
        self.get(STORAGE_TOKEN_KEY).filter(|t| !t.is_empty())
    }
}

/// In-process storage. Clones share the same map.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    inner: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.inner.borrow().len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.borrow().is_empty()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key).cloned()
    }

    fn set(&self, key: &str, value: &str) -> bool {
        self.inner
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
        true
    }

    fn delete(&self, key: &str) -> bool {
        self.inner.borrow_mut().remove(key);
        true
    }

    fn clear(&self) -> bool {
        self.inner.borrow_mut().clear();
        true
    }
}

// =========================================================
// Session
// =========================================================

/// The client-local view of who is signed in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    pub user: Option<User>,
}

impl Session {
    pub fn is_authenticated(&self) -> bool {
        self.user.is_some()
    }
}

#[derive(Debug, Clone)]
pub struct SessionStore<S> {
    storage: S,
    session: Session,
}

impl<S: KeyValueStore> SessionStore<S> {
    /// Builds the store from whatever durable storage holds.
    ///
    /// A missing, `null` or unparseable user record yields a logged-out session.
    pub fn rehydrate(storage: S) -> Self {
        let user = storage
            .get(STORAGE_USER_KEY)
            .and_then(|raw| match serde_json::from_str::<Option<User>>(&raw) {
                Ok(user) => user,
                Err(e) => {
                    log::warn!("ignoring stored user record: {}", e);
                    None
                }
            });

        Self {
            storage,
            session: Session { user },
        }
    }

    /// Persists the token and user record, then marks the session signed in.
    ///
    /// Both keys are written or neither is. On a failed write the partial record
    /// is removed and the session is left signed out.
    pub fn login(&mut self, token: &str, user: User) -> ApiResult<()> {
        let persisted = serde_json::to_string(&user)
            .map_err(ApiError::from)
            .and_then(|json| {
                if self.storage.set(STORAGE_TOKEN_KEY, token)
                    && self.storage.set(STORAGE_USER_KEY, &json)
                {
                    Ok(())
                } else {
                    Err(ApiError::storage("session keys could not be written"))
                }
            });

        if let Err(e) = persisted {
            let e = e.in_op_with("session.login", &user.email);
            log::error!("{}", e);
            self.remove_session_keys();
            self.session.user = None;
            return Err(e);
        }

        log::info!("signed in as {} ({})", user.email, user.role);
        self.session.user = Some(user);
        Ok(())
    }

    pub fn logout(&mut self) {
        if !self.storage.clear() {
            self.remove_session_keys();
        }
        self.session.user = None;
        log::info!("signed out");
    }

    fn remove_session_keys(&self) {
        self.storage.delete(STORAGE_TOKEN_KEY);
        self.storage.delete(STORAGE_USER_KEY);
    }

    pub fn current_user(&self) -> Option<&User> {
        self.session.user.as_ref()
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Role;

    fn student() -> User {
        User {
            id: 1,
            email: "a@b.com".to_string(),
            role: Role::Student,
        }
    }

    #[test]
    fn login_then_logout() {
        let storage = MemoryStore::new();
        let mut store = SessionStore::rehydrate(storage.clone());
        assert_eq!(store.current_user(), None);

        store.login("t1", student()).unwrap();
        assert_eq!(store.current_user(), Some(&student()));
        assert_eq!(storage.get(STORAGE_TOKEN_KEY).as_deref(), Some("t1"));
        assert_eq!(storage.bearer_token().as_deref(), Some("t1"));

        store.logout();
        assert_eq!(store.current_user(), None);
        assert!(storage.is_empty());
        assert_eq!(storage.bearer_token(), None);
    }

    #[test]
    fn logout_clears_every_key() {
        let storage = MemoryStore::new();
        storage.set("unrelated", "x");
        let mut store = SessionStore::rehydrate(storage.clone());
        store.login("t1", student()).unwrap();
        store.logout();
        assert!(storage.is_empty());
    }

    #[test]
    fn rehydrates_previous_login() {
        let storage = MemoryStore::new();
        SessionStore::rehydrate(storage.clone())
            .login("t1", student())
            .unwrap();

        let store = SessionStore::rehydrate(storage);
        assert_eq!(store.current_user(), Some(&student()));
        assert!(store.session().is_authenticated());
    }

    #[test]
    fn invalid_user_record_rehydrates_as_logged_out() {
        for raw in ["{not json", "null", "", r#"{"id":1}"#, r#"{"id":1,"email":"x","role":"ROOT"}"#] {
            let storage = MemoryStore::new();
            storage.set(STORAGE_USER_KEY, raw);
            storage.set(STORAGE_TOKEN_KEY, "t1");

            let store = SessionStore::rehydrate(storage);
            assert_eq!(store.current_user(), None, "raw: {:?}", raw);
        }
    }

    /// Refuses writes to the listed keys; deletes always succeed.
    #[derive(Clone, Default)]
    struct RefusingStore {
        inner: MemoryStore,
        refused: Vec<&'static str>,
    }

    impl KeyValueStore for RefusingStore {
        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn set(&self, key: &str, value: &str) -> bool {
            !self.refused.contains(&key) && self.inner.set(key, value)
        }

        fn delete(&self, key: &str) -> bool {
            self.inner.delete(key)
        }

        fn clear(&self) -> bool {
            false
        }
    }

    #[test]
    fn login_fails_when_storage_refuses_the_token() {
        let storage = RefusingStore {
            refused: vec![STORAGE_TOKEN_KEY, STORAGE_USER_KEY],
            ..Default::default()
        };
        let mut store = SessionStore::rehydrate(storage.clone());

        let err = store.login("t1", student()).unwrap_err();
        assert_eq!(err.kind, crate::ApiErrorKind::Storage);
        assert_eq!(store.current_user(), None);
        assert_eq!(storage.bearer_token(), None);
    }

    #[test]
    fn failed_user_write_rolls_back_the_token() {
        let storage = RefusingStore {
            refused: vec![STORAGE_USER_KEY],
            ..Default::default()
        };
        let mut store = SessionStore::rehydrate(storage.clone());

        assert!(store.login("t1", student()).is_err());
        assert_eq!(store.current_user(), None);
        assert_eq!(storage.bearer_token(), None);
        assert!(storage.inner.is_empty());
    }

    #[test]
    fn logout_falls_back_to_deleting_session_keys() {
        let storage = RefusingStore::default();
        let mut store = SessionStore::rehydrate(storage.clone());
        store.login("t1", student()).unwrap();
        storage.inner.set("unrelated", "x");

        store.logout();
        assert_eq!(store.current_user(), None);
        assert_eq!(storage.bearer_token(), None);
        assert_eq!(storage.get("unrelated").as_deref(), Some("x"));
    }

    #[test]
    fn empty_token_is_not_a_credential() {
        let storage = MemoryStore::new();
        storage.set(STORAGE_TOKEN_KEY, "");
        assert_eq!(storage.bearer_token(), None);
    }
}
