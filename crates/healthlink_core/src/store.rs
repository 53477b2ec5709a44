//! Durable persistence for the session token and user profile.

use healthlink_api::response::User;
use std::{cell::RefCell, collections::HashMap, rc::Rc};

/// Key-value persistence for the session, surviving page reloads.
///
/// The browser implementation lives in the web crate; [`MemoryStore`] backs
/// tests and any non-browser host.
pub trait SessionStore {
    /// Writes a raw value.
    fn set(&self, key: &str, value: &str);
    /// Reads a raw value.
    fn get(&self, key: &str) -> Option<String>;
    /// Removes a raw value. A no-op when the key is absent.
    fn remove(&self, key: &str);

    /// Persists the token and user together.
    ///
    /// The user is written before the token so an interrupted write can
    /// never leave a token behind without matching profile data.
    fn save(&self, token: &str, user: &User) {
        match serde_json::to_string(user) {
            Ok(serialized) => {
                self.set(healthlink_api::USER_STORAGE_KEY, &serialized);
                self.set(healthlink_api::TOKEN_STORAGE_KEY, token);
            }
            Err(err) => {
                tracing::error!("Failed to serialize user for storage: {err}");
                self.clear();
            }
        }
    }

    /// Loads the persisted session, if any.
    ///
    /// Returns the pair only when both keys are present and the user data
    /// parses; anything else is treated as no session and the storage is
    /// cleared defensively.
    fn load(&self) -> Option<(String, User)> {
        let token = self.get(healthlink_api::TOKEN_STORAGE_KEY);
        let user = self.get(healthlink_api::USER_STORAGE_KEY);
        match (token, user) {
            (Some(token), Some(user)) => match serde_json::from_str(&user) {
                Ok(user) => Some((token, user)),
                Err(err) => {
                    tracing::warn!("Discarding corrupt persisted user: {err}");
                    self.clear();
                    None
                }
            },
            (None, None) => None,
            _ => {
                // one key without the other is as good as no session
                self.clear();
                None
            }
        }
    }

    /// Removes both keys. Safe to call when already empty.
    fn clear(&self) {
        self.remove(healthlink_api::TOKEN_STORAGE_KEY);
        self.remove(healthlink_api::USER_STORAGE_KEY);
    }
}

/// In-memory [`SessionStore`] used by tests.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: Rc<RefCell<HashMap<String, String>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.values.borrow().is_empty()
    }
}

impl SessionStore for MemoryStore {
    fn set(&self, key: &str, value: &str) {
        self.values
            .borrow_mut()
            .insert(key.to_string(), value.to_string());
    }

    fn get(&self, key: &str) -> Option<String> {
        self.values.borrow().get(key).cloned()
    }

    fn remove(&self, key: &str) {
        self.values.borrow_mut().remove(key);
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use healthlink_api::response::{Profile, Role};

    fn user() -> User {
        User {
            id: "u1".to_string(),
            email: "a@b.com".to_string(),
            role: Role::Patient,
            profile: Profile {
                first_name: "A".to_string(),
                last_name: "B".to_string(),
                date_of_birth: None,
                phone_number: None,
                bio: None,
                medical_license_number: None,
                specialties: None,
                hospital_affiliations: None,
                average_rating: None,
                num_reviews: None,
                managed_hospital_id: None,
                managed_pharmacy_id: None,
            },
        }
    }

    /// [`SessionStore`] that records the order of its writes.
    #[derive(Default)]
    struct RecordingStore {
        inner: MemoryStore,
        writes: RefCell<Vec<String>>,
    }

    impl SessionStore for RecordingStore {
        fn set(&self, key: &str, value: &str) {
            self.writes.borrow_mut().push(key.to_string());
            self.inner.set(key, value);
        }

        fn get(&self, key: &str) -> Option<String> {
            self.inner.get(key)
        }

        fn remove(&self, key: &str) {
            self.inner.remove(key);
        }
    }

    #[test]
    fn saves_and_loads() {
        let store = MemoryStore::new();
        store.save("t1", &user());
        let (token, loaded) = store.load().unwrap();
        assert_eq!(token, "t1");
        assert_eq!(loaded, user());
    }

    #[test]
    fn save_writes_user_before_token() {
        let store = RecordingStore::default();
        store.save("t1", &user());
        assert_eq!(
            *store.writes.borrow(),
            vec![
                healthlink_api::USER_STORAGE_KEY.to_string(),
                healthlink_api::TOKEN_STORAGE_KEY.to_string(),
            ]
        );
    }

    #[test]
    fn corrupt_user_clears_storage() {
        let store = MemoryStore::new();
        store.set(healthlink_api::TOKEN_STORAGE_KEY, "t1");
        store.set(healthlink_api::USER_STORAGE_KEY, "{not json");
        assert!(store.load().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn token_without_user_clears_storage() {
        let store = MemoryStore::new();
        store.set(healthlink_api::TOKEN_STORAGE_KEY, "t1");
        assert!(store.load().is_none());
        assert!(store.is_empty());
    }

    #[test]
    fn clear_is_idempotent() {
        let store = MemoryStore::new();
        store.clear();
        store.save("t1", &user());
        store.clear();
        store.clear();
        assert!(store.is_empty());
    }
}
