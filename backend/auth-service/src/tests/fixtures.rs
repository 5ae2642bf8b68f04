/// Test fixtures and in-memory collaborators for orchestrator tests
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use token_codec::TokenCodec;

use crate::db::CredentialStore;
use crate::error::AuthResult;
use crate::models::User;
use crate::security::Argon2Hasher;
use crate::services::AuthService;
use crate::store::SessionStore;

/// Standard test identity (the worked scenario from the design notes)
pub const TEST_ID: &str = "alice01";
pub const TEST_EMAIL: &str = "a@x.com";
pub const TEST_PASSWORD: &str = "Abcd1234!";

/// Alternative identity for duplicate checks
pub const TEST_ID_2: &str = "bob0234";
pub const TEST_EMAIL_2: &str = "b@x.com";

pub const TEST_SECRET: &str = "test-signing-secret-0123456789abcdef";

/// In-memory credential store
pub struct MemoryCredentialStore {
    users: Mutex<HashMap<String, User>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(HashMap::new()),
        }
    }

    pub fn user_count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn exists_by_id(&self, id: &str) -> AuthResult<bool> {
        Ok(self.users.lock().unwrap().contains_key(id))
    }

    async fn exists_by_email(&self, email: &str) -> AuthResult<bool> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .values()
            .any(|u| u.email == email))
    }

    async fn find_by_id(&self, id: &str) -> AuthResult<Option<User>> {
        Ok(self.users.lock().unwrap().get(id).cloned())
    }

    async fn save(&self, user: &User) -> AuthResult<User> {
        self.users
            .lock()
            .unwrap()
            .insert(user.id.clone(), user.clone());
        Ok(user.clone())
    }
}

/// In-memory session store with per-key deadlines
pub struct MemorySessionStore {
    entries: Mutex<HashMap<String, (String, Instant)>>,
}

impl MemorySessionStore {
    pub fn new() -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Keys with an unexpired entry, for asserting on store contents
    pub fn live_keys(&self) -> Vec<String> {
        let now = Instant::now();
        self.entries
            .lock()
            .unwrap()
            .iter()
            .filter(|(_, (_, deadline))| *deadline > now)
            .map(|(key, _)| key.clone())
            .collect()
    }
}

#[async_trait]
impl SessionStore for MemorySessionStore {
    async fn put(&self, key: &str, value: &str, ttl_millis: i64) -> AuthResult<()> {
        let deadline = Instant::now() + Duration::from_millis(ttl_millis.max(0) as u64);
        self.entries
            .lock()
            .unwrap()
            .insert(key.to_owned(), (value.to_owned(), deadline));
        Ok(())
    }

    async fn get(&self, key: &str) -> AuthResult<Option<String>> {
        let mut entries = self.entries.lock().unwrap();
        match entries.get(key) {
            Some((value, deadline)) if *deadline > Instant::now() => Ok(Some(value.clone())),
            Some(_) => {
                entries.remove(key);
                Ok(None)
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, key: &str) -> AuthResult<()> {
        self.entries.lock().unwrap().remove(key);
        Ok(())
    }
}

/// An orchestrator wired to in-memory collaborators, with handles kept so
/// tests can inspect store contents directly.
pub struct TestHarness {
    pub users: Arc<MemoryCredentialStore>,
    pub sessions: Arc<MemorySessionStore>,
    pub codec: TokenCodec,
    pub service: AuthService,
}

pub fn test_codec() -> TokenCodec {
    TokenCodec::new(TEST_SECRET, 1800, 60 * 60 * 24 * 7)
}

/// Harness with the standard codec (30 min access / 7 day refresh)
pub fn test_service() -> TestHarness {
    harness_with_codec(test_codec())
}

pub fn harness_with_codec(codec: TokenCodec) -> TestHarness {
    let users = Arc::new(MemoryCredentialStore::new());
    let sessions = Arc::new(MemorySessionStore::new());
    let service = AuthService::new(
        users.clone(),
        Arc::new(Argon2Hasher),
        codec.clone(),
        sessions.clone(),
    );

    TestHarness {
        users,
        sessions,
        codec,
        service,
    }
}

/// Register and log in the standard test user, returning the token pair.
pub async fn registered_and_logged_in(harness: &TestHarness) -> token_codec::TokenPair {
    harness
        .service
        .register(TEST_ID, TEST_EMAIL, TEST_PASSWORD)
        .await
        .expect("registration should succeed");

    harness
        .service
        .login(TEST_ID, TEST_PASSWORD)
        .await
        .expect("login should succeed")
}
