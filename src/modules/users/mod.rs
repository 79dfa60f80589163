//! User lookup used during authentication.
//!
//! Users are managed elsewhere; this service only ever resolves a decoded
//! token's user id to an existing user.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: i64,
    pub name: String,
}

/// Lookup seam over the external user system.
#[async_trait]
pub trait UserDirectory: Send + Sync {
    async fn find(&self, id: i64) -> Option<User>;
}

/// In-memory directory; populated by seeding or tests.
#[derive(Default)]
pub struct MemoryDirectory {
    inner: Mutex<HashMap<i64, User>>,
}

impl MemoryDirectory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&self, user: User) {
        self.inner
            .lock()
            .expect("directory lock poisoned")
            .insert(user.id, user);
    }
}

#[async_trait]
impl UserDirectory for MemoryDirectory {
    async fn find(&self, id: i64) -> Option<User> {
        self.inner
            .lock()
            .expect("directory lock poisoned")
            .get(&id)
            .cloned()
    }
}
