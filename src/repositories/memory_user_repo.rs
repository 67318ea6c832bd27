//! In-process user store.

use async_trait::async_trait;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::User;
use crate::repositories::UserRepository;

/// User repository that keeps records in a concurrent map.
///
/// Used when `database.backend = "memory"` and by tests. Contents are lost
/// when the process exits.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<DashMap<Uuid, User>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository pre-populated with `users`.
    pub fn with_users(users: impl IntoIterator<Item = User>) -> Self {
        let repo = Self::new();
        for user in users {
            repo.users.insert(user.id, user);
        }
        repo
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_all(&self) -> AppResult<Vec<User>> {
        let mut users: Vec<User> = self.users.iter().map(|entry| entry.value().clone()).collect();
        users.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(users)
    }

    async fn get_by_id(&self, id: Uuid) -> AppResult<Option<User>> {
        Ok(self.users.get(&id).map(|entry| entry.value().clone()))
    }

    async fn create(&self, user: &User) -> AppResult<bool> {
        match self.users.entry(user.id) {
            Entry::Occupied(_) => Ok(false),
            Entry::Vacant(slot) => {
                slot.insert(user.clone());
                Ok(true)
            }
        }
    }

    async fn delete_by_id(&self, id: Uuid) -> AppResult<bool> {
        Ok(self.users.remove(&id).is_some())
    }
}
