use quiz_core::model::{User, UserId};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

/// Errors surfaced by storage adapters.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum StorageError {
    #[error("not found")]
    NotFound,

    #[error("connection error: {0}")]
    Connection(String),
}

/// Repository contract for registered users.
///
/// Listing order is registration order; the leaderboard relies on it to break ties.
pub trait UserRepository: Send + Sync {
    /// Persist or replace a user.
    ///
    /// A user whose id is already registered is replaced in place and keeps its
    /// position in the listing order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the user cannot be stored.
    fn upsert_user(&self, user: &User) -> Result<(), StorageError>;

    /// Fetch a user by ID.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::NotFound` if missing, or other storage errors.
    fn get_user(&self, id: &UserId) -> Result<User, StorageError>;

    /// All users in registration order.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the registry cannot be read.
    fn list_users(&self) -> Result<Vec<User>, StorageError>;
}

#[derive(Default)]
struct UserTable {
    order: Vec<UserId>,
    rows: HashMap<UserId, User>,
}

/// Simple in-memory repository implementation for the console app and tests.
///
/// Clones share the same table.
#[derive(Clone, Default)]
pub struct InMemoryUserRepository {
    users: Arc<Mutex<UserTable>>,
}

impl InMemoryUserRepository {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserRepository for InMemoryUserRepository {
    fn upsert_user(&self, user: &User) -> Result<(), StorageError> {
        let mut guard = self
            .users
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        if guard.rows.insert(user.id().clone(), user.clone()).is_none() {
            guard.order.push(user.id().clone());
        }
        Ok(())
    }

    fn get_user(&self, id: &UserId) -> Result<User, StorageError> {
        let guard = self
            .users
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        guard.rows.get(id).cloned().ok_or(StorageError::NotFound)
    }

    fn list_users(&self) -> Result<Vec<User>, StorageError> {
        let guard = self
            .users
            .lock()
            .map_err(|e| StorageError::Connection(e.to_string()))?;
        Ok(guard
            .order
            .iter()
            .filter_map(|id| guard.rows.get(id).cloned())
            .collect())
    }
}

/// Aggregates repositories behind trait objects for easy backend swapping.
#[derive(Clone)]
pub struct Storage {
    pub users: Arc<dyn UserRepository>,
}

impl Storage {
    #[must_use]
    pub fn in_memory() -> Self {
        let users: Arc<dyn UserRepository> = Arc::new(InMemoryUserRepository::new());
        Self { users }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use quiz_core::time::fixed_now;

    fn build_user(id: &str, name: &str) -> User {
        User::new(UserId::new(id), name, fixed_now())
    }

    #[test]
    fn lists_users_in_registration_order() {
        let repo = InMemoryUserRepository::new();
        for (id, name) in [("c", "Carol"), ("a", "Alice"), ("b", "Bob")] {
            repo.upsert_user(&build_user(id, name)).unwrap();
        }

        let names: Vec<_> = repo
            .list_users()
            .unwrap()
            .iter()
            .map(|u| u.name().to_owned())
            .collect();
        assert_eq!(names, ["Carol", "Alice", "Bob"]);
    }

    #[test]
    fn upsert_replaces_in_place() {
        let repo = InMemoryUserRepository::new();
        repo.upsert_user(&build_user("a", "Alice")).unwrap();
        repo.upsert_user(&build_user("b", "Bob")).unwrap();

        let mut alice = repo.get_user(&UserId::new("a")).unwrap();
        alice.add_score(4);
        repo.upsert_user(&alice).unwrap();

        let users = repo.list_users().unwrap();
        assert_eq!(users.len(), 2);
        assert_eq!(users[0].id(), &UserId::new("a"));
        assert_eq!(users[0].score(), 4);
    }

    #[test]
    fn missing_user_is_not_found() {
        let repo = InMemoryUserRepository::new();
        let err = repo.get_user(&UserId::new("ghost")).unwrap_err();
        assert!(matches!(err, StorageError::NotFound));
    }

    #[test]
    fn clones_share_state() {
        let storage = Storage::in_memory();
        let other = storage.clone();
        storage.users.upsert_user(&build_user("a", "Alice")).unwrap();
        assert_eq!(other.users.list_users().unwrap().len(), 1);
    }
}
