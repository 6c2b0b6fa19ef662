use async_trait::async_trait;
use tokio::sync::RwLock;

use super::UserStore;
use crate::models::{Coord, Location, User};
use crate::utils::AppError;

#[derive(Default)]
struct MemoryState {
    users: Vec<User>,
    seq: i64,
}

/// `UserStore` kept in process memory, in insertion order.
///
/// Used when no `DATABASE_URL` is configured and by the test suites.
#[derive(Default)]
pub struct InMemoryUserStore {
    state: RwLock<MemoryState>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_users(users: Vec<User>) -> Self {
        let seq = users.iter().map(|u| u.user_id).max().unwrap_or(0);
        Self {
            state: RwLock::new(MemoryState { users, seq }),
        }
    }
}

impl MemoryState {
    fn find_mut(&mut self, user_id: i64) -> Option<&mut User> {
        self.users.iter_mut().find(|u| u.user_id == user_id)
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError> {
        let state = self.state.read().await;
        Ok(state.users.iter().find(|u| u.user_id == user_id).cloned())
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .find(|u| u.phone_number == phone_number)
            .cloned())
    }

    async fn find_many(&self, user_ids: &[i64]) -> Result<Vec<User>, AppError> {
        let state = self.state.read().await;
        Ok(state
            .users
            .iter()
            .filter(|u| user_ids.contains(&u.user_id))
            .cloned()
            .collect())
    }

    async fn count_users(&self) -> Result<u64, AppError> {
        Ok(self.state.read().await.users.len() as u64)
    }

    async fn next_user_id(&self) -> Result<i64, AppError> {
        let mut state = self.state.write().await;
        state.seq += 1;
        Ok(state.seq)
    }

    async fn sync_user_sequence(&self) -> Result<i64, AppError> {
        let mut state = self.state.write().await;
        let max_id = state.users.iter().map(|u| u.user_id).max().unwrap_or(0);
        state.seq = state.seq.max(max_id);
        Ok(state.seq)
    }

    async fn insert(&self, user: &User) -> Result<(), AppError> {
        let mut state = self.state.write().await;

        // Mesmas restrições dos índices únicos do MongoDB
        if state.users.iter().any(|u| u.user_id == user.user_id) {
            return Err(AppError::Internal(format!(
                "Duplicate key on index 'user_id_1' ({})",
                user.user_id
            )));
        }
        if state.users.iter().any(|u| u.phone_number == user.phone_number) {
            return Err(AppError::phone_number_taken());
        }

        state.users.push(user.clone());
        Ok(())
    }

    async fn push_friend(&self, user_id: i64, friend_id: i64) -> Result<u64, AppError> {
        let mut state = self.state.write().await;
        match state.find_mut(user_id) {
            Some(user) => {
                user.friend_list.push(friend_id);
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn set_location(&self, user_id: i64, location: &Location) -> Result<u64, AppError> {
        let mut state = self.state.write().await;
        match state.find_mut(user_id) {
            Some(user) => {
                user.location = *location;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn set_current_location(&self, user_id: i64, current: &Coord) -> Result<u64, AppError> {
        let mut state = self.state.write().await;
        match state.find_mut(user_id) {
            Some(user) => {
                user.location.current = *current;
                Ok(1)
            }
            None => Ok(0),
        }
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn user(id: i64, phone: &str) -> User {
        User::new(id, format!("User {}", id), phone.to_string())
    }

    #[tokio::test]
    async fn test_sequence_starts_after_seeded_users() {
        let store = InMemoryUserStore::with_users(vec![user(1, "a"), user(4, "b")]);
        assert_eq!(store.next_user_id().await.unwrap(), 5);
        assert_eq!(store.next_user_id().await.unwrap(), 6);
    }

    #[tokio::test]
    async fn test_sync_never_lowers_sequence() {
        let store = InMemoryUserStore::new();
        store.next_user_id().await.unwrap();
        store.next_user_id().await.unwrap();
        store.insert(&user(1, "a")).await.unwrap();

        assert_eq!(store.sync_user_sequence().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_phone() {
        let store = InMemoryUserStore::with_users(vec![user(1, "07900000001")]);
        let result = store.insert(&user(2, "07900000001")).await;
        assert!(matches!(result, Err(AppError::Conflict(_))));
    }

    #[tokio::test]
    async fn test_insert_rejects_duplicate_id_as_internal() {
        let store = InMemoryUserStore::with_users(vec![user(1, "07900000001")]);
        let result = store.insert(&user(1, "07900000777")).await;
        assert!(matches!(result, Err(AppError::Internal(_))));
    }

    #[tokio::test]
    async fn test_writes_on_missing_user_match_nothing() {
        let store = InMemoryUserStore::new();
        assert_eq!(store.push_friend(9, 1).await.unwrap(), 0);
        assert_eq!(store.set_location(9, &Location::reset()).await.unwrap(), 0);
        assert_eq!(store.set_current_location(9, &Coord::EMPTY).await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_find_many_keeps_storage_order() {
        let store = InMemoryUserStore::with_users(vec![user(3, "c"), user(1, "a"), user(2, "b")]);
        let found = store.find_many(&[1, 3]).await.unwrap();
        let ids: Vec<i64> = found.iter().map(|u| u.user_id).collect();
        assert_eq!(ids, vec![3, 1]);
    }
}
