use async_trait::async_trait;

use crate::models::{Coord, Location, User};
use crate::utils::AppError;

/// Primitive reads/writes over the `users` collection.
///
/// Implementations do no validation; policy lives in `services::user_service`.
/// Write methods return the number of documents matched by the filter.
#[async_trait]
pub trait UserStore: Send + Sync {
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError>;

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, AppError>;

    /// Batch lookup, returned in storage order
    async fn find_many(&self, user_ids: &[i64]) -> Result<Vec<User>, AppError>;

    async fn count_users(&self) -> Result<u64, AppError>;

    /// Atomically allocates the next `user_id`
    async fn next_user_id(&self) -> Result<i64, AppError>;

    /// Raises the id sequence to the highest stored `user_id` and returns it
    async fn sync_user_sequence(&self) -> Result<i64, AppError>;

    async fn insert(&self, user: &User) -> Result<(), AppError>;

    /// Appends to `friendList` in a single atomic update
    async fn push_friend(&self, user_id: i64, friend_id: i64) -> Result<u64, AppError>;

    async fn set_location(&self, user_id: i64, location: &Location) -> Result<u64, AppError>;

    async fn set_current_location(&self, user_id: i64, current: &Coord) -> Result<u64, AppError>;

    async fn ping(&self) -> Result<(), AppError>;
}
