use async_trait::async_trait;
use futures::stream::TryStreamExt;
use mongodb::bson::{doc, to_bson, Bson, Document};
use mongodb::options::ReturnDocument;

use super::{MongoDB, UserStore, COUNTERS, USERS};
use crate::models::{Coord, Location, User};
use crate::utils::AppError;

const USER_SEQUENCE: &str = "user_id";

fn bson_to_i64(value: Option<&Bson>) -> Option<i64> {
    match value {
        Some(Bson::Int64(v)) => Some(*v),
        Some(Bson::Int32(v)) => Some(i64::from(*v)),
        Some(Bson::Double(v)) if v.fract() == 0.0 => Some(*v as i64),
        _ => None,
    }
}

impl MongoDB {
    fn users(&self) -> mongodb::Collection<User> {
        self.collection::<User>(USERS)
    }

    fn counters(&self) -> mongodb::Collection<Document> {
        self.collection::<Document>(COUNTERS)
    }
}

#[async_trait]
impl UserStore for MongoDB {
    async fn find_by_id(&self, user_id: i64) -> Result<Option<User>, AppError> {
        Ok(self.users().find_one(doc! { "user_id": user_id }).await?)
    }

    async fn find_by_phone(&self, phone_number: &str) -> Result<Option<User>, AppError> {
        Ok(self
            .users()
            .find_one(doc! { "phoneNumber": phone_number })
            .await?)
    }

    async fn find_many(&self, user_ids: &[i64]) -> Result<Vec<User>, AppError> {
        if user_ids.is_empty() {
            return Ok(Vec::new());
        }

        let cursor = self
            .users()
            .find(doc! { "user_id": { "$in": user_ids.to_vec() } })
            .await?;

        let users: Vec<User> = cursor.try_collect().await?;
        Ok(users)
    }

    async fn count_users(&self) -> Result<u64, AppError> {
        Ok(self.users().count_documents(doc! {}).await?)
    }

    async fn next_user_id(&self) -> Result<i64, AppError> {
        let counter = self
            .counters()
            .find_one_and_update(
                doc! { "_id": USER_SEQUENCE },
                doc! { "$inc": { "seq": 1_i64 } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?
            .ok_or_else(|| AppError::Internal("User id sequence missing after upsert".to_string()))?;

        bson_to_i64(counter.get("seq"))
            .ok_or_else(|| AppError::Internal("User id sequence is not an integer".to_string()))
    }

    async fn sync_user_sequence(&self) -> Result<i64, AppError> {
        let highest = self
            .collection::<Document>(USERS)
            .find_one(doc! {})
            .sort(doc! { "user_id": -1 })
            .projection(doc! { "user_id": 1 })
            .await?;

        let max_id = highest
            .as_ref()
            .and_then(|d| bson_to_i64(d.get("user_id")))
            .unwrap_or(0);

        let counter = self
            .counters()
            .find_one_and_update(
                doc! { "_id": USER_SEQUENCE },
                doc! { "$max": { "seq": max_id } },
            )
            .upsert(true)
            .return_document(ReturnDocument::After)
            .await?;

        Ok(counter
            .as_ref()
            .and_then(|d| bson_to_i64(d.get("seq")))
            .unwrap_or(max_id))
    }

    async fn insert(&self, user: &User) -> Result<(), AppError> {
        self.users()
            .insert_one(user)
            .await
            .map_err(|e| AppError::from(e).on_insert())?;
        Ok(())
    }

    async fn push_friend(&self, user_id: i64, friend_id: i64) -> Result<u64, AppError> {
        let result = self
            .users()
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$push": { "friendList": friend_id } },
            )
            .await?;

        Ok(result.matched_count)
    }

    async fn set_location(&self, user_id: i64, location: &Location) -> Result<u64, AppError> {
        let location = to_bson(location).map_err(|e| AppError::Internal(e.to_string()))?;

        let result = self
            .users()
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$set": { "location": location } },
            )
            .await?;

        Ok(result.matched_count)
    }

    async fn set_current_location(&self, user_id: i64, current: &Coord) -> Result<u64, AppError> {
        let current = to_bson(current).map_err(|e| AppError::Internal(e.to_string()))?;

        let result = self
            .users()
            .update_one(
                doc! { "user_id": user_id },
                doc! { "$set": { "location.current": current } },
            )
            .await?;

        Ok(result.matched_count)
    }

    async fn ping(&self) -> Result<(), AppError> {
        self.database().run_command(doc! { "ping": 1 }).await?;
        Ok(())
    }
}
