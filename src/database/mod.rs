mod memory;
mod mongo_user_store;
mod user_store;

pub use memory::InMemoryUserStore;
pub use user_store::UserStore;

use mongodb::{Client, Collection, Database};
use std::error::Error;

pub const USERS: &str = "users";
pub const COUNTERS: &str = "counters";
const DEFAULT_DATABASE: &str = "friend_tracker";

#[derive(Clone)]
pub struct MongoDB {
    db: Database,
}

impl MongoDB {
    pub async fn new(uri: &str) -> Result<Self, Box<dyn Error>> {
        let mut client_options = mongodb::options::ClientOptions::parse(uri).await?;

        // Pool compartilhado por todos os workers
        client_options.max_pool_size = Some(20);
        client_options.min_pool_size = Some(2);
        client_options.max_idle_time = Some(std::time::Duration::from_secs(300));

        client_options.connect_timeout = Some(std::time::Duration::from_secs(5));
        client_options.server_selection_timeout = Some(std::time::Duration::from_secs(5));

        // Database name from the URI path, or default
        let db_name = client_options
            .default_database
            .clone()
            .unwrap_or_else(|| DEFAULT_DATABASE.to_string());

        let client = Client::with_options(client_options)?;
        let db = client.database(&db_name);

        // Test connection
        db.list_collection_names().await?;

        let mongodb = Self { db };

        mongodb.ensure_indexes().await?;

        let last_id = UserStore::sync_user_sequence(&mongodb).await?;
        log::info!("🔢 Database '{}' ready, user id sequence at {}", db_name, last_id);

        Ok(mongodb)
    }

    /// Unique indexes on the user lookup keys
    async fn ensure_indexes(&self) -> Result<(), Box<dyn Error>> {
        use mongodb::bson::doc;
        use mongodb::options::IndexOptions;
        use mongodb::IndexModel;

        log::info!("🔧 Creating database indexes...");

        let users = self.collection::<mongodb::bson::Document>(USERS);

        let user_id_index = IndexModel::builder()
            .keys(doc! { "user_id": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match users.create_index(user_id_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(user_id) unique"),
            Err(e) => log::warn!("   ⚠️  Could not create users(user_id) index: {}", e),
        }

        let phone_index = IndexModel::builder()
            .keys(doc! { "phoneNumber": 1 })
            .options(IndexOptions::builder().unique(true).build())
            .build();

        match users.create_index(phone_index).await {
            Ok(_) => log::info!("   ✅ Index created: users(phoneNumber) unique"),
            Err(e) => log::warn!("   ⚠️  Could not create users(phoneNumber) index: {}", e),
        }

        log::info!("✅ Database indexes ready");

        Ok(())
    }

    pub fn collection<T: Send + Sync>(&self, name: &str) -> Collection<T> {
        self.db.collection(name)
    }

    pub fn database(&self) -> &Database {
        &self.db
    }
}
