use crate::database::UserStore;
use crate::models::{Coord, Location, User};

fn user(
    user_id: i64,
    name: &str,
    phone_number: &str,
    location: Location,
    friend_list: Vec<i64>,
) -> User {
    User {
        user_id,
        name: name.to_string(),
        phone_number: phone_number.to_string(),
        location,
        friend_list,
    }
}

/// Os 6 usuários de demonstração (ids 1..=6, telefones 07900000001..6)
pub fn demo_users() -> Vec<User> {
    vec![
        user(1, "Gemma", "07900000001", Location::reset(), vec![2, 3]),
        user(
            2,
            "Chris W",
            "07900000002",
            Location {
                status: true,
                start: Coord::new(53.810, -1.56),
                current: Coord::new(53.81168, -1.5618),
                end: Coord::new(53.81339, -1.5603),
            },
            vec![1],
        ),
        user(
            3,
            "Chris L",
            "07900000003",
            Location {
                status: true,
                start: Coord::new(53.8143, -1.57604),
                current: Coord::new(53.81487, -1.56465),
                end: Coord::new(53.81459, -1.5486),
            },
            vec![1, 2],
        ),
        user(4, "Aminah", "07900000004", Location::reset(), vec![]),
        user(5, "Priya", "07900000005", Location::reset(), vec![1]),
        user(6, "Tom", "07900000006", Location::reset(), vec![2, 3, 4]),
    ]
}

/// Seed dos usuários de demonstração.
/// Só insere se a collection estiver vazia.
pub async fn seed_demo_users(store: &dyn UserStore) {
    let count = match store.count_users().await {
        Ok(count) => count,
        Err(e) => {
            log::error!("❌ Failed to count users before seeding: {}", e);
            return;
        }
    };

    if count > 0 {
        log::info!("🌱 Users: {} already in store - skipping seed", count);
        return;
    }

    let users = demo_users();
    log::info!("🌱 Users: seeding {} demo users...", users.len());

    for user in &users {
        if let Err(e) = store.insert(user).await {
            log::error!("   ❌ Failed to seed user {}: {}", user.user_id, e);
            return;
        }
    }

    match store.sync_user_sequence().await {
        Ok(seq) => log::info!("   ✅ Seeded {} users, next user_id is {}", users.len(), seq + 1),
        Err(e) => log::error!("   ❌ Failed to sync user id sequence: {}", e),
    }
}
