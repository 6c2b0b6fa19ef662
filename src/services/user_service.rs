// ==================== USERS, LOCATION & FRIENDS ====================
// Regras de negócio sobre a collection "users".
// O UserStore só faz leituras/escritas primitivas; validação fica aqui.

use std::collections::{HashMap, HashSet};

use crate::{
    database::UserStore,
    models::{Coord, CreateUserRequest, FriendSummary, Location, User},
    utils::AppError,
};

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Busca usuário pelo `user_id`
pub async fn find_by_id(store: &dyn UserStore, user_id: i64) -> Result<User, AppError> {
    store
        .find_by_id(user_id)
        .await?
        .ok_or_else(AppError::user_not_found)
}

/// Busca usuário pelo telefone (login)
pub async fn find_by_phone(store: &dyn UserStore, phone_number: &str) -> Result<User, AppError> {
    store
        .find_by_phone(phone_number)
        .await?
        .ok_or_else(AppError::invalid_phone_number)
}

/// Registers a user with no journey and no friends, then returns the stored
/// document.
pub async fn create(store: &dyn UserStore, request: CreateUserRequest) -> Result<User, AppError> {
    let (Some(name), Some(phone_number)) = (non_blank(request.name), non_blank(request.phone_number))
    else {
        return Err(AppError::InvalidInput("Invalid input".to_string()));
    };

    if store.find_by_phone(&phone_number).await?.is_some() {
        return Err(AppError::phone_number_taken());
    }

    let user_id = store.next_user_id().await?;
    let user = User::new(user_id, name, phone_number);

    // Stores report a taken phone as Conflict and an id collision as Internal
    store.insert(&user).await?;

    log::info!("✅ User {} registered", user_id);

    find_by_id(store, user_id).await
}

/// Appends `friend_id` to the end of the user's friend list.
///
/// Duplicates are allowed and `friend_id` itself is not checked.
pub async fn append_friend(
    store: &dyn UserStore,
    user_id: i64,
    friend_id: i64,
) -> Result<bool, AppError> {
    let matched = store.push_friend(user_id, friend_id).await?;
    if matched == 0 {
        return Err(AppError::user_not_found());
    }

    log::info!("🤝 User {} added friend {}", user_id, friend_id);
    Ok(true)
}

/// Location the user ends up with after a status change
pub fn resolve_location(
    status: bool,
    start: Option<Coord>,
    end: Option<Coord>,
) -> Result<Location, AppError> {
    match (status, start, end) {
        (false, _, _) => Ok(Location::reset()),
        (true, Some(start), Some(end)) => Ok(Location::journey(start, end)),
        (true, _, _) => Err(AppError::bad_request()),
    }
}

/// Replaces the whole `location` of the user
pub async fn update_location(
    store: &dyn UserStore,
    status: bool,
    start: Option<Coord>,
    end: Option<Coord>,
    user_id: i64,
) -> Result<bool, AppError> {
    let location = resolve_location(status, start, end)?;
    let matched = store.set_location(user_id, &location).await?;
    if matched == 0 {
        log::debug!("📍 Location update for unknown user {} matched nothing", user_id);
    }
    Ok(true)
}

/// Moves `location.current` only; status, start and end stay as they are
pub async fn update_current_location(
    store: &dyn UserStore,
    user_id: i64,
    current: Coord,
) -> Result<bool, AppError> {
    let matched = store.set_current_location(user_id, &current).await?;
    if matched == 0 {
        log::debug!("📍 Current location update for unknown user {} matched nothing", user_id);
    }
    Ok(true)
}

/// Friends of `user_id`, in `friendList` order.
///
/// Repeated ids appear once; ids with no stored user are skipped.
pub async fn fetch_friend_list(
    store: &dyn UserStore,
    user_id: i64,
) -> Result<Vec<FriendSummary>, AppError> {
    let owner = find_by_id(store, user_id).await?;

    let mut seen = HashSet::new();
    let friend_ids: Vec<i64> = owner
        .friend_list
        .into_iter()
        .filter(|id| seen.insert(*id))
        .collect();

    if friend_ids.is_empty() {
        return Ok(Vec::new());
    }

    let mut by_id: HashMap<i64, User> = store
        .find_many(&friend_ids)
        .await?
        .into_iter()
        .map(|u| (u.user_id, u))
        .collect();

    Ok(friend_ids
        .iter()
        .filter_map(|id| by_id.remove(id))
        .map(FriendSummary::from)
        .collect())
}
