use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Par de coordenadas GPS; cada componente pode ser nulo
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Default, ToSchema)]
pub struct Coord {
    pub lat: Option<f64>,
    pub long: Option<f64>,
}

impl Coord {
    pub const EMPTY: Coord = Coord { lat: None, long: None };

    pub fn new(lat: f64, long: f64) -> Self {
        Self { lat: Some(lat), long: Some(long) }
    }
}

/// Estado de localização embutido em cada usuário.
///
/// With `status == false` every pair is `{lat: null, long: null}`; with
/// `status == true` a journey is being tracked from `start` to `end`.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, ToSchema)]
pub struct Location {
    pub status: bool,
    pub start: Coord,
    pub current: Coord,
    pub end: Coord,
}

impl Location {
    pub fn reset() -> Self {
        Self {
            status: false,
            start: Coord::EMPTY,
            current: Coord::EMPTY,
            end: Coord::EMPTY,
        }
    }

    /// New journey: `current` starts at `start`
    pub fn journey(start: Coord, end: Coord) -> Self {
        Self {
            status: true,
            start,
            current: start,
            end,
        }
    }
}

impl Default for Location {
    fn default() -> Self {
        Self::reset()
    }
}

/// Documento da collection "users"
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct User {
    pub user_id: i64,
    pub name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    #[serde(default)]
    pub location: Location,
    #[serde(rename = "friendList", default)]
    pub friend_list: Vec<i64>,
}

impl User {
    /// Freshly registered user: no journey, no friends
    pub fn new(user_id: i64, name: String, phone_number: String) -> Self {
        Self {
            user_id,
            name,
            phone_number,
            location: Location::reset(),
            friend_list: Vec::new(),
        }
    }
}

/// User as seen in someone else's friend list (no `friendList`)
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct FriendSummary {
    pub user_id: i64,
    pub name: String,
    #[serde(rename = "phoneNumber")]
    pub phone_number: String,
    pub location: Location,
}

impl From<User> for FriendSummary {
    fn from(user: User) -> Self {
        Self {
            user_id: user.user_id,
            name: user.name,
            phone_number: user.phone_number,
            location: user.location,
        }
    }
}

// ==================== REQUEST/RESPONSE MODELS ====================

#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct CreateUserRequest {
    pub name: Option<String>,
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddFriendRequest {
    #[serde(rename = "phoneNumber")]
    pub phone_number: Option<String>,
}

/// Body of `PATCH /users/{user_id}/location`.
///
/// `status` toggles the journey; a body with only `current` moves the
/// current position.
#[derive(Debug, Deserialize, Default, ToSchema)]
pub struct LocationUpdateRequest {
    pub status: Option<bool>,
    pub start: Option<Coord>,
    pub end: Option<Coord>,
    pub current: Option<Coord>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserResponse {
    pub user: User,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct FriendListResponse {
    #[serde(rename = "friendList")]
    pub friend_list: Vec<FriendSummary>,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct AcknowledgedResponse {
    pub acknowledged: bool,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    pub msg: String,
}
