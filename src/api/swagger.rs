use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Friend Tracker API",
        version = "0.1.0",
        description = "Users register, log in by phone number, share their journey location and keep a friend list.\n\n**Authentication:** none; login is a phone-number lookup.\n\n**Errors:** every failure body is `{\"msg\": string}` with the HTTP status carrying the kind."
    ),
    paths(
        // Users
        crate::api::users::get_user,
        crate::api::users::create_user,

        // Friends
        crate::api::friends::add_friend,
        crate::api::friends::get_friends,

        // Location
        crate::api::location::update_location,

        // Login
        crate::api::login::login,

        // Health
        crate::api::health::health_check,
    ),
    components(
        schemas(
            crate::models::User,
            crate::models::Location,
            crate::models::Coord,
            crate::models::FriendSummary,
            crate::models::CreateUserRequest,
            crate::models::AddFriendRequest,
            crate::models::LocationUpdateRequest,
            crate::models::UserResponse,
            crate::models::FriendListResponse,
            crate::models::AcknowledgedResponse,
            crate::models::ErrorResponse,
            crate::api::health::HealthResponse,
        )
    ),
    tags(
        (name = "Users", description = "Registration and lookup by user id."),
        (name = "Friends", description = "Friend list: append by phone number, list friends with their locations."),
        (name = "Location", description = "Journey lifecycle (status/start/end) and current position updates."),
        (name = "Login", description = "Phone-number login."),
        (name = "Health", description = "Liveness and storage reachability."),
    )
)]
pub struct ApiDoc;
