use actix_web::{web, HttpResponse};

use super::parse_user_id;
use crate::{
    database::UserStore,
    models::{AcknowledgedResponse, AddFriendRequest, ErrorResponse, FriendListResponse},
    services::user_service,
    utils::AppError,
};

/// PATCH /api/users/{user_id}/friends - Adiciona amigo pelo telefone
#[utoipa::path(
    patch,
    path = "/api/users/{user_id}/friends",
    tag = "Friends",
    params(("user_id" = i64, Path, description = "Owner of the friend list")),
    request_body = AddFriendRequest,
    responses(
        (status = 201, description = "Friend appended", body = AcknowledgedResponse),
        (status = 400, description = "Malformed JSON body", body = ErrorResponse),
        (status = 404, description = "Missing or unknown phone number, or unknown user", body = ErrorResponse)
    )
)]
pub async fn add_friend(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
    request: web::Json<AddFriendRequest>,
) -> Result<HttpResponse, AppError> {
    log::info!("🤝 PATCH /users/{}/friends", path);

    let user_id = parse_user_id(&path)?;
    let phone_number = request
        .into_inner()
        .phone_number
        .filter(|p| !p.trim().is_empty())
        .ok_or_else(AppError::invalid_phone_number)?;

    let friend = user_service::find_by_phone(store.get_ref(), &phone_number).await?;
    let acknowledged =
        user_service::append_friend(store.get_ref(), user_id, friend.user_id).await?;

    Ok(HttpResponse::Created().json(AcknowledgedResponse { acknowledged }))
}

/// GET /api/users/{user_id}/friends - Lista amigos (sem friendList)
#[utoipa::path(
    get,
    path = "/api/users/{user_id}/friends",
    tag = "Friends",
    params(("user_id" = i64, Path, description = "Owner of the friend list")),
    responses(
        (status = 200, description = "Friends in friendList order", body = FriendListResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    )
)]
pub async fn get_friends(
    store: web::Data<dyn UserStore>,
    path: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    log::info!("📋 GET /users/{}/friends", path);

    let user_id = parse_user_id(&path)?;
    let friend_list = user_service::fetch_friend_list(store.get_ref(), user_id).await?;

    log::info!("✅ Listed {} friends for user {}", friend_list.len(), user_id);

    Ok(HttpResponse::Ok().json(FriendListResponse { friend_list }))
}

#[cfg(test)]
mod tests {
    use crate::api::{app, test_support::seeded_store};
    use actix_web::{http::StatusCode, test};
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn test_add_friend_by_phone() {
        let store = seeded_store();
        let app = test::init_service(app(store.clone())).await;

        let req = test::TestRequest::patch()
            .uri("/api/users/6/friends")
            .set_json(json!({ "phoneNumber": "07900000001" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body, json!({ "acknowledged": true }));

        let req = test::TestRequest::get().uri("/api/users/6").to_request();
        let body: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["user"]["friendList"], json!([2, 3, 4, 1]));
    }

    #[actix_web::test]
    async fn test_add_friend_unknown_phone() {
        let store = seeded_store();
        let app = test::init_service(app(store.clone())).await;

        let req = test::TestRequest::patch()
            .uri("/api/users/6/friends")
            .set_json(json!({ "phoneNumber": "07900000099" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["msg"], "Invalid phone number");

        let owner = store.find_by_id(6).await.unwrap().unwrap();
        assert_eq!(owner.friend_list, vec![2, 3, 4]);
    }

    #[actix_web::test]
    async fn test_add_friend_unknown_owner() {
        let app = test::init_service(app(seeded_store())).await;

        let req = test::TestRequest::patch()
            .uri("/api/users/99/friends")
            .set_json(json!({ "phoneNumber": "07900000001" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["msg"], "User not found");
    }

    #[actix_web::test]
    async fn test_add_friend_without_phone() {
        let store = seeded_store();
        let app = test::init_service(app(store.clone())).await;

        for body in [json!({}), json!({ "phoneNumber": "  " })] {
            let req = test::TestRequest::patch()
                .uri("/api/users/6/friends")
                .set_json(body)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::NOT_FOUND);

            let body: Value = test::read_body_json(resp).await;
            assert_eq!(body, json!({ "msg": "Invalid phone number" }));
        }

        let owner = store.find_by_id(6).await.unwrap().unwrap();
        assert_eq!(owner.friend_list, vec![2, 3, 4]);
    }

    #[actix_web::test]
    async fn test_get_friends() {
        let app = test::init_service(app(seeded_store())).await;

        let req = test::TestRequest::get().uri("/api/users/6/friends").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);

        let body: Value = test::read_body_json(resp).await;
        assert_eq!(
            body["friendList"],
            json!([
                {
                    "user_id": 2,
                    "name": "Chris W",
                    "phoneNumber": "07900000002",
                    "location": {
                        "status": true,
                        "start": {"lat": 53.810, "long": -1.56},
                        "current": {"lat": 53.81168, "long": -1.5618},
                        "end": {"lat": 53.81339, "long": -1.5603}
                    }
                },
                {
                    "user_id": 3,
                    "name": "Chris L",
                    "phoneNumber": "07900000003",
                    "location": {
                        "status": true,
                        "start": {"lat": 53.8143, "long": -1.57604},
                        "current": {"lat": 53.81487, "long": -1.56465},
                        "end": {"lat": 53.81459, "long": -1.5486}
                    }
                },
                {
                    "user_id": 4,
                    "name": "Aminah",
                    "phoneNumber": "07900000004",
                    "location": {
                        "status": false,
                        "start": {"lat": null, "long": null},
                        "current": {"lat": null, "long": null},
                        "end": {"lat": null, "long": null}
                    }
                }
            ])
        );
    }

    #[actix_web::test]
    async fn test_get_friends_unknown_owner() {
        let app = test::init_service(app(seeded_store())).await;

        let req = test::TestRequest::get().uri("/api/users/99/friends").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }
}
