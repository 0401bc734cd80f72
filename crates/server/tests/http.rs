use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use base64::Engine as _;
use http_body_util::BodyExt;
use sea_orm::{ActiveValue, Database, DatabaseConnection, EntityTrait};
use tower::ServiceExt;
use uuid::Uuid;

use engine::{DiscountCode, DiscountKind, Engine, Game, Money, discount_codes, games, users};
use migration::MigratorTrait;
use server::{ServerState, router};

async fn test_app() -> (Router, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    let state = ServerState {
        engine: Arc::new(engine),
        db: db.clone(),
    };
    (router(state), db)
}

async fn seed_user(db: &DatabaseConnection, user_id: &str, balance_minor: i64) {
    let user = users::ActiveModel {
        user_id: ActiveValue::Set(user_id.to_string()),
        username: ActiveValue::Set(user_id.to_string()),
        email: ActiveValue::Set(format!("{user_id}@example.com")),
        password: ActiveValue::Set("password".to_string()),
        role: ActiveValue::Set("user".to_string()),
        profile_image: ActiveValue::Set(None),
        wallet_balance: ActiveValue::Set(balance_minor),
    };
    users::Entity::insert(user).exec(db).await.unwrap();
}

async fn seed_game(db: &DatabaseConnection, name: &str, price_minor: i64) -> Uuid {
    let game = Game::new(
        name.to_string(),
        None,
        Money::new(price_minor),
        chrono::Utc::now(),
    )
    .unwrap();
    games::Entity::insert(games::ActiveModel::from(&game))
        .exec(db)
        .await
        .unwrap();
    game.id
}

async fn seed_code(db: &DatabaseConnection, name: &str, value: i64) {
    let code = DiscountCode {
        id: Uuid::new_v4(),
        name: name.to_string(),
        kind: DiscountKind::Percent,
        value,
        max_use: 5,
        current_use: 0,
        expire_date: None,
        retired: false,
    };
    discount_codes::Entity::insert(discount_codes::ActiveModel::from(&code))
        .exec(db)
        .await
        .unwrap();
}

fn basic_auth(user: &str) -> String {
    let token = base64::engine::general_purpose::STANDARD.encode(format!("{user}:password"));
    format!("Basic {token}")
}

fn post_json(uri: &str, user: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, basic_auth(user))
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_authed(uri: &str, user: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri(uri)
        .header(header::AUTHORIZATION, basic_auth(user))
        .body(Body::empty())
        .unwrap()
}

async fn body_json(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn missing_credentials_are_rejected() {
    let (app, _db) = test_app().await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/wallet")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn wrong_password_is_rejected() {
    let (app, db) = test_app().await;
    seed_user(&db, "alice", 0).await;

    let token = base64::engine::general_purpose::STANDARD.encode("alice:wrong");
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/wallet")
                .header(header::AUTHORIZATION, format!("Basic {token}"))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn catalog_is_public() {
    let (app, db) = test_app().await;
    seed_game(&db, "Dragonfall", 2_000).await;

    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/games")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["games"][0]["name"], "Dragonfall");
}

#[tokio::test]
async fn checkout_returns_receipt() {
    let (app, db) = test_app().await;
    seed_user(&db, "alice", 10_000).await;
    let first = seed_game(&db, "Dragonfall", 4_000).await;
    let second = seed_game(&db, "Starfarer", 3_000).await;
    seed_code(&db, "SAVE10", 10).await;

    let response = app
        .oneshot(post_json(
            "/checkout",
            "alice",
            serde_json::json!({ "game_ids": [first, second], "code": "SAVE10" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = body_json(response).await;
    assert_eq!(body["sub_total_minor"], 7_000);
    assert_eq!(body["discount_minor"], 700);
    assert_eq!(body["total_minor"], 6_300);
    assert_eq!(body["balance_minor"], 3_700);
}

#[tokio::test]
async fn insufficient_funds_maps_to_422() {
    let (app, db) = test_app().await;
    seed_user(&db, "alice", 100).await;
    let game = seed_game(&db, "Dragonfall", 2_000).await;

    let response = app
        .oneshot(post_json(
            "/buy",
            "alice",
            serde_json::json!({ "game_id": game }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn buying_twice_maps_to_409() {
    let (app, db) = test_app().await;
    seed_user(&db, "alice", 10_000).await;
    let game = seed_game(&db, "Dragonfall", 2_000).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/buy",
            "alice",
            serde_json::json!({ "game_id": game }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(post_json(
            "/buy",
            "alice",
            serde_json::json!({ "game_id": game }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
}

#[tokio::test]
async fn unknown_game_maps_to_404() {
    let (app, db) = test_app().await;
    seed_user(&db, "alice", 10_000).await;

    let response = app
        .oneshot(post_json(
            "/buy",
            "alice",
            serde_json::json!({ "game_id": Uuid::new_v4() }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn top_up_then_wallet_shows_balance() {
    let (app, db) = test_app().await;
    seed_user(&db, "alice", 500).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/topup",
            "alice",
            serde_json::json!({ "amount_minor": 2_500 }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["balance_minor"], 3_000);

    let response = app
        .clone()
        .oneshot(get_authed("/wallet", "alice"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;
    assert_eq!(body["balance_minor"], 3_000);

    let response = app
        .oneshot(get_authed("/wallet/transactions", "alice"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["entries"].as_array().unwrap().len(), 1);
    assert_eq!(body["entries"][0]["kind"], "credit");
}

#[tokio::test]
async fn profile_never_exposes_the_password() {
    let (app, db) = test_app().await;
    seed_user(&db, "alice", 500).await;

    let response = app
        .oneshot(get_authed("/profile", "alice"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["username"], "alice");
    assert_eq!(body["balance_minor"], 500);
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn discount_preview_reports_remaining_uses() {
    let (app, db) = test_app().await;
    seed_user(&db, "alice", 0).await;
    seed_code(&db, "SAVE10", 10).await;

    let response = app
        .oneshot(post_json(
            "/discount/validate",
            "alice",
            serde_json::json!({ "code": "SAVE10" }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = body_json(response).await;
    assert_eq!(body["kind"], "percent");
    assert_eq!(body["value"], 10);
    assert_eq!(body["remaining_uses"], 5);
}

#[tokio::test]
async fn library_lists_owned_games() {
    let (app, db) = test_app().await;
    seed_user(&db, "alice", 10_000).await;
    let game = seed_game(&db, "Dragonfall", 2_000).await;

    let response = app
        .clone()
        .oneshot(post_json(
            "/buy",
            "alice",
            serde_json::json!({ "game_id": game }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let response = app
        .oneshot(get_authed("/library", "alice"))
        .await
        .unwrap();
    let body = body_json(response).await;
    assert_eq!(body["games"].as_array().unwrap().len(), 1);
    assert_eq!(body["games"][0]["game"]["name"], "Dragonfall");
}
