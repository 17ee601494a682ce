use std::env;

use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use chrono::{Duration, Utc};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;
use uuid::Uuid;

#[tokio::test]
async fn group_test_schedule_and_activation() {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("JWT_EXPIRY_HOURS", "24");
    env::set_var("FRONTEND_DOMAIN", "http://localhost:3000");
    env::set_var("PUBLIC_RPS", "100");
    env::set_var("ADMIN_RPS", "100");

    test_portal_backend::config::init_config().expect("init config");
    let pool = test_portal_backend::database::pool::create_pool()
        .await
        .expect("pool");
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("migrations");

    let app_state = test_portal_backend::AppState::new(pool.clone());

    let course = app_state
        .question_service
        .create_course(&format!("Physics {}", Uuid::new_v4()))
        .await
        .expect("course");
    for i in 0..5 {
        app_state
            .question_service
            .add_question(
                course.id,
                &format!("Question {}", i),
                ["wrong 1", "right", "wrong 2", "wrong 3"],
                "B",
            )
            .await
            .expect("seed question");
    }

    let alice = app_state
        .user_service
        .register(&format!("alice_{}", Uuid::new_v4().simple()), None, "hunter22")
        .await
        .expect("alice");
    let bob = app_state
        .user_service
        .register(&format!("bob_{}", Uuid::new_v4().simple()), None, "hunter22")
        .await
        .expect("bob");
    let alice_token =
        test_portal_backend::utils::jwt::sign_token(alice.id, &alice.role, "test_secret_key", 24)
            .expect("alice token");
    let bob_token =
        test_portal_backend::utils::jwt::sign_token(bob.id, &bob.role, "test_secret_key", 24)
            .expect("bob token");

    let app = Router::new()
        .route(
            "/api/create-group-test",
            post(test_portal_backend::routes::group_tests::create_group_test),
        )
        .route(
            "/api/group-test/:id",
            get(test_portal_backend::routes::group_tests::view_group_test),
        )
        .layer(axum::middleware::from_fn(
            test_portal_backend::middleware::auth::require_bearer_auth,
        ))
        .with_state(app_state);

    // A start in the past activates on first view.
    let create_body = json!({
        "name": "Midterm",
        "course": course.id,
        "question_count": 3,
        "duration_minutes": 15,
        "invitees": ["alice@example.com", "bob@example.com"],
        "scheduled_start": (Utc::now() - Duration::minutes(1)).to_rfc3339(),
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/create-group-test")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", alice_token))
        .body(Body::from(create_body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let created: JsonValue = serde_json::from_slice(&bytes).unwrap();
    let group_test_id = created["id"].as_str().expect("group test id").to_string();

    let view = |token: String| {
        let app = app.clone();
        let uri = format!("/api/group-test/{}", group_test_id);
        async move {
            let req = Request::builder()
                .method("GET")
                .uri(uri)
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap();
            let resp = app.oneshot(req).await.unwrap();
            assert_eq!(resp.status(), StatusCode::OK);
            let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
            serde_json::from_slice::<JsonValue>(&bytes).unwrap()
        }
    };

    let first = view(alice_token.clone()).await;
    assert_eq!(first["questions"].as_array().unwrap().len(), 3);
    let alice_session = first["session_id"].as_str().expect("session id").to_string();

    // Repeat views reuse the materialized session.
    let second = view(alice_token.clone()).await;
    assert_eq!(second["session_id"].as_str(), Some(alice_session.as_str()));

    // Each participant gets their own session.
    let bobs = view(bob_token.clone()).await;
    let bob_session = bobs["session_id"].as_str().expect("session id");
    assert_ne!(bob_session, alice_session);

    // Before the scheduled start nothing is materialized.
    let create_body = json!({
        "name": "Final",
        "course": course.id,
        "question_count": 3,
        "duration_minutes": 15,
        "invitees": ["alice@example.com"],
        "scheduled_start": (Utc::now() + Duration::hours(2)).to_rfc3339(),
    });
    let req = Request::builder()
        .method("POST")
        .uri("/api/create-group-test")
        .header("content-type", "application/json")
        .header("authorization", format!("Bearer {}", alice_token))
        .body(Body::from(create_body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::CREATED);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let future_test: JsonValue = serde_json::from_slice(&bytes).unwrap();

    let req = Request::builder()
        .method("GET")
        .uri(format!(
            "/api/group-test/{}",
            future_test["id"].as_str().unwrap()
        ))
        .header("authorization", format!("Bearer {}", alice_token))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let pending: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert!(pending["questions"].as_array().unwrap().is_empty());
    assert!(pending["session_id"].is_null());
}
