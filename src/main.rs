use axum::{
    extract::DefaultBodyLimit,
    routing::{get, patch, post},
    Router,
};
use std::net::SocketAddr;
use test_portal_backend::{
    config::{get_config, init_config},
    database::pool::create_pool,
    routes, AppState,
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    init_config()?;
    let config = get_config();

    let pool = create_pool().await?;
    sqlx::migrate!("./migrations").run(&pool).await?;

    let app_state = AppState::new(pool);

    let base_routes = Router::new()
        .route("/health", get(routes::health::health))
        .route("/api/register", post(routes::auth::register))
        .route("/api/login", post(routes::auth::login));

    let portal_api = Router::new()
        .route("/api/courses", get(routes::courses::list_courses))
        .route("/api/start-test", post(routes::exams::start_test))
        .route("/api/submit-test/:id", post(routes::exams::submit_test))
        .route("/api/history", get(routes::exams::history))
        .route("/api/test-session/:id", get(routes::exams::session_detail))
        .route(
            "/api/create-group-test",
            post(routes::group_tests::create_group_test),
        )
        .route(
            "/api/group-test/:id",
            get(routes::group_tests::view_group_test),
        )
        .route("/api/leaderboard", get(routes::leaderboard::leaderboard))
        .route("/api/user/rank", get(routes::leaderboard::user_rank))
        .route(
            "/api/upload-pass-questions",
            post(routes::uploads::upload_questions),
        )
        .route("/api/user/upload-stats", get(routes::uploads::upload_stats))
        .route(
            "/api/materials/upload",
            post(routes::materials::upload_material),
        )
        .route(
            "/api/materials/:id/download",
            get(routes::materials::download_material),
        )
        .route(
            "/api/materials/search",
            get(routes::materials::search_materials),
        )
        .layer(axum::middleware::from_fn(
            test_portal_backend::middleware::auth::require_bearer_auth,
        ))
        .layer(axum::middleware::from_fn_with_state(
            test_portal_backend::middleware::rate_limit::new_rps_state(config.public_rps),
            test_portal_backend::middleware::rate_limit::rps_middleware,
        ));

    let admin_api = Router::new()
        .route("/api/admin/courses", post(routes::courses::create_course))
        .route(
            "/api/admin/questions",
            post(routes::courses::add_question),
        )
        .route(
            "/api/admin/questions/pending",
            get(routes::uploads::pending_questions),
        )
        .route(
            "/api/admin/questions/:id/status",
            patch(routes::uploads::update_question_status),
        )
        .layer(axum::middleware::from_fn(
            test_portal_backend::middleware::auth::require_admin,
        ))
        .layer(axum::middleware::from_fn_with_state(
            test_portal_backend::middleware::rate_limit::new_rps_state(config.admin_rps),
            test_portal_backend::middleware::rate_limit::rps_middleware,
        ));

    let upload_path = std::env::var("UPLOADS_DIR").unwrap_or_else(|_| "uploads".to_string());
    info!("Serving uploads from: {}", upload_path);

    let app = base_routes
        .merge(portal_api)
        .merge(admin_api)
        .nest_service("/uploads", tower_http::services::ServeDir::new(upload_path))
        .with_state(app_state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024));

    let addr: SocketAddr = config.server_address.parse()?;
    info!("Server listening on {}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
