use axum::{extract::State, response::IntoResponse, Extension, Json};
use serde_json::json;

use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::AppState;

const LEADERBOARD_SIZE: usize = 10;

#[utoipa::path(
    get,
    path = "/api/leaderboard",
    responses(
        (status = 200, description = "Top submitted sessions by score percentage")
    )
)]
#[axum::debug_handler]
pub async fn leaderboard(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let entries = state.leaderboard_service.top_sessions(LEADERBOARD_SIZE).await?;
    Ok(Json(entries))
}

#[utoipa::path(
    get,
    path = "/api/user/rank",
    responses(
        (status = 200, description = "Authenticated user's 1-based rank, null when unranked")
    )
)]
#[axum::debug_handler]
pub async fn user_rank(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let rank = state.leaderboard_service.rank_of(user_id).await?;
    Ok(Json(json!({ "rank": rank })))
}
