use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use validator::Validate;

use crate::dto::auth_dto::{AuthResponse, LoginRequest, RegisterRequest, UserSummary};
use crate::error::Result;
use crate::utils::jwt;
use crate::AppState;

#[axum::debug_handler]
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<RegisterRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .user_service
        .register(
            &payload.username,
            payload.email.as_deref(),
            &payload.password,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(UserSummary::from(user))))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user = state
        .user_service
        .authenticate(&payload.username, &payload.password)
        .await?;

    let config = crate::config::get_config();
    let token = jwt::sign_token(
        user.id,
        &user.role,
        &config.jwt_secret,
        config.jwt_expiry_hours,
    )?;
    Ok(Json(AuthResponse {
        token,
        user: UserSummary::from(user),
    }))
}
