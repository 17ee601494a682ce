use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use crate::dto::exam_dto::{SessionResponse, StartTestRequest, SubmitTestRequest};
use crate::error::Result;
use crate::middleware::auth::Claims;
use crate::AppState;

#[axum::debug_handler]
pub async fn start_test(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<StartTestRequest>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let (session, questions) = state
        .session_service
        .start_session(
            user_id,
            payload.course_id,
            payload.question_count,
            payload.duration,
            None,
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(SessionResponse::from_parts(session, questions)),
    ))
}

#[axum::debug_handler]
pub async fn submit_test(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(session_id): Path<Uuid>,
    Json(payload): Json<SubmitTestRequest>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let session = state
        .session_service
        .submit_session(session_id, user_id, &payload.answers)
        .await?;
    let questions = state.session_service.session_questions(session.id).await?;
    Ok(Json(SessionResponse::from_parts(session, questions)))
}

#[axum::debug_handler]
pub async fn history(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let sessions = state.session_service.history(user_id).await?;
    Ok(Json(sessions))
}

#[axum::debug_handler]
pub async fn session_detail(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(session_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let session = state
        .session_service
        .get_owned_session(session_id, user_id)
        .await?;
    let questions = state.session_service.session_questions(session.id).await?;
    Ok(Json(SessionResponse::from_parts(session, questions)))
}
