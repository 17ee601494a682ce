use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use chrono::Utc;
use uuid::Uuid;
use validator::Validate;

use crate::dto::exam_dto::QuestionPublic;
use crate::dto::group_test_dto::{CourseSummary, CreateGroupTestRequest, GroupTestView};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::services::group_test_service::NewGroupTest;
use crate::utils::time::parse_iso_utc;
use crate::AppState;

#[axum::debug_handler]
pub async fn create_group_test(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Json(payload): Json<CreateGroupTestRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let user_id = claims.user_id()?;
    let creator = state.user_service.get_user(user_id).await?;

    let scheduled_start = parse_iso_utc(&payload.scheduled_start)
        .map_err(|_| Error::BadRequest("Invalid scheduled_start timestamp".to_string()))?;

    let group_test = state
        .group_test_service
        .create_group_test(
            NewGroupTest {
                name: payload.name,
                course_id: payload.course,
                question_count: payload.question_count,
                duration_minutes: payload.duration_minutes,
                invitees: payload.invitees,
                scheduled_start,
            },
            creator.id,
            &creator.username,
        )
        .await?;

    Ok((StatusCode::CREATED, Json(group_test)))
}

#[axum::debug_handler]
pub async fn view_group_test(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    Path(group_test_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let (group_test, course, materialized) = state
        .group_test_service
        .view_or_activate(group_test_id, user_id, Utc::now())
        .await?;

    let (questions, session_id) = match materialized {
        Some((session, questions)) => (
            questions.into_iter().map(QuestionPublic::from).collect(),
            Some(session.id),
        ),
        None => (Vec::new(), None),
    };

    Ok(Json(GroupTestView {
        id: group_test.id,
        name: group_test.name,
        course: CourseSummary {
            id: course.id,
            name: course.name,
        },
        question_count: group_test.question_count,
        duration_minutes: group_test.duration_minutes,
        scheduled_start: group_test.scheduled_start,
        questions,
        session_id,
    }))
}
