use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde::Deserialize;
use uuid::Uuid;
use validator::Validate;

use crate::error::Result;
use crate::AppState;

#[axum::debug_handler]
pub async fn list_courses(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let courses = state.question_service.list_courses().await?;
    Ok(Json(courses))
}

#[derive(Debug, Deserialize, Validate)]
pub struct CreateCourseRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
}

#[axum::debug_handler]
pub async fn create_course(
    State(state): State<AppState>,
    Json(payload): Json<CreateCourseRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let course = state.question_service.create_course(&payload.name).await?;
    Ok((StatusCode::CREATED, Json(course)))
}

#[derive(Debug, Deserialize, Validate)]
pub struct AddQuestionRequest {
    pub course_id: Uuid,
    #[validate(length(min = 1))]
    pub question_text: String,
    #[validate(length(min = 1))]
    pub option_a: String,
    #[validate(length(min = 1))]
    pub option_b: String,
    #[validate(length(min = 1))]
    pub option_c: String,
    #[validate(length(min = 1))]
    pub option_d: String,
    #[validate(length(min = 1, max = 1))]
    pub correct_option: String,
}

#[axum::debug_handler]
pub async fn add_question(
    State(state): State<AppState>,
    Json(payload): Json<AddQuestionRequest>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let question = state
        .question_service
        .add_question(
            payload.course_id,
            &payload.question_text,
            [
                &payload.option_a,
                &payload.option_b,
                &payload.option_c,
                &payload.option_d,
            ],
            &payload.correct_option,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(question)))
}
