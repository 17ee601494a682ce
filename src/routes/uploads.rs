use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use crate::dto::upload_dto::{BulkUploadResponse, UpdateQuestionStatusRequest};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::services::{extract, parser};
use crate::AppState;

/// Bulk question intake: a question-bank file plus the target course id.
/// Everything parsed lands as `pending` and waits for admin review.
#[axum::debug_handler]
pub async fn upload_questions(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;

    let mut course_id: Option<Uuid> = None;
    let mut filename = String::new();
    let mut file_bytes: Option<bytes::Bytes> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "course_id" => {
                let id_str = field.text().await.unwrap_or_default();
                course_id = Uuid::parse_str(id_str.trim()).ok();
            }
            "file" => {
                filename = field.file_name().unwrap_or("questions.bin").to_string();
                let data = field.bytes().await.map_err(|e| {
                    tracing::error!("Failed to read upload bytes: {}", e);
                    Error::BadRequest("Failed to read file upload".into())
                })?;
                if !data.is_empty() {
                    file_bytes = Some(data);
                }
            }
            _ => {}
        }
    }

    let course_id =
        course_id.ok_or_else(|| Error::BadRequest("course_id is required".to_string()))?;
    let data = file_bytes.ok_or_else(|| Error::BadRequest("File is required".to_string()))?;

    let course = state.session_service.get_course(course_id).await?;

    let text = extract::extract_text(&filename, &data)?;
    let parsed = parser::parse_multichoice(&text)?;

    let created = state
        .question_service
        .create_pending_batch(course.id, &parsed, user_id, &filename)
        .await?;

    let uploader = state.user_service.get_user(user_id).await?;
    notify_admins(&state, &uploader.username, &course.name, &filename, created);

    tracing::info!(
        course = %course.name,
        file = %filename,
        created,
        "bulk question upload accepted"
    );

    Ok((
        StatusCode::CREATED,
        Json(BulkUploadResponse {
            questions_created: created,
            course: course.name,
            file: filename,
        }),
    ))
}

fn notify_admins(state: &AppState, uploader: &str, course: &str, file: &str, created: usize) {
    let config = crate::config::get_config();
    state.mailer.send_detached(
        config.admin_emails.clone(),
        format!("New question upload awaiting review: {}", course),
        format!(
            "<p>{uploader} uploaded <b>{file}</b> with {created} questions \
             for <b>{course}</b>.</p>\
             <p>They are pending review in the admin panel.</p>",
        ),
    );
}

#[axum::debug_handler]
pub async fn pending_questions(State(state): State<AppState>) -> Result<impl IntoResponse> {
    let questions = state.question_service.pending_questions().await?;
    Ok(Json(questions))
}

#[axum::debug_handler]
pub async fn update_question_status(
    State(state): State<AppState>,
    Path(question_id): Path<Uuid>,
    Json(payload): Json<UpdateQuestionStatusRequest>,
) -> Result<impl IntoResponse> {
    let question = state
        .question_service
        .set_status(question_id, &payload.status)
        .await?;
    Ok(Json(question))
}

#[axum::debug_handler]
pub async fn upload_stats(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;
    let stats = state.question_service.upload_stats(user_id).await?;
    Ok(Json(stats))
}
