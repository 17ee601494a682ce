use crate::dto::exam_dto::QuestionPublic;
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateGroupTestRequest {
    #[validate(length(min = 1, max = 200))]
    pub name: String,
    pub course: Uuid,
    pub question_count: i32,
    pub duration_minutes: i32,
    pub invitees: Vec<String>,
    /// ISO-8601; naive timestamps are assumed UTC.
    #[validate(length(min = 1))]
    pub scheduled_start: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CourseSummary {
    pub id: Uuid,
    pub name: String,
}

/// The view/activate payload: descriptive fields always, questions and the
/// materialized session id only once the scheduled start has elapsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupTestView {
    pub id: Uuid,
    pub name: String,
    pub course: CourseSummary,
    pub question_count: i32,
    pub duration_minutes: i32,
    pub scheduled_start: chrono::DateTime<chrono::Utc>,
    pub questions: Vec<QuestionPublic>,
    pub session_id: Option<Uuid>,
}
