use crate::models::question::Question;
use crate::models::test_session::TestSession;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StartTestRequest {
    pub course_id: Uuid,
    pub question_count: usize,
    /// Allotted time in seconds.
    pub duration: i32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitTestRequest {
    /// Question id (string form) to submitted option letter.
    #[serde(default)]
    pub answers: HashMap<String, String>,
}

/// A question as shown to a test taker: option text only, no answer key.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QuestionPublic {
    pub id: Uuid,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
}

impl From<Question> for QuestionPublic {
    fn from(q: Question) -> Self {
        Self {
            id: q.id,
            question_text: q.question_text,
            option_a: q.option_a,
            option_b: q.option_b,
            option_c: q.option_c,
            option_d: q.option_d,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionResponse {
    pub id: Uuid,
    pub course_id: Uuid,
    pub group_test_id: Option<Uuid>,
    pub duration: i32,
    pub question_count: i32,
    pub score: Option<i32>,
    pub start_time: chrono::DateTime<chrono::Utc>,
    pub end_time: Option<chrono::DateTime<chrono::Utc>>,
    pub questions: Vec<QuestionPublic>,
}

impl SessionResponse {
    pub fn from_parts(session: TestSession, questions: Vec<Question>) -> Self {
        Self {
            id: session.id,
            course_id: session.course_id,
            group_test_id: session.group_test_id,
            duration: session.duration,
            question_count: session.question_count,
            score: session.score,
            start_time: session.start_time,
            end_time: session.end_time,
            questions: questions.into_iter().map(QuestionPublic::from).collect(),
        }
    }
}
