use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A single four-option multiple-choice item. `correct_option` is one of
/// A/B/C/D (stored as entered, compared case-insensitively). Items created by
/// bulk upload start out `pending` and carry `uploaded_by`/`source_file`;
/// admin-entered items are `approved` from the start.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Question {
    pub id: Uuid,
    pub course_id: Uuid,
    pub question_text: String,
    pub option_a: String,
    pub option_b: String,
    pub option_c: String,
    pub option_d: String,
    pub correct_option: String,
    pub status: String,
    pub uploaded_by: Option<Uuid>,
    pub source_file: Option<String>,
    pub created_at: DateTime<Utc>,
}

pub const STATUS_PENDING: &str = "pending";
pub const STATUS_APPROVED: &str = "approved";
pub const STATUS_REJECTED: &str = "rejected";

pub fn is_valid_option_letter(letter: &str) -> bool {
    matches!(letter.to_ascii_uppercase().as_str(), "A" | "B" | "C" | "D")
}
