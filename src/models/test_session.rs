use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One user's timed attempt at a fixed, pre-sampled question set.
///
/// `score` and `end_time` are either both null (in progress) or both set
/// (submitted); the submit action is the only transition between the two.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct TestSession {
    pub id: Uuid,
    pub user_id: Uuid,
    pub course_id: Uuid,
    pub group_test_id: Option<Uuid>,
    /// Allotted time in seconds. Informational only, not server-enforced.
    pub duration: i32,
    pub question_count: i32,
    pub score: Option<i32>,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
}

impl TestSession {
    pub fn is_submitted(&self) -> bool {
        self.end_time.is_some()
    }
}
