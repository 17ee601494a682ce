use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A scheduled template: once `scheduled_start` has elapsed, any participant
/// requesting it gets a materialized test session drawn from the course pool.
/// Holds no questions or sessions of its own. Immutable after creation.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct GroupTest {
    pub id: Uuid,
    pub name: String,
    pub course_id: Uuid,
    pub question_count: i32,
    pub duration_minutes: i32,
    pub created_by: Uuid,
    /// Comma-separated invitee addresses, as entered at creation.
    pub invitees: String,
    pub scheduled_start: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
}
