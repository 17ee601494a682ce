use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Material {
    pub id: Uuid,
    pub name: String,
    pub course_id: Uuid,
    pub uploaded_by: Uuid,
    pub file_path: String,
    pub tags: String,
    pub uploaded_at: DateTime<Utc>,
}
