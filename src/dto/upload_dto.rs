use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BulkUploadResponse {
    pub questions_created: usize,
    pub course: String,
    pub file: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateQuestionStatusRequest {
    pub status: String,
}
