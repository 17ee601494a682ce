use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialDownloadResponse {
    pub download_url: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MaterialSearchParams {
    #[serde(default)]
    pub query: String,
}
