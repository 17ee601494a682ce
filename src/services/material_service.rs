use crate::error::{Error, Result};
use crate::models::material::Material;
use sqlx::PgPool;
use uuid::Uuid;

#[derive(Clone)]
pub struct MaterialService {
    pool: PgPool,
    uploads_dir: String,
}

impl MaterialService {
    pub fn new(pool: PgPool, uploads_dir: String) -> Self {
        Self { pool, uploads_dir }
    }

    /// Writes the file under the uploads dir (served statically) and records
    /// the metadata row pointing at it.
    pub async fn upload(
        &self,
        name: &str,
        course_id: Uuid,
        uploaded_by: Uuid,
        tags: &str,
        original_filename: &str,
        data: &[u8],
    ) -> Result<Material> {
        if data.is_empty() {
            return Err(Error::BadRequest("No file provided".to_string()));
        }

        let extension = std::path::Path::new(original_filename)
            .extension()
            .and_then(|s| s.to_str())
            .map(|s| s.to_lowercase())
            .unwrap_or_else(|| "bin".to_string());

        let dir = format!("{}/materials", self.uploads_dir);
        tokio::fs::create_dir_all(&dir).await?;
        let file_path = format!("{}/{}.{}", dir, Uuid::new_v4(), extension);
        tokio::fs::write(&file_path, data).await?;

        let material = sqlx::query_as::<_, Material>(
            r#"
            INSERT INTO materials (name, course_id, uploaded_by, file_path, tags)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(course_id)
        .bind(uploaded_by)
        .bind(&file_path)
        .bind(tags)
        .fetch_one(&self.pool)
        .await?;
        Ok(material)
    }

    /// The URL the static file layer resolves for this material.
    pub async fn download_url(&self, material_id: Uuid) -> Result<String> {
        let material = sqlx::query_as::<_, Material>(r#"SELECT * FROM materials WHERE id = $1"#)
            .bind(material_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| Error::NotFound("Material not found".to_string()))?;
        Ok(format!("/{}", material.file_path.trim_start_matches('/')))
    }

    pub async fn search(&self, query: &str) -> Result<Vec<Material>> {
        if query.trim().is_empty() {
            return Ok(Vec::new());
        }
        let pattern = format!("%{}%", query.trim());
        let materials = sqlx::query_as::<_, Material>(
            r#"
            SELECT m.* FROM materials m
            JOIN courses c ON c.id = m.course_id
            WHERE m.name ILIKE $1 OR m.tags ILIKE $1 OR c.name ILIKE $1
            ORDER BY m.uploaded_at DESC
            "#,
        )
        .bind(pattern)
        .fetch_all(&self.pool)
        .await?;
        Ok(materials)
    }
}
