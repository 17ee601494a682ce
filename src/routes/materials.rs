use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Extension, Json,
};
use uuid::Uuid;

use crate::dto::material_dto::{MaterialDownloadResponse, MaterialSearchParams};
use crate::error::{Error, Result};
use crate::middleware::auth::Claims;
use crate::AppState;

#[axum::debug_handler]
pub async fn upload_material(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let user_id = claims.user_id()?;

    let mut name = String::new();
    let mut course_id: Option<Uuid> = None;
    let mut tags = String::new();
    let mut filename = String::new();
    let mut file_bytes: Option<bytes::Bytes> = None;

    while let Some(field) = multipart.next_field().await? {
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => name = field.text().await.unwrap_or_default(),
            "course_id" => {
                let id_str = field.text().await.unwrap_or_default();
                course_id = Uuid::parse_str(id_str.trim()).ok();
            }
            "tags" => tags = field.text().await.unwrap_or_default(),
            "file" => {
                filename = field.file_name().unwrap_or("material.bin").to_string();
                let data = field.bytes().await.map_err(|e| {
                    tracing::error!("Failed to read material bytes: {}", e);
                    Error::BadRequest("Failed to read file upload".into())
                })?;
                if !data.is_empty() {
                    file_bytes = Some(data);
                }
            }
            _ => {}
        }
    }

    if name.is_empty() {
        return Err(Error::BadRequest("Name is required".into()));
    }
    let course_id = course_id.ok_or_else(|| Error::BadRequest("course_id is required".into()))?;
    let data = file_bytes.ok_or_else(|| Error::BadRequest("File is required".into()))?;

    let course = state.session_service.get_course(course_id).await?;
    let material = state
        .material_service
        .upload(&name, course.id, user_id, &tags, &filename, &data)
        .await?;

    Ok((StatusCode::CREATED, Json(material)))
}

#[axum::debug_handler]
pub async fn download_material(
    State(state): State<AppState>,
    Path(material_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let download_url = state.material_service.download_url(material_id).await?;
    Ok(Json(MaterialDownloadResponse { download_url }))
}

#[axum::debug_handler]
pub async fn search_materials(
    State(state): State<AppState>,
    Query(params): Query<MaterialSearchParams>,
) -> Result<impl IntoResponse> {
    let materials = state.material_service.search(&params.query).await?;
    Ok(Json(materials))
}
