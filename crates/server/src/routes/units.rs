use axum::response::{IntoResponse, Response};
use axum::{Json, extract::Path};
use database::db::create_connection;
use database::services::catalog::CatalogService;
use models::document::DocumentSource;
use models::node_id::NodeId;

use crate::dtos::catalog::{DocumentLinkResponse, UnitResponse};
use crate::error::ApiError;
use crate::storage;

/// List units under a subject, sorted by number
#[utoipa::path(
    get,
    path = "/api/units/subject/{subject_id}",
    params(("subject_id" = String, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "List of units", body = [UnitResponse]),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Units"
)]
pub async fn list_by_subject(
    Path(subject_id): Path<String>,
) -> Result<Json<Vec<UnitResponse>>, ApiError> {
    let db = create_connection().await?;

    let units = CatalogService::list_units_by_subject(&db, &NodeId::parse(subject_id)).await?;

    Ok(Json(units.into_iter().map(UnitResponse::from).collect()))
}

/// Get a single unit by ID
#[utoipa::path(
    get,
    path = "/api/units/{id}",
    params(("id" = String, Path, description = "Unit ID")),
    responses(
        (status = 200, description = "Unit found", body = UnitResponse),
        (status = 404, description = "Unit not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Units"
)]
pub async fn get_unit(Path(id): Path<String>) -> Result<Json<UnitResponse>, ApiError> {
    let db = create_connection().await?;

    let unit = CatalogService::get_unit(&db, &NodeId::parse(id)).await?;

    Ok(Json(UnitResponse::from(unit)))
}

/// Fetch a unit's document: a direct PDF stream for locally stored files,
/// or a JSON payload with a short-lived signed URL for remote ones
#[utoipa::path(
    get,
    path = "/api/units/{id}/document",
    params(("id" = String, Path, description = "Unit ID")),
    responses(
        (status = 200, description = "PDF stream or signed link", body = DocumentLinkResponse),
        (status = 400, description = "Unit has no document configured"),
        (status = 404, description = "Unit or document not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Units"
)]
pub async fn get_unit_document(Path(id): Path<String>) -> Result<Response, ApiError> {
    let db = create_connection().await?;

    let unit = CatalogService::get_unit(&db, &NodeId::parse(id)).await?;

    let source = DocumentSource::from_columns(unit.backend.as_deref(), unit.file_ref.as_deref())
        .ok_or_else(|| {
            ApiError::Precondition(format!("unit {} has no document configured", unit.id))
        })?;

    match source {
        DocumentSource::LocalPath(path) => storage::local::stream_document(&path).await,
        DocumentSource::RemoteKey(key) => {
            let link = storage::remote::sign_document_url(&key).await?;
            Ok(Json(link).into_response())
        }
    }
}
