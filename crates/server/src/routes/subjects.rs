use axum::{Json, extract::Path};
use database::db::create_connection;
use database::services::catalog::CatalogService;
use models::node_id::NodeId;

use crate::dtos::catalog::SubjectResponse;
use crate::error::ApiError;

/// List subjects under a semester, sorted by name
#[utoipa::path(
    get,
    path = "/api/subjects/semester/{semester_id}",
    params(("semester_id" = String, Path, description = "Semester ID")),
    responses(
        (status = 200, description = "List of subjects", body = [SubjectResponse]),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Subjects"
)]
pub async fn list_by_semester(
    Path(semester_id): Path<String>,
) -> Result<Json<Vec<SubjectResponse>>, ApiError> {
    let db = create_connection().await?;

    let subjects =
        CatalogService::list_subjects_by_semester(&db, &NodeId::parse(semester_id)).await?;

    Ok(Json(
        subjects.into_iter().map(SubjectResponse::from).collect(),
    ))
}

/// Get a single subject by ID
#[utoipa::path(
    get,
    path = "/api/subjects/{id}",
    params(("id" = String, Path, description = "Subject ID")),
    responses(
        (status = 200, description = "Subject found", body = SubjectResponse),
        (status = 404, description = "Subject not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Subjects"
)]
pub async fn get_subject(Path(id): Path<String>) -> Result<Json<SubjectResponse>, ApiError> {
    let db = create_connection().await?;

    let subject = CatalogService::get_subject(&db, &NodeId::parse(id)).await?;

    Ok(Json(SubjectResponse::from(subject)))
}
