use axum::{Extension, Json, extract::Path};
use database::db::create_connection;
use database::services::catalog::CatalogService;
use database::services::user::UserService;
use models::node_id::NodeId;
use tower_oauth2_resource_server::claims::DefaultClaims;

use crate::dtos::catalog::{CollegeResponse, SelectCollegeResponse};
use crate::error::ApiError;
use crate::routes::principal;

/// List all colleges, sorted by name
#[utoipa::path(
    get,
    path = "/api/colleges",
    responses(
        (status = 200, description = "List of colleges", body = [CollegeResponse]),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Colleges"
)]
pub async fn list_colleges() -> Result<Json<Vec<CollegeResponse>>, ApiError> {
    let db = create_connection().await?;

    let colleges = CatalogService::list_colleges(&db).await?;

    Ok(Json(
        colleges.into_iter().map(CollegeResponse::from).collect(),
    ))
}

/// Get a single college by ID
#[utoipa::path(
    get,
    path = "/api/colleges/{id}",
    params(("id" = String, Path, description = "College ID")),
    responses(
        (status = 200, description = "College found", body = CollegeResponse),
        (status = 404, description = "College not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Colleges"
)]
pub async fn get_college(Path(id): Path<String>) -> Result<Json<CollegeResponse>, ApiError> {
    let db = create_connection().await?;

    let college = CatalogService::get_college(&db, &NodeId::parse(id)).await?;

    Ok(Json(CollegeResponse::from(college)))
}

/// Select a college for the authenticated user
#[utoipa::path(
    post,
    path = "/api/colleges/{id}/select",
    params(("id" = String, Path, description = "College ID")),
    responses(
        (status = 200, description = "College selected", body = SelectCollegeResponse),
        (status = 404, description = "College not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Colleges"
)]
pub async fn select_college(
    claims: Extension<DefaultClaims>,
    Path(id): Path<String>,
) -> Result<Json<SelectCollegeResponse>, ApiError> {
    let subject = principal(&claims)?;
    let db = create_connection().await?;

    // Resolve first so a dangling pointer is never written; the stored id is
    // the row's canonical one, whatever encoding the caller used.
    let college = CatalogService::get_college(&db, &NodeId::parse(id)).await?;
    let user = UserService::select_college(&db, subject, &college.id).await?;

    Ok(Json(SelectCollegeResponse {
        message: "College selected successfully".to_owned(),
        subject: user.subject,
        college_id: user.college_id,
    }))
}
