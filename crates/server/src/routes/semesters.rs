use axum::{Extension, Json, extract::Path};
use database::db::create_connection;
use database::services::catalog::CatalogService;
use database::services::user::UserService;
use models::node_id::NodeId;
use tower_oauth2_resource_server::claims::DefaultClaims;

use crate::dtos::catalog::SemesterResponse;
use crate::error::ApiError;
use crate::routes::principal;

/// List semesters under a course, sorted by number
#[utoipa::path(
    get,
    path = "/api/semesters/course/{course_id}",
    params(("course_id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "List of semesters", body = [SemesterResponse]),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Semesters"
)]
pub async fn list_by_course(
    Path(course_id): Path<String>,
) -> Result<Json<Vec<SemesterResponse>>, ApiError> {
    let db = create_connection().await?;

    let semesters =
        CatalogService::list_semesters_by_course(&db, &NodeId::parse(course_id)).await?;

    Ok(Json(
        semesters.into_iter().map(SemesterResponse::from).collect(),
    ))
}

/// List semesters under a college: the union across all of its courses.
/// Deprecated in favor of the course-scoped listing.
#[utoipa::path(
    get,
    path = "/api/semesters/college/{college_id}",
    params(("college_id" = String, Path, description = "College ID")),
    responses(
        (status = 200, description = "List of semesters", body = [SemesterResponse]),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Semesters"
)]
pub async fn list_by_college(
    Path(college_id): Path<String>,
) -> Result<Json<Vec<SemesterResponse>>, ApiError> {
    let db = create_connection().await?;

    let semesters =
        CatalogService::list_semesters_by_college(&db, &NodeId::parse(college_id)).await?;

    Ok(Json(
        semesters.into_iter().map(SemesterResponse::from).collect(),
    ))
}

/// List semesters for the authenticated user's selected college
#[utoipa::path(
    get,
    path = "/api/semesters",
    responses(
        (status = 200, description = "List of semesters", body = [SemesterResponse]),
        (status = 400, description = "No college selected"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Semesters"
)]
pub async fn list_for_selected_college(
    claims: Extension<DefaultClaims>,
) -> Result<Json<Vec<SemesterResponse>>, ApiError> {
    let subject = principal(&claims)?;
    let db = create_connection().await?;

    let college_id = UserService::get(&db, subject)
        .await?
        .and_then(|user| user.college_id)
        .ok_or_else(|| ApiError::Precondition("Please select a college first".to_owned()))?;

    let semesters =
        CatalogService::list_semesters_by_college(&db, &NodeId::parse(college_id)).await?;

    Ok(Json(
        semesters.into_iter().map(SemesterResponse::from).collect(),
    ))
}

/// Get a single semester by ID
#[utoipa::path(
    get,
    path = "/api/semesters/{id}",
    params(("id" = String, Path, description = "Semester ID")),
    responses(
        (status = 200, description = "Semester found", body = SemesterResponse),
        (status = 404, description = "Semester not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Semesters"
)]
pub async fn get_semester(Path(id): Path<String>) -> Result<Json<SemesterResponse>, ApiError> {
    let db = create_connection().await?;

    let semester = CatalogService::get_semester(&db, &NodeId::parse(id)).await?;

    Ok(Json(SemesterResponse::from(semester)))
}
