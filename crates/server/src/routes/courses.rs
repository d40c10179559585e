use axum::{Json, extract::Path};
use database::db::create_connection;
use database::services::catalog::CatalogService;
use models::node_id::NodeId;

use crate::dtos::catalog::CourseResponse;
use crate::error::ApiError;

/// List courses under a college, sorted by name
#[utoipa::path(
    get,
    path = "/api/courses/college/{college_id}",
    params(("college_id" = String, Path, description = "College ID")),
    responses(
        (status = 200, description = "List of courses", body = [CourseResponse]),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn list_courses(
    Path(college_id): Path<String>,
) -> Result<Json<Vec<CourseResponse>>, ApiError> {
    let db = create_connection().await?;

    let courses = CatalogService::list_courses_by_college(&db, &NodeId::parse(college_id)).await?;

    Ok(Json(courses.into_iter().map(CourseResponse::from).collect()))
}

/// Get a single course by ID
#[utoipa::path(
    get,
    path = "/api/courses/{id}",
    params(("id" = String, Path, description = "Course ID")),
    responses(
        (status = 200, description = "Course found", body = CourseResponse),
        (status = 404, description = "Course not found"),
        (status = 500, description = "Internal server error")
    ),
    security(("jwt" = [])),
    tag = "Courses"
)]
pub async fn get_course(Path(id): Path<String>) -> Result<Json<CourseResponse>, ApiError> {
    let db = create_connection().await?;

    let course = CatalogService::get_course(&db, &NodeId::parse(id)).await?;

    Ok(Json(CourseResponse::from(course)))
}
