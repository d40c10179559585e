use crate::routes::{colleges, courses, health, semesters, subjects, units};
use utoipa::{
    Modify, OpenApi,
    openapi::security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.as_mut().unwrap();
        components.add_security_scheme(
            "jwt",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

/// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        health::health,
        colleges::list_colleges,
        colleges::get_college,
        colleges::select_college,
        courses::list_courses,
        courses::get_course,
        semesters::list_by_course,
        semesters::list_by_college,
        semesters::list_for_selected_college,
        semesters::get_semester,
        subjects::list_by_semester,
        subjects::get_subject,
        units::list_by_subject,
        units::get_unit,
        units::get_unit_document
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Service health endpoints"),
        (name = "Colleges", description = "College related endpoints"),
        (name = "Courses", description = "Course related endpoints"),
        (name = "Semesters", description = "Semester related endpoints"),
        (name = "Subjects", description = "Subject related endpoints"),
        (name = "Units", description = "Unit and document related endpoints"),
    ),
    info(
        title = "Catalog API",
        version = "1.0.0",
        description = "Study materials catalog API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
