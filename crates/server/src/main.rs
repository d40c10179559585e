mod doc;
mod dtos;
mod error;
mod routes;
mod storage;
mod utils;

use axum::{
    Router,
    routing::{get, post},
};
use log::info;
use tower::ServiceBuilder;
use tower_http::compression::CompressionLayer;
use tower_oauth2_resource_server::server::OAuth2ResourceServer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::doc::ApiDoc;
use crate::routes::{colleges, courses, health, semesters, subjects, units};
use crate::utils::shutdown::shutdown_signal;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();
    env_logger::init();

    let issuer_url = std::env::var("OIDC_ISSUER_URL").expect("OIDC_ISSUER_URL is not set");

    let oauth2_resource_server = <OAuth2ResourceServer>::builder()
        .issuer_url(issuer_url.as_str())
        .build()
        .await
        .expect("Failed to build OAuth2ResourceServer");

    let protected = Router::new()
        .route("/colleges", get(colleges::list_colleges))
        .route("/colleges/{id}", get(colleges::get_college))
        .route("/colleges/{id}/select", post(colleges::select_college))
        .route("/courses/college/{college_id}", get(courses::list_courses))
        .route("/courses/{id}", get(courses::get_course))
        .route("/semesters", get(semesters::list_for_selected_college))
        .route(
            "/semesters/course/{course_id}",
            get(semesters::list_by_course),
        )
        .route(
            "/semesters/college/{college_id}",
            get(semesters::list_by_college),
        )
        .route("/semesters/{id}", get(semesters::get_semester))
        .route(
            "/subjects/semester/{semester_id}",
            get(subjects::list_by_semester),
        )
        .route("/subjects/{id}", get(subjects::get_subject))
        .route("/units/subject/{subject_id}", get(units::list_by_subject))
        .route("/units/{id}", get(units::get_unit))
        .route("/units/{id}/document", get(units::get_unit_document))
        .layer(ServiceBuilder::new().layer(oauth2_resource_server.into_layer()));

    let api = Router::new()
        .route("/health", get(health::health))
        .merge(protected);

    let app = Router::new()
        .nest("/api", api)
        .merge(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(CompressionLayer::new());

    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or(5100);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", port))
        .await
        .expect("failed to bind listener");
    info!("Running axum on http://localhost:{port}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("server error");
}
