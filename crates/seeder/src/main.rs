mod manifest;

use std::error::Error;

use database::db::create_connection;
use database::services::import::ImportService;
use futures::future::try_join_all;
use log::{info, warn};
use migration::{Migrator, MigratorTrait};
use models::document::{DOCUMENT_MIME, DocumentSource};

use crate::manifest::{SeedCatalog, SeedFile, SeedUnit};

type BoxError = Box<dyn Error>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    dotenvy::dotenv().ok();
    env_logger::init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "seed/catalog.json".to_owned());
    let raw = std::fs::read_to_string(&path)
        .map_err(|err| format!("failed to read manifest {path}: {err}"))?;
    let catalog: SeedCatalog = serde_json::from_str(&raw)
        .map_err(|err| format!("failed to parse manifest {path}: {err}"))?;

    let db = create_connection().await?;

    // Schema first: imports below rely on the course-scoped semester key
    // being the live one.
    Migrator::up(&db, None).await?;

    let aws_config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let s3 = aws_sdk_s3::Client::new(&aws_config);

    let mut units_total = 0usize;
    for college in &catalog.colleges {
        let college_row = ImportService::upsert_college(&db, &college.name).await?;
        info!("college: {}", college_row.name);

        for course in &college.courses {
            let course_row =
                ImportService::upsert_course(&db, &college_row.id, &course.name, course.code.as_deref())
                    .await?;
            info!("  course: {}", course_row.name);

            for semester in &course.semesters {
                let semester_row = ImportService::upsert_semester(
                    &db,
                    &college_row.id,
                    &course_row.id,
                    semester.number,
                    semester.name.as_deref(),
                )
                .await?;

                for subject in &semester.subjects {
                    let subject_row = ImportService::upsert_subject(
                        &db,
                        &semester_row.id,
                        &subject.name,
                        subject.code.as_deref(),
                    )
                    .await?;
                    info!("    subject: {} ({})", subject_row.name, semester_row.name);

                    // Publish all of the subject's documents, then record
                    // each unit with its final reference.
                    let publishes = subject.units.iter().map(|unit| publish(&s3, unit));
                    let sources = try_join_all(publishes).await?;

                    for (unit, source) in subject.units.iter().zip(sources.iter()) {
                        ImportService::upsert_unit(
                            &db,
                            &subject_row.id,
                            unit.number,
                            &unit.name,
                            unit.description.as_deref(),
                            source.as_ref(),
                        )
                        .await?;
                        units_total += 1;
                    }
                }
            }
        }
    }

    info!("seed completed: {units_total} units recorded");
    Ok(())
}

/// Resolves a unit's manifest entry to its stored document source,
/// uploading to the bucket first when asked to.
async fn publish(
    s3: &aws_sdk_s3::Client,
    unit: &SeedUnit,
) -> Result<Option<DocumentSource>, BoxError> {
    match &unit.file {
        None => {
            warn!("unit {} has no document in the manifest", unit.name);
            Ok(None)
        }
        Some(SeedFile::Local { path }) => Ok(Some(DocumentSource::LocalPath(path.clone()))),
        Some(SeedFile::Remote { key, upload_from }) => {
            if let Some(local) = upload_from {
                let bucket = std::env::var("AWS_BUCKET_NAME")
                    .map_err(|_| "AWS_BUCKET_NAME is not set but the manifest uploads to it")?;
                let bytes = tokio::fs::read(local)
                    .await
                    .map_err(|err| format!("failed to read {local}: {err}"))?;

                s3.put_object()
                    .bucket(&bucket)
                    .key(key)
                    .body(bytes.into())
                    .content_type(DOCUMENT_MIME)
                    .send()
                    .await
                    .map_err(|err| format!("failed to upload {key}: {err}"))?;

                info!("      uploaded {key}");
            }
            Ok(Some(DocumentSource::RemoteKey(key.clone())))
        }
    }
}
