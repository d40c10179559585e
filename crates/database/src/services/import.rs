use chrono::Utc;
use log::warn;
use models::document::DocumentSource;
use sea_orm::ActiveValue::Set;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, IntoActiveModel, QueryFilter,
};
use uuid::Uuid;

use crate::entities::{college, course, semester, subject, unit};
use crate::error::StoreError;

/// Write side of the catalog, used by seed/import tooling only.
///
/// Every operation is an upsert keyed by a natural (parent, key) pair, so
/// tooling can be re-run against partially-populated data: nothing is ever
/// duplicated, and mutable attributes (names, descriptions, file
/// references) are repaired in place. A uniqueness conflict from a racing
/// run is recovered by re-reading the winner's row, never surfaced.
pub struct ImportService;

impl ImportService {
    /// Colleges are keyed by display name.
    pub async fn upsert_college(
        db: &DatabaseConnection,
        name: &str,
    ) -> Result<college::Model, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation {
                entity: "college",
                field: "name",
            });
        }

        if let Some(existing) = find_college(db, name).await? {
            return Ok(existing);
        }

        let now = Utc::now().naive_utc();
        let active = college::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            name: Set(name.to_owned()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match active.insert(db).await {
            Ok(created) => Ok(created),
            Err(err) if StoreError::is_duplicate(&err) => {
                find_college(db, name)
                    .await?
                    .ok_or(StoreError::DuplicateKey {
                        entity: "college",
                        parent: "-".to_owned(),
                        key: name.to_owned(),
                    })
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Courses are keyed by (college, name); `code` is mutable.
    pub async fn upsert_course(
        db: &DatabaseConnection,
        college_id: &str,
        name: &str,
        code: Option<&str>,
    ) -> Result<course::Model, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation {
                entity: "course",
                field: "name",
            });
        }

        if let Some(existing) = course::Entity::find()
            .filter(course::Column::CollegeId.eq(college_id))
            .filter(course::Column::Name.eq(name))
            .one(db)
            .await?
        {
            let mut active = existing.into_active_model();
            active.code = Set(code.map(str::to_owned));
            active.updated_at = Set(Utc::now().naive_utc());
            return Ok(active.update(db).await?);
        }

        let now = Utc::now().naive_utc();
        let active = course::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            college_id: Set(college_id.to_owned()),
            name: Set(name.to_owned()),
            code: Set(code.map(str::to_owned)),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(active.insert(db).await?)
    }

    /// Semesters are keyed by (course, number). Rows written before
    /// semesters were course-scoped carry only the college; those are
    /// adopted in place rather than duplicated.
    pub async fn upsert_semester(
        db: &DatabaseConnection,
        college_id: &str,
        course_id: &str,
        number: i32,
        name: Option<&str>,
    ) -> Result<semester::Model, StoreError> {
        if number < 1 {
            return Err(StoreError::Validation {
                entity: "semester",
                field: "number",
            });
        }
        let display = name
            .map(str::to_owned)
            .unwrap_or_else(|| format!("Semester {number}"));

        if let Some(existing) = find_semester(db, course_id, number).await? {
            return update_semester(db, existing, college_id, course_id, &display).await;
        }

        if let Some(legacy) = semester::Entity::find()
            .filter(semester::Column::CollegeId.eq(college_id))
            .filter(semester::Column::Number.eq(number))
            .filter(semester::Column::CourseId.is_null())
            .one(db)
            .await?
        {
            return update_semester(db, legacy, college_id, course_id, &display).await;
        }

        let now = Utc::now().naive_utc();
        let active = semester::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            college_id: Set(college_id.to_owned()),
            course_id: Set(Some(course_id.to_owned())),
            number: Set(number),
            name: Set(display.clone()),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match active.insert(db).await {
            Ok(created) => Ok(created),
            Err(err) if StoreError::is_duplicate(&err) => {
                match find_semester(db, course_id, number).await? {
                    Some(existing) => {
                        update_semester(db, existing, college_id, course_id, &display).await
                    }
                    None => {
                        // A conflict with no course-scoped row means another
                        // uniqueness constraint fired, e.g. a stale
                        // college-scoped index left over from before the
                        // re-scope migration ran.
                        warn!(
                            "semester ({course_id}, {number}) hit a uniqueness conflict but no \
                             course-scoped row exists; check for a stale semester index"
                        );
                        Err(StoreError::DuplicateKey {
                            entity: "semester",
                            parent: course_id.to_owned(),
                            key: number.to_string(),
                        })
                    }
                }
            }
            Err(err) => Err(err.into()),
        }
    }

    /// Subjects are keyed by (semester, name); `code` is mutable.
    pub async fn upsert_subject(
        db: &DatabaseConnection,
        semester_id: &str,
        name: &str,
        code: Option<&str>,
    ) -> Result<subject::Model, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation {
                entity: "subject",
                field: "name",
            });
        }

        if let Some(existing) = subject::Entity::find()
            .filter(subject::Column::SemesterId.eq(semester_id))
            .filter(subject::Column::Name.eq(name))
            .one(db)
            .await?
        {
            let mut active = existing.into_active_model();
            active.code = Set(code.map(str::to_owned));
            active.updated_at = Set(Utc::now().naive_utc());
            return Ok(active.update(db).await?);
        }

        let now = Utc::now().naive_utc();
        let active = subject::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            semester_id: Set(semester_id.to_owned()),
            name: Set(name.to_owned()),
            code: Set(code.map(str::to_owned)),
            created_at: Set(now),
            updated_at: Set(now),
        };
        Ok(active.insert(db).await?)
    }

    /// Units are keyed by (subject, number). Name, description and the
    /// document reference are mutable; identity and numbering are not.
    pub async fn upsert_unit(
        db: &DatabaseConnection,
        subject_id: &str,
        number: i32,
        name: &str,
        description: Option<&str>,
        source: Option<&DocumentSource>,
    ) -> Result<unit::Model, StoreError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(StoreError::Validation {
                entity: "unit",
                field: "name",
            });
        }
        if number < 1 {
            return Err(StoreError::Validation {
                entity: "unit",
                field: "number",
            });
        }

        if let Some(existing) = find_unit(db, subject_id, number).await? {
            return update_unit(db, existing, name, description, source).await;
        }

        let now = Utc::now().naive_utc();
        let active = unit::ActiveModel {
            id: Set(Uuid::new_v4().to_string()),
            subject_id: Set(subject_id.to_owned()),
            name: Set(name.to_owned()),
            number: Set(number),
            backend: Set(source.map(|s| s.backend().to_owned())),
            file_ref: Set(source.map(|s| s.reference().to_owned())),
            description: Set(description.map(str::to_owned)),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match active.insert(db).await {
            Ok(created) => Ok(created),
            Err(err) if StoreError::is_duplicate(&err) => {
                match find_unit(db, subject_id, number).await? {
                    Some(existing) => update_unit(db, existing, name, description, source).await,
                    None => Err(StoreError::DuplicateKey {
                        entity: "unit",
                        parent: subject_id.to_owned(),
                        key: number.to_string(),
                    }),
                }
            }
            Err(err) => Err(err.into()),
        }
    }
}

async fn find_college(
    db: &DatabaseConnection,
    name: &str,
) -> Result<Option<college::Model>, sea_orm::DbErr> {
    college::Entity::find()
        .filter(college::Column::Name.eq(name))
        .one(db)
        .await
}

async fn find_semester(
    db: &DatabaseConnection,
    course_id: &str,
    number: i32,
) -> Result<Option<semester::Model>, sea_orm::DbErr> {
    semester::Entity::find()
        .filter(semester::Column::CourseId.eq(course_id))
        .filter(semester::Column::Number.eq(number))
        .one(db)
        .await
}

async fn find_unit(
    db: &DatabaseConnection,
    subject_id: &str,
    number: i32,
) -> Result<Option<unit::Model>, sea_orm::DbErr> {
    unit::Entity::find()
        .filter(unit::Column::SubjectId.eq(subject_id))
        .filter(unit::Column::Number.eq(number))
        .one(db)
        .await
}

async fn update_semester(
    db: &DatabaseConnection,
    existing: semester::Model,
    college_id: &str,
    course_id: &str,
    name: &str,
) -> Result<semester::Model, StoreError> {
    let mut active = existing.into_active_model();
    active.college_id = Set(college_id.to_owned());
    active.course_id = Set(Some(course_id.to_owned()));
    active.name = Set(name.to_owned());
    active.updated_at = Set(Utc::now().naive_utc());
    Ok(active.update(db).await?)
}

async fn update_unit(
    db: &DatabaseConnection,
    existing: unit::Model,
    name: &str,
    description: Option<&str>,
    source: Option<&DocumentSource>,
) -> Result<unit::Model, StoreError> {
    let mut active = existing.into_active_model();
    active.name = Set(name.to_owned());
    active.description = Set(description.map(str::to_owned));
    active.backend = Set(source.map(|s| s.backend().to_owned()));
    active.file_ref = Set(source.map(|s| s.reference().to_owned()));
    active.updated_at = Set(Utc::now().naive_utc());
    Ok(active.update(db).await?)
}

#[cfg(test)]
mod test {
    use super::ImportService;
    use crate::entities::{semester, subject, unit};
    use crate::error::StoreError;
    use chrono::NaiveDate;
    use models::document::DocumentSource;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn stamp() -> chrono::NaiveDateTime {
        NaiveDate::from_ymd_opt(2025, 8, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_blank_subject_name_is_rejected_before_any_query() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = ImportService::upsert_subject(&db, "sem-1", "   ", None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Validation {
                entity: "subject",
                field: "name"
            }
        ));
        assert!(db.into_transaction_log().is_empty());
    }

    #[tokio::test]
    async fn test_second_run_updates_in_place() {
        let existing = subject::Model {
            id: "subj-1".to_owned(),
            semester_id: "sem-1".to_owned(),
            name: "Databases".to_owned(),
            code: None,
            created_at: stamp(),
            updated_at: stamp(),
        };
        let updated = subject::Model {
            code: Some("BCG-302".to_owned()),
            ..existing.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing]])
            .append_query_results([vec![updated]])
            .into_connection();

        let row = ImportService::upsert_subject(&db, "sem-1", "Databases", Some("BCG-302"))
            .await
            .unwrap();

        // Identity is preserved; only the mutable attribute moved.
        assert_eq!(row.id, "subj-1");
        assert_eq!(row.code.as_deref(), Some("BCG-302"));
    }

    #[tokio::test]
    async fn test_legacy_college_scoped_semester_is_adopted() {
        let legacy = semester::Model {
            id: "sem-legacy".to_owned(),
            college_id: "college-1".to_owned(),
            course_id: None,
            number: 3,
            name: "Semester 3".to_owned(),
            created_at: stamp(),
            updated_at: stamp(),
        };
        let adopted = semester::Model {
            course_id: Some("course-1".to_owned()),
            ..legacy.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<semester::Model>::new()])
            .append_query_results([vec![legacy]])
            .append_query_results([vec![adopted]])
            .into_connection();

        let row = ImportService::upsert_semester(&db, "college-1", "course-1", 3, None)
            .await
            .unwrap();

        assert_eq!(row.id, "sem-legacy");
        assert_eq!(row.course_id.as_deref(), Some("course-1"));
        assert_eq!(db.into_transaction_log().len(), 3);
    }

    #[tokio::test]
    async fn test_unit_description_update_keeps_identity_and_number() {
        let existing = unit::Model {
            id: "unit-1".to_owned(),
            subject_id: "subj-1".to_owned(),
            name: "Unit 1: Introduction".to_owned(),
            number: 1,
            backend: Some("remote".to_owned()),
            file_ref: Some("notes/db/u1.pdf".to_owned()),
            description: None,
            created_at: stamp(),
            updated_at: stamp(),
        };
        let updated = unit::Model {
            description: Some("Relational model basics".to_owned()),
            ..existing.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing]])
            .append_query_results([vec![updated]])
            .into_connection();

        let source = DocumentSource::RemoteKey("notes/db/u1.pdf".to_owned());
        let row = ImportService::upsert_unit(
            &db,
            "subj-1",
            1,
            "Unit 1: Introduction",
            Some("Relational model basics"),
            Some(&source),
        )
        .await
        .unwrap();

        assert_eq!(row.id, "unit-1");
        assert_eq!(row.number, 1);
        assert_eq!(row.description.as_deref(), Some("Relational model basics"));
    }

    #[tokio::test]
    async fn test_semester_number_zero_is_rejected() {
        let db = MockDatabase::new(DatabaseBackend::Postgres).into_connection();

        let err = ImportService::upsert_semester(&db, "college-1", "course-1", 0, None)
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::Validation {
                entity: "semester",
                field: "number"
            }
        ));
    }
}
