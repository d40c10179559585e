use models::node_id::NodeId;
use sea_orm::{
    ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PrimaryKeyTrait, QueryFilter, QueryOrder,
};

use crate::entities::{college, course, semester, subject, unit};
use crate::error::StoreError;

/// Read side of the catalog: parent-scoped listings with stable sort orders
/// and by-id lookups.
///
/// Every lookup applies the dual-encoding rule from [`NodeId`]: the literal
/// key is tried first, and only when it matches nothing is the canonical
/// UUID form tried. Rows written under either historical encoding stay
/// reachable.
pub struct CatalogService;

impl CatalogService {
    pub async fn list_colleges(db: &DatabaseConnection) -> Result<Vec<college::Model>, StoreError> {
        Ok(college::Entity::find()
            .order_by_asc(college::Column::Name)
            .all(db)
            .await?)
    }

    pub async fn get_college(
        db: &DatabaseConnection,
        id: &NodeId,
    ) -> Result<college::Model, StoreError> {
        find_by_id::<college::Entity>(db, id)
            .await?
            .ok_or(StoreError::NotFound { entity: "college" })
    }

    pub async fn list_courses_by_college(
        db: &DatabaseConnection,
        college: &NodeId,
    ) -> Result<Vec<course::Model>, StoreError> {
        Ok(children_of::<course::Entity, _>(
            db,
            college,
            course::Column::CollegeId,
            course::Column::Name,
        )
        .await?)
    }

    pub async fn get_course(
        db: &DatabaseConnection,
        id: &NodeId,
    ) -> Result<course::Model, StoreError> {
        find_by_id::<course::Entity>(db, id)
            .await?
            .ok_or(StoreError::NotFound { entity: "course" })
    }

    pub async fn list_semesters_by_course(
        db: &DatabaseConnection,
        course: &NodeId,
    ) -> Result<Vec<semester::Model>, StoreError> {
        Ok(children_of::<semester::Entity, _>(
            db,
            course,
            semester::Column::CourseId,
            semester::Column::Number,
        )
        .await?)
    }

    /// Deprecated union view: every semester under every course of the
    /// college, ordered by number with ties broken by creation order. Kept
    /// for callers that have not migrated to course-scoped listing.
    pub async fn list_semesters_by_college(
        db: &DatabaseConnection,
        college: &NodeId,
    ) -> Result<Vec<semester::Model>, StoreError> {
        let fetch = |key: String| {
            semester::Entity::find()
                .filter(semester::Column::CollegeId.eq(key))
                .order_by_asc(semester::Column::Number)
                .order_by_asc(semester::Column::CreatedAt)
                .all(db)
        };

        let rows = fetch(college.literal().to_owned()).await?;
        if !rows.is_empty() {
            return Ok(rows);
        }
        match college.normalized() {
            Some(normalized) => Ok(fetch(normalized).await?),
            None => Ok(rows),
        }
    }

    pub async fn get_semester(
        db: &DatabaseConnection,
        id: &NodeId,
    ) -> Result<semester::Model, StoreError> {
        find_by_id::<semester::Entity>(db, id)
            .await?
            .ok_or(StoreError::NotFound { entity: "semester" })
    }

    pub async fn list_subjects_by_semester(
        db: &DatabaseConnection,
        semester: &NodeId,
    ) -> Result<Vec<subject::Model>, StoreError> {
        Ok(children_of::<subject::Entity, _>(
            db,
            semester,
            subject::Column::SemesterId,
            subject::Column::Name,
        )
        .await?)
    }

    pub async fn get_subject(
        db: &DatabaseConnection,
        id: &NodeId,
    ) -> Result<subject::Model, StoreError> {
        find_by_id::<subject::Entity>(db, id)
            .await?
            .ok_or(StoreError::NotFound { entity: "subject" })
    }

    pub async fn list_units_by_subject(
        db: &DatabaseConnection,
        subject: &NodeId,
    ) -> Result<Vec<unit::Model>, StoreError> {
        Ok(children_of::<unit::Entity, _>(
            db,
            subject,
            unit::Column::SubjectId,
            unit::Column::Number,
        )
        .await?)
    }

    pub async fn get_unit(db: &DatabaseConnection, id: &NodeId) -> Result<unit::Model, StoreError> {
        find_by_id::<unit::Entity>(db, id)
            .await?
            .ok_or(StoreError::NotFound { entity: "unit" })
    }
}

/// By-id lookup with the literal-then-normalized fallback. A malformed id is
/// simply a literal that matches nothing.
async fn find_by_id<E>(db: &DatabaseConnection, id: &NodeId) -> Result<Option<E::Model>, DbErr>
where
    E: EntityTrait,
    <E::PrimaryKey as PrimaryKeyTrait>::ValueType: From<String>,
{
    if let Some(row) = E::find_by_id(id.literal().to_owned()).one(db).await? {
        return Ok(Some(row));
    }
    match id.normalized() {
        Some(normalized) => E::find_by_id(normalized).one(db).await,
        None => Ok(None),
    }
}

/// Parent-scoped listing with the same fallback rule. An empty result set
/// for the literal key triggers one retry with the normalized key; an empty
/// result after that is a valid answer, not an error.
async fn children_of<E, C>(
    db: &DatabaseConnection,
    parent: &NodeId,
    parent_col: C,
    order_col: C,
) -> Result<Vec<E::Model>, DbErr>
where
    E: EntityTrait,
    C: ColumnTrait,
{
    let fetch = |key: String| {
        E::find()
            .filter(parent_col.eq(key))
            .order_by_asc(order_col)
            .all(db)
    };

    let rows = fetch(parent.literal().to_owned()).await?;
    if !rows.is_empty() {
        return Ok(rows);
    }
    match parent.normalized() {
        Some(normalized) => fetch(normalized).await,
        None => Ok(rows),
    }
}

#[cfg(test)]
mod test {
    use super::CatalogService;
    use crate::entities::semester;
    use crate::error::StoreError;
    use chrono::NaiveDate;
    use models::node_id::NodeId;
    use sea_orm::{DatabaseBackend, MockDatabase};

    fn semester_row(id: &str, course_id: &str, number: i32) -> semester::Model {
        let stamp = NaiveDate::from_ymd_opt(2025, 8, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        semester::Model {
            id: id.to_owned(),
            college_id: "college-1".to_owned(),
            course_id: Some(course_id.to_owned()),
            number,
            name: format!("Semester {number}"),
            created_at: stamp,
            updated_at: stamp,
        }
    }

    #[tokio::test]
    async fn test_literal_hit_skips_fallback() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![semester_row("s1", "legacy-course", 1)]])
            .into_connection();

        let rows =
            CatalogService::list_semesters_by_course(&db, &NodeId::parse("legacy-course"))
                .await
                .unwrap();

        assert_eq!(rows.len(), 1);
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn test_empty_literal_retries_with_normalized_key() {
        let course_id = "0191f2d4-3c6e-4a2b-9c1d-8e5f6a7b8c9d";
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([
                vec![],
                vec![semester_row("s1", course_id, 1), semester_row("s2", course_id, 2)],
            ])
            .into_connection();

        // Same key, non-canonical encoding: literal miss, normalized hit.
        let rows = CatalogService::list_semesters_by_course(
            &db,
            &NodeId::parse("0191F2D43C6E4A2B9C1D8E5F6A7B8C9D"),
        )
        .await
        .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(db.into_transaction_log().len(), 2);
    }

    #[tokio::test]
    async fn test_raw_key_does_not_retry() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<semester::Model>::new()])
            .into_connection();

        let rows = CatalogService::list_semesters_by_course(&db, &NodeId::parse("no-such-parent"))
            .await
            .unwrap();

        assert!(rows.is_empty());
        assert_eq!(db.into_transaction_log().len(), 1);
    }

    #[tokio::test]
    async fn test_malformed_id_surfaces_not_found() {
        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([Vec::<semester::Model>::new()])
            .into_connection();

        let err = CatalogService::get_semester(&db, &NodeId::parse("../etc/passwd"))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            StoreError::NotFound { entity: "semester" }
        ));
    }
}
