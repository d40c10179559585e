use chrono::Utc;
use sea_orm::ActiveValue::Set;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, IntoActiveModel};

use crate::entities::user;
use crate::error::StoreError;

/// The one mutation exposed to end users: the selected-college pointer on
/// their own row. Rows are created lazily on first selection.
pub struct UserService;

impl UserService {
    pub async fn get(
        db: &DatabaseConnection,
        subject: &str,
    ) -> Result<Option<user::Model>, StoreError> {
        Ok(user::Entity::find_by_id(subject).one(db).await?)
    }

    /// Idempotent: selecting the same college twice leaves the row as-is
    /// apart from `updated_at`. The caller resolves the college first, so a
    /// dangling pointer is never written.
    pub async fn select_college(
        db: &DatabaseConnection,
        subject: &str,
        college_id: &str,
    ) -> Result<user::Model, StoreError> {
        let now = Utc::now().naive_utc();

        if let Some(existing) = user::Entity::find_by_id(subject).one(db).await? {
            let mut active = existing.into_active_model();
            active.college_id = Set(Some(college_id.to_owned()));
            active.updated_at = Set(now);
            return Ok(active.update(db).await?);
        }

        let active = user::ActiveModel {
            subject: Set(subject.to_owned()),
            college_id: Set(Some(college_id.to_owned())),
            created_at: Set(now),
            updated_at: Set(now),
        };

        match active.insert(db).await {
            Ok(created) => Ok(created),
            Err(err) if StoreError::is_duplicate(&err) => {
                // Two first-time selections raced; the winner's row exists
                // now, so update it.
                let existing = user::Entity::find_by_id(subject).one(db).await?.ok_or(
                    StoreError::DuplicateKey {
                        entity: "user",
                        parent: "-".to_owned(),
                        key: subject.to_owned(),
                    },
                )?;
                let mut active = existing.into_active_model();
                active.college_id = Set(Some(college_id.to_owned()));
                active.updated_at = Set(Utc::now().naive_utc());
                Ok(active.update(db).await?)
            }
            Err(err) => Err(err.into()),
        }
    }
}

#[cfg(test)]
mod test {
    use super::UserService;
    use crate::entities::user;
    use chrono::NaiveDate;
    use sea_orm::{DatabaseBackend, MockDatabase};

    #[tokio::test]
    async fn test_reselecting_updates_the_existing_row() {
        let stamp = NaiveDate::from_ymd_opt(2025, 8, 1)
            .unwrap()
            .and_hms_opt(0, 0, 0)
            .unwrap();
        let existing = user::Model {
            subject: "auth0|abc".to_owned(),
            college_id: Some("college-1".to_owned()),
            created_at: stamp,
            updated_at: stamp,
        };
        let updated = user::Model {
            college_id: Some("college-2".to_owned()),
            ..existing.clone()
        };

        let db = MockDatabase::new(DatabaseBackend::Postgres)
            .append_query_results([vec![existing]])
            .append_query_results([vec![updated]])
            .into_connection();

        let row = UserService::select_college(&db, "auth0|abc", "college-2")
            .await
            .unwrap();

        assert_eq!(row.subject, "auth0|abc");
        assert_eq!(row.college_id.as_deref(), Some("college-2"));
    }
}
