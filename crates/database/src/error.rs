use sea_orm::{DbErr, SqlErr};
use thiserror::Error;

/// Failure taxonomy for catalog storage operations.
///
/// Callers must be able to tell a missing row from a broken backend, and an
/// idempotent upsert must be able to tell a uniqueness conflict from any
/// other write failure.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("{entity} not found")]
    NotFound { entity: &'static str },

    #[error("duplicate {entity} for parent {parent}, key {key}")]
    DuplicateKey {
        entity: &'static str,
        parent: String,
        key: String,
    },

    #[error("{entity}: missing or invalid {field}")]
    Validation {
        entity: &'static str,
        field: &'static str,
    },

    #[error(transparent)]
    Db(#[from] DbErr),
}

impl StoreError {
    /// Whether `err` is a uniqueness violation. Upserts recover from these
    /// by re-reading; everything else propagates.
    pub fn is_duplicate(err: &DbErr) -> bool {
        matches!(err.sql_err(), Some(SqlErr::UniqueConstraintViolation(_)))
    }
}

#[cfg(test)]
mod test {
    use super::StoreError;
    use sea_orm::DbErr;

    #[test]
    fn test_generic_db_error_is_not_a_duplicate() {
        let err = DbErr::Custom("connection refused".to_owned());
        assert!(!StoreError::is_duplicate(&err));
    }

    #[test]
    fn test_not_found_names_the_entity() {
        let err = StoreError::NotFound { entity: "college" };
        assert_eq!(err.to_string(), "college not found");
    }

    #[test]
    fn test_validation_names_entity_and_field() {
        let err = StoreError::Validation {
            entity: "semester",
            field: "number",
        };
        assert_eq!(err.to_string(), "semester: missing or invalid number");
    }
}
