pub mod colleges;
pub mod courses;
pub mod health;
pub mod semesters;
pub mod subjects;
pub mod units;

use tower_oauth2_resource_server::claims::DefaultClaims;

use crate::error::ApiError;

/// The authenticated principal's subject claim. The auth layer has already
/// validated the token; a token without a subject is still unusable here.
pub(crate) fn principal(claims: &DefaultClaims) -> Result<&str, ApiError> {
    claims.sub.as_deref().ok_or(ApiError::Forbidden)
}
