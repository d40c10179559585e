use std::time::Duration;

use aws_sdk_s3::presigning::PresigningConfig;
use chrono::{SecondsFormat, Utc};
use log::{error, warn};
use models::document::DOCUMENT_MIME;

use crate::dtos::catalog::DocumentLinkResponse;
use crate::error::ApiError;

/// Signed URLs cover one immediate render, not caching or sharing.
const SIGNED_URL_TTL: Duration = Duration::from_secs(300);

/// Signs a time-limited GET URL for a remotely stored document.
///
/// The existence check is best-effort: only a confirmed absence blocks the
/// caller. A HEAD that fails for any other reason (permissions, transient
/// transport) is logged and the URL is issued anyway.
pub async fn sign_document_url(key: &str) -> Result<DocumentLinkResponse, ApiError> {
    let bucket = std::env::var("AWS_BUCKET_NAME").map_err(|_| {
        error!("AWS_BUCKET_NAME is not set");
        ApiError::StoreUnavailable
    })?;

    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    let client = aws_sdk_s3::Client::new(&config);

    match client.head_object().bucket(&bucket).key(key).send().await {
        Ok(_) => {}
        Err(err) => {
            if err
                .as_service_error()
                .is_some_and(|service_err| service_err.is_not_found())
            {
                return Err(ApiError::NotFound("document".to_owned()));
            }
            warn!("head_object failed for {key}, issuing URL anyway: {err}");
        }
    }

    let presigning = PresigningConfig::expires_in(SIGNED_URL_TTL).map_err(|err| {
        error!("invalid presigning config: {err}");
        ApiError::StoreUnavailable
    })?;

    let presigned = client
        .get_object()
        .bucket(&bucket)
        .key(key)
        .response_content_type(DOCUMENT_MIME)
        .presigned(presigning)
        .await
        .map_err(|err| {
            error!("failed to presign {key}: {err}");
            ApiError::StoreUnavailable
        })?;

    let expires_at = (Utc::now() + SIGNED_URL_TTL).to_rfc3339_opts(SecondsFormat::Secs, true);

    Ok(DocumentLinkResponse {
        url: presigned.uri().to_string(),
        expires_at,
    })
}
