use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use axum::body::Body;
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use log::error;
use models::document::DOCUMENT_MIME;
use tokio::fs::File;
use tokio_util::io::ReaderStream;

use crate::error::ApiError;

const DEFAULT_UPLOAD_DIR: &str = "uploads";

fn upload_dir() -> PathBuf {
    std::env::var("UPLOAD_DIR")
        .map(PathBuf::from)
        .unwrap_or_else(|_| PathBuf::from(DEFAULT_UPLOAD_DIR))
}

/// Resolves a stored relative path against the upload root. Absolute paths
/// and parent-directory components never resolve.
fn resolve(root: &Path, stored: &str) -> Option<PathBuf> {
    let relative = Path::new(stored);
    if relative
        .components()
        .any(|c| !matches!(c, Component::Normal(_)))
    {
        return None;
    }
    Some(root.join(relative))
}

/// Opens a stored document under `root`. A path that does not resolve and a
/// file that does not exist are the same answer from the caller's view.
async fn open_under(root: &Path, stored: &str) -> Result<File, ApiError> {
    let path = resolve(root, stored).ok_or_else(|| ApiError::NotFound("document".to_owned()))?;

    match File::open(&path).await {
        Ok(file) => Ok(file),
        Err(err) if err.kind() == ErrorKind::NotFound => {
            Err(ApiError::NotFound("document".to_owned()))
        }
        Err(err) => {
            error!("failed to open {}: {err}", path.display());
            Err(ApiError::StoreUnavailable)
        }
    }
}

/// Streams a locally stored document. Responses are uncacheable: access is
/// checked per request, so intermediaries must not replay the bytes.
pub async fn stream_document(stored: &str) -> Result<Response, ApiError> {
    let file = open_under(&upload_dir(), stored).await?;

    let headers = [
        (header::CONTENT_TYPE, DOCUMENT_MIME),
        (header::CONTENT_DISPOSITION, "inline; filename=\"view.pdf\""),
        (header::CACHE_CONTROL, "no-cache, no-store, must-revalidate"),
        (header::PRAGMA, "no-cache"),
        (header::EXPIRES, "0"),
    ];

    let body = Body::from_stream(ReaderStream::new(file));
    Ok((StatusCode::OK, headers, body).into_response())
}

#[cfg(test)]
mod test {
    use super::{open_under, resolve};
    use crate::error::ApiError;
    use std::path::{Path, PathBuf};

    #[test]
    fn test_relative_path_resolves_under_root() {
        let resolved = resolve(Path::new("uploads"), "db/u1.pdf");
        assert_eq!(resolved, Some(PathBuf::from("uploads/db/u1.pdf")));
    }

    #[test]
    fn test_traversal_does_not_resolve() {
        assert_eq!(resolve(Path::new("uploads"), "../secrets.pdf"), None);
        assert_eq!(resolve(Path::new("uploads"), "db/../../secrets.pdf"), None);
    }

    #[test]
    fn test_absolute_path_does_not_resolve() {
        assert_eq!(resolve(Path::new("uploads"), "/etc/passwd"), None);
    }

    #[tokio::test]
    async fn test_missing_file_is_not_found() {
        let root = tempfile::tempdir().unwrap();

        let err = open_under(root.path(), "missing.pdf").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_existing_file_opens() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("u1.pdf"), b"%PDF-1.4").unwrap();

        assert!(open_under(root.path(), "u1.pdf").await.is_ok());
    }

    #[tokio::test]
    async fn test_traversal_is_not_found_even_when_target_exists() {
        let root = tempfile::tempdir().unwrap();
        std::fs::write(root.path().join("u1.pdf"), b"%PDF-1.4").unwrap();

        let err = open_under(root.path(), "sub/../u1.pdf").await.unwrap_err();
        assert!(matches!(err, ApiError::NotFound(_)));
    }
}
