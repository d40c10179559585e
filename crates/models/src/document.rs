use serde::{Deserialize, Serialize};

/// MIME type served for every unit document.
pub const DOCUMENT_MIME: &str = "application/pdf";

/// Where a unit's document lives and how the bytes reach the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DocumentSource {
    /// Relative path under the local upload root, streamed directly.
    LocalPath(String),
    /// Object key in the configured bucket, delivered via a signed URL.
    RemoteKey(String),
}

impl DocumentSource {
    pub const LOCAL: &'static str = "local";
    pub const REMOTE: &'static str = "remote";

    /// Rebuilds the source from a unit's storage columns. `None` when the
    /// unit has no document configured or the backend tag is unrecognized.
    pub fn from_columns(backend: Option<&str>, file_ref: Option<&str>) -> Option<Self> {
        let (backend, file_ref) = (backend?, file_ref?);
        if backend == Self::LOCAL {
            Some(Self::LocalPath(file_ref.to_owned()))
        } else if backend == Self::REMOTE {
            Some(Self::RemoteKey(file_ref.to_owned()))
        } else {
            None
        }
    }

    /// The backend tag stored on the unit row.
    pub fn backend(&self) -> &'static str {
        match self {
            Self::LocalPath(_) => Self::LOCAL,
            Self::RemoteKey(_) => Self::REMOTE,
        }
    }

    /// The path or object key, depending on the variant.
    pub fn reference(&self) -> &str {
        match self {
            Self::LocalPath(path) => path,
            Self::RemoteKey(key) => key,
        }
    }
}

#[cfg(test)]
mod test {
    use super::DocumentSource;

    #[test]
    fn test_from_columns_round_trip() {
        let source = DocumentSource::from_columns(Some("remote"), Some("notes/db/u1.pdf"));
        assert_eq!(
            source,
            Some(DocumentSource::RemoteKey("notes/db/u1.pdf".to_owned()))
        );

        let source = source.unwrap();
        assert_eq!(source.backend(), "remote");
        assert_eq!(source.reference(), "notes/db/u1.pdf");
    }

    #[test]
    fn test_missing_columns_mean_not_configured() {
        assert_eq!(DocumentSource::from_columns(None, None), None);
        assert_eq!(DocumentSource::from_columns(Some("local"), None), None);
        assert_eq!(DocumentSource::from_columns(None, Some("a.pdf")), None);
    }

    #[test]
    fn test_unknown_backend_is_not_configured() {
        assert_eq!(
            DocumentSource::from_columns(Some("ftp"), Some("a.pdf")),
            None
        );
    }
}
