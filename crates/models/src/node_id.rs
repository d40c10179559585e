use std::fmt::{Display, Formatter, Result as FmtResult};
use uuid::Uuid;

/// An entity identifier as received from a client or found in the catalog.
///
/// The catalog has carried two identifier encodings over its lifetime: opaque
/// strings written by the first deployment and canonical v4 UUIDs written
/// since. A lookup always tries the literal input first and only falls back
/// to the canonical form when the literal yields nothing, so rows written
/// under either encoding stay reachable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeId {
    /// Not a parseable UUID. Looked up verbatim only.
    Raw(String),
    /// A parseable UUID. Looked up verbatim first, then in canonical form.
    Typed { input: String, key: Uuid },
}

impl NodeId {
    /// Classifies an identifier. Never fails; anything that does not parse
    /// as a UUID is carried as [`NodeId::Raw`].
    pub fn parse(input: impl Into<String>) -> Self {
        let input = input.into();
        match Uuid::parse_str(&input) {
            Ok(key) => NodeId::Typed { input, key },
            Err(_) => NodeId::Raw(input),
        }
    }

    /// The identifier exactly as received.
    pub fn literal(&self) -> &str {
        match self {
            NodeId::Raw(input) => input,
            NodeId::Typed { input, .. } => input,
        }
    }

    /// Canonical hyphenated lowercase form, when it exists and differs from
    /// the input. `None` means there is nothing further to try.
    pub fn normalized(&self) -> Option<String> {
        match self {
            NodeId::Raw(_) => None,
            NodeId::Typed { input, key } => {
                let canonical = key.as_hyphenated().to_string();
                (canonical != *input).then_some(canonical)
            }
        }
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{}", self.literal())
    }
}

#[cfg(test)]
mod test {
    use super::NodeId;

    #[test]
    fn test_raw_id_has_no_fallback() {
        let id = NodeId::parse("not-a-uuid");
        assert_eq!(id.literal(), "not-a-uuid");
        assert_eq!(id.normalized(), None);
    }

    #[test]
    fn test_canonical_uuid_needs_no_fallback() {
        let id = NodeId::parse("0191f2d4-3c6e-4a2b-9c1d-8e5f6a7b8c9d");
        assert_eq!(id.literal(), "0191f2d4-3c6e-4a2b-9c1d-8e5f6a7b8c9d");
        assert_eq!(id.normalized(), None);
    }

    #[test]
    fn test_non_canonical_uuid_normalizes() {
        let id = NodeId::parse("0191F2D43C6E4A2B9C1D8E5F6A7B8C9D");
        assert_eq!(id.literal(), "0191F2D43C6E4A2B9C1D8E5F6A7B8C9D");
        assert_eq!(
            id.normalized().as_deref(),
            Some("0191f2d4-3c6e-4a2b-9c1d-8e5f6a7b8c9d")
        );
    }

    #[test]
    fn test_empty_input_is_raw() {
        let id = NodeId::parse("");
        assert_eq!(id.literal(), "");
        assert_eq!(id.normalized(), None);
    }
}
