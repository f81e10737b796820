use std::fmt;

use super::SessionId;

/// Key of one archived artifact. Always prefixed by the owning session id,
/// so concurrent sessions write disjoint key ranges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPath(String);

impl ArtifactPath {
    pub fn new(session_id: &SessionId, artifact_name: &str) -> Self {
        Self(format!("{}/{}", session_id.as_uuid(), artifact_name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ArtifactPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
