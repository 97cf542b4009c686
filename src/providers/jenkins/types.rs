use serde::{Deserialize, Serialize};

/// A Jenkins job, folder or multibranch branch.
///
/// Built fresh from a tree API document for each request and never mutated
/// afterwards. Child jobs are exclusively owned by their parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    /// Full job name (e.g., "folder/ligoj-bootstrap"), falling back to the short name
    pub id: String,
    /// Display name, when distinct from the identifier
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Ball color without the "_anime" suffix (e.g., "blue", "red", "disabled")
    pub status: String,
    /// Whether a build is currently running
    pub building: bool,
    /// Start of the last build, in milliseconds since the epoch
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_build: Option<i64>,
    /// Whether this branch was created for a pull request
    pub pull_request_branch: bool,
    /// Branches or sub-jobs, `None` when they were not resolved
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jobs: Option<Vec<Job>>,
}

impl Job {
    /// Name shown to users: the display name when present, else the identifier.
    pub fn display_name(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.id)
    }

    /// Copy of this job without its children, as listed in flat search results.
    pub fn without_jobs(&self) -> Self {
        Self {
            jobs: None,
            ..self.clone()
        }
    }
}
