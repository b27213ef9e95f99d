// driver/namespace.rs
// Short volume name <-> qualified dataset name translation

use super::error::DriverError;

/// Maps caller-visible volume names into the dataset subtree owned by the
/// root dataset. Every qualified name this driver produces is exactly
/// `root + "/" + short`, so the inverse is prefix stripping, not search.
#[derive(Clone, Debug)]
pub struct Namespace {
    root: String,
}

impl Namespace {
    pub fn new(root: &str) -> Self {
        Namespace {
            root: root.trim_end_matches('/').to_string(),
        }
    }

    pub fn root(&self) -> &str {
        &self.root
    }

    /// Qualified dataset name for a volume. No validation beyond what the
    /// dataset engine itself enforces on create.
    pub fn qualify(&self, short: &str) -> String {
        format!("{}/{}", self.root, short)
    }

    /// Short volume name for a qualified dataset name. Names that do not
    /// sit strictly below the root are rejected rather than sliced blindly.
    pub fn unqualify(&self, qualified: &str) -> Result<String, DriverError> {
        qualified
            .strip_prefix(self.root.as_str())
            .and_then(|rest| rest.strip_prefix('/'))
            .filter(|short| !short.is_empty())
            .map(str::to_string)
            .ok_or_else(|| DriverError::MalformedName {
                name: qualified.to_string(),
                root: self.root.clone(),
            })
    }
}
