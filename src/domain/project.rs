//! Domain types representing construction projects.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::common::{Displayable, Identifiable, NamedEntity};

/// A construction project that transactions are booked against.
///
/// The relation from transactions is weak: deleting a project leaves its
/// transactions in place with a dangling `project_id`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Project {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Project {
    /// Creates a project with a freshly minted id.
    ///
    /// Ids combine a fixed prefix with a v4 UUID so that rapid successive
    /// calls within the same instant still yield distinct ids.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: format!("p_{}", Uuid::new_v4().simple()),
            name: name.into(),
            description: None,
        }
    }

    pub fn with_id(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            description: None,
        }
    }
}

impl Identifiable for Project {
    fn id(&self) -> &str {
        &self.id
    }
}

impl NamedEntity for Project {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Displayable for Project {
    fn display_label(&self) -> String {
        format!("{} ({})", self.name, self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_projects_get_distinct_ids() {
        let a = Project::new("Casa A");
        let b = Project::new("Casa A");
        assert_ne!(a.id, b.id);
        assert!(a.id.starts_with("p_"));
    }
}
