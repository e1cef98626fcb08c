use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A project as returned by the `projects` collection.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectRow {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Project {
    pub id: String,
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ProjectRow> for Project {
    fn from(row: ProjectRow) -> Self {
        Project {
            id: row.id,
            user_id: row.user_id,
            name: row.name,
            description: row.description.filter(|d| !d.is_empty()),
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct NewProjectInput {
    pub name: String,
    pub description: Option<String>,
}

impl NewProjectInput {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            description: None,
        }
    }

    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }
}

/// Insert payload for the `projects` collection.
#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub user_id: String,
    pub name: String,
    pub description: Option<String>,
}

impl NewProject {
    pub fn from_input(user_id: &str, input: NewProjectInput) -> Self {
        Self {
            user_id: user_id.to_string(),
            name: input.name,
            description: input.description,
        }
    }
}

/// Partial update for a project; `description: Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<Option<String>>,
}

impl ProjectPatch {
    pub fn is_empty(&self) -> bool {
        *self == ProjectPatch::default()
    }
}
