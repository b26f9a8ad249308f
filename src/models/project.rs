use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::id::generate_id;
use crate::models::user::{non_blank, not_blank};

/// A project as persisted in the `projects` list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Payload of the "New Project" form.
#[derive(Debug, Deserialize, Validate)]
pub struct ProjectInput {
    #[validate(custom = "not_blank", length(max = 200))]
    pub name: String,
    #[validate(length(max = 1000))]
    pub description: Option<String>,
}

impl Project {
    pub fn new(input: ProjectInput) -> Self {
        let now = Utc::now();
        Self {
            id: generate_id(),
            name: input.name.trim().to_string(),
            description: non_blank(input.description),
            created_at: now,
            updated_at: now,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_project_creation_trims_input() {
        let project = Project::new(ProjectInput {
            name: "  Launch  ".to_string(),
            description: Some("".to_string()),
        });
        assert_eq!(project.name, "Launch");
        assert_eq!(project.description, None);
        assert_eq!(project.created_at, project.updated_at);

        let json = serde_json::to_value(&project).unwrap();
        assert!(json["description"].is_null());
        assert!(json["created_at"].is_string());
    }

    #[test]
    fn test_project_validation() {
        let blank = ProjectInput {
            name: " ".to_string(),
            description: None,
        };
        assert!(blank.validate().is_err());

        let valid = ProjectInput {
            name: "Website".to_string(),
            description: Some("Marketing site".to_string()),
        };
        assert!(valid.validate().is_ok());
    }
}
