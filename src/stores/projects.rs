use log::info;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Project, ProjectInput};
use crate::storage::{KeyValueStore, PROJECTS_KEY};
use crate::stores::Collection;

/// All projects, newest first. Projects are never edited or deleted.
#[derive(Debug, Clone)]
pub struct ProjectStore {
    projects: Collection<Project>,
}

impl ProjectStore {
    pub fn load(storage: &dyn KeyValueStore) -> Result<Self, AppError> {
        Ok(Self {
            projects: Collection::load(storage, PROJECTS_KEY)?,
        })
    }

    pub fn list(&self) -> &[Project] {
        self.projects.items()
    }

    pub fn get(&self, project_id: &str) -> Result<&Project, AppError> {
        self.projects
            .items()
            .iter()
            .find(|p| p.id == project_id)
            .ok_or_else(|| AppError::NotFound("Project not found".into()))
    }

    pub fn create(
        &mut self,
        storage: &dyn KeyValueStore,
        input: ProjectInput,
    ) -> Result<Project, AppError> {
        input.validate()?;
        let project = Project::new(input);

        let mut next = vec![project.clone()];
        next.extend_from_slice(self.projects.items());
        self.projects.commit(storage, next)?;

        info!("Created project {} ({})", project.name, project.id);
        Ok(project)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStorage;

    fn input(name: &str) -> ProjectInput {
        ProjectInput {
            name: name.to_string(),
            description: None,
        }
    }

    #[test]
    fn test_create_prepends_and_persists() {
        let storage = MemoryStorage::new();
        let mut store = ProjectStore::load(&storage).unwrap();
        let older = store.create(&storage, input("Older")).unwrap();
        let newer = store.create(&storage, input("Newer")).unwrap();

        let reloaded = ProjectStore::load(&storage).unwrap();
        let names: Vec<&str> = reloaded.list().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["Newer", "Older"]);
        assert_eq!(reloaded.get(&older.id).unwrap(), &older);
        assert_eq!(reloaded.get(&newer.id).unwrap(), &newer);
    }

    #[test]
    fn test_unknown_project() {
        let storage = MemoryStorage::new();
        let store = ProjectStore::load(&storage).unwrap();
        assert!(matches!(store.get("nope"), Err(AppError::NotFound(_))));
    }

    #[test]
    fn test_blank_name_rejected() {
        let storage = MemoryStorage::new();
        let mut store = ProjectStore::load(&storage).unwrap();
        assert!(matches!(
            store.create(&storage, input("   ")),
            Err(AppError::ValidationError(_))
        ));
        assert!(store.list().is_empty());
    }
}
