use log::info;
use serde::Serialize;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Task, TaskInput, TaskQuery, TaskStatus};
use crate::stats::TaskStats;
use crate::storage::{tasks_key, KeyValueStore};
use crate::stores::Collection;

/// One column of the task board.
#[derive(Debug, Clone, Serialize)]
pub struct BoardColumn {
    pub status: TaskStatus,
    pub label: &'static str,
    pub count: usize,
    pub tasks: Vec<Task>,
}

/// The board as rendered: the four columns plus whether any filter narrowed them,
/// which the front end uses to offer "clear filters".
#[derive(Debug, Clone, Serialize)]
pub struct Board {
    pub columns: Vec<BoardColumn>,
    pub has_active_filters: bool,
}

/// The tasks of one project, newest first.
#[derive(Debug, Clone)]
pub struct TaskStore {
    project_id: String,
    tasks: Collection<Task>,
}

impl TaskStore {
    pub fn load(storage: &dyn KeyValueStore, project_id: &str) -> Result<Self, AppError> {
        Ok(Self {
            project_id: project_id.to_string(),
            tasks: Collection::load(storage, tasks_key(project_id))?,
        })
    }

    pub fn project_id(&self) -> &str {
        &self.project_id
    }

    pub fn list(&self) -> &[Task] {
        self.tasks.items()
    }

    /// Validates `input` and puts the new task at the front of the sequence.
    pub fn create(&mut self, storage: &dyn KeyValueStore, input: TaskInput) -> Result<Task, AppError> {
        input.validate()?;
        let task = Task::new(input);

        let mut next = Vec::with_capacity(self.tasks.items().len() + 1);
        next.push(task.clone());
        next.extend_from_slice(self.tasks.items());
        self.tasks.commit(storage, next)?;

        info!("Created task {} in project {}", task.id, self.project_id);
        Ok(task)
    }

    /// Moves a task to another column. Its position in the sequence is unchanged.
    pub fn set_status(
        &mut self,
        storage: &dyn KeyValueStore,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<Task, AppError> {
        let mut next = self.tasks.items().to_vec();
        let task = next
            .iter_mut()
            .find(|t| t.id == task_id)
            .ok_or_else(|| AppError::NotFound("Task not found".into()))?;
        task.status = status;
        let updated = task.clone();

        self.tasks.commit(storage, next)?;
        Ok(updated)
    }

    /// Removes exactly the task with `task_id`, keeping the others in order.
    pub fn delete(&mut self, storage: &dyn KeyValueStore, task_id: &str) -> Result<(), AppError> {
        if !self.tasks.items().iter().any(|t| t.id == task_id) {
            return Err(AppError::NotFound("Task not found".into()));
        }
        let next: Vec<Task> = self
            .tasks
            .items()
            .iter()
            .filter(|t| t.id != task_id)
            .cloned()
            .collect();
        self.tasks.commit(storage, next)?;

        info!("Deleted task {} from project {}", task_id, self.project_id);
        Ok(())
    }

    /// Tasks passing every active filter, in stored order.
    pub fn filter(&self, query: &TaskQuery) -> Vec<Task> {
        self.tasks
            .items()
            .iter()
            .filter(|t| query.matches(t))
            .cloned()
            .collect()
    }

    /// The filtered tasks split into the four status columns.
    pub fn columns(&self, query: &TaskQuery) -> Vec<BoardColumn> {
        let visible = self.filter(query);
        TaskStatus::ALL
            .iter()
            .map(|&status| {
                let tasks: Vec<Task> = visible
                    .iter()
                    .filter(|t| t.status == status)
                    .cloned()
                    .collect();
                BoardColumn {
                    status,
                    label: status.label(),
                    count: tasks.len(),
                    tasks,
                }
            })
            .collect()
    }

    pub fn board(&self, query: &TaskQuery) -> Board {
        Board {
            columns: self.columns(query),
            has_active_filters: query.is_active(),
        }
    }

    /// Counters over the unfiltered sequence.
    pub fn stats(&self) -> TaskStats {
        TaskStats::from_tasks(self.tasks.items())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TaskPriority;
    use crate::storage::MemoryStorage;
    use pretty_assertions::assert_eq;

    fn input(title: &str, status: TaskStatus, priority: TaskPriority) -> TaskInput {
        TaskInput {
            title: title.to_string(),
            description: None,
            priority: Some(priority),
            status: Some(status),
            due_date: None,
        }
    }

    fn ids(tasks: &[Task]) -> Vec<&str> {
        tasks.iter().map(|t| t.id.as_str()).collect()
    }

    #[test]
    fn test_create_prepends() {
        let storage = MemoryStorage::new();
        let mut store = TaskStore::load(&storage, "p1").unwrap();

        let first = store
            .create(&storage, input("First", TaskStatus::Todo, TaskPriority::Low))
            .unwrap();
        let second = store
            .create(&storage, input("Second", TaskStatus::Todo, TaskPriority::Low))
            .unwrap();

        assert_eq!(ids(store.list()), vec![second.id.as_str(), first.id.as_str()]);
    }

    #[test]
    fn test_invalid_input_writes_nothing() {
        let storage = MemoryStorage::new();
        let mut store = TaskStore::load(&storage, "p1").unwrap();

        let result = store.create(&storage, input(" ", TaskStatus::Todo, TaskPriority::Low));
        assert!(matches!(result, Err(AppError::ValidationError(_))));
        assert!(store.list().is_empty());
        assert!(storage.get(&tasks_key("p1")).unwrap().is_none());
    }

    #[test]
    fn test_set_status_keeps_position() {
        let storage = MemoryStorage::new();
        let mut store = TaskStore::load(&storage, "p1").unwrap();
        let a = store
            .create(&storage, input("A", TaskStatus::Todo, TaskPriority::Low))
            .unwrap();
        let b = store
            .create(&storage, input("B", TaskStatus::Todo, TaskPriority::Low))
            .unwrap();

        let moved = store.set_status(&storage, &a.id, TaskStatus::Review).unwrap();
        assert_eq!(moved.status, TaskStatus::Review);
        assert_eq!(ids(store.list()), vec![b.id.as_str(), a.id.as_str()]);

        let reloaded = TaskStore::load(&storage, "p1").unwrap();
        assert_eq!(reloaded.list()[1].status, TaskStatus::Review);

        assert!(matches!(
            store.set_status(&storage, "missing", TaskStatus::Done),
            Err(AppError::NotFound(_))
        ));
    }

    #[test]
    fn test_columns_follow_board_order() {
        let storage = MemoryStorage::new();
        let mut store = TaskStore::load(&storage, "p1").unwrap();
        store
            .create(&storage, input("Done", TaskStatus::Done, TaskPriority::Low))
            .unwrap();
        store
            .create(&storage, input("Todo", TaskStatus::Todo, TaskPriority::High))
            .unwrap();

        let columns = store.columns(&TaskQuery::default());
        let labels: Vec<&str> = columns.iter().map(|c| c.label).collect();
        assert_eq!(labels, vec!["To Do", "In Progress", "Review", "Done"]);
        let counts: Vec<usize> = columns.iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 1]);

        let high_only = TaskQuery {
            priority: Some(TaskPriority::High),
            ..TaskQuery::default()
        };
        let counts: Vec<usize> = store.columns(&high_only).iter().map(|c| c.count).collect();
        assert_eq!(counts, vec![1, 0, 0, 0]);

        assert!(!store.board(&TaskQuery::default()).has_active_filters);
        let board = store.board(&high_only);
        assert!(board.has_active_filters);
        assert_eq!(board.columns.len(), 4);
    }

    #[test]
    fn test_tasks_are_scoped_per_project() {
        let storage = MemoryStorage::new();
        let mut one = TaskStore::load(&storage, "p1").unwrap();
        one.create(&storage, input("Only here", TaskStatus::Todo, TaskPriority::Low))
            .unwrap();

        let two = TaskStore::load(&storage, "p2").unwrap();
        assert!(two.list().is_empty());
        assert_eq!(two.project_id(), "p2");
    }
}
