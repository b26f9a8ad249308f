//! The application controller.
//!
//! A [`Workspace`] owns the storage handle, the [`Session`] and the entity stores, and is
//! what the view layer talks to. The project list is read once at startup. Tasks and
//! messages are read when a project is entered and kept for as long as that project
//! stays open; entering a different project reads that project's collections afresh.

use log::{debug, info};
use serde::Serialize;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use crate::error::AppError;
use crate::models::{
    Message, MessageInput, Project, ProjectInput, Task, TaskInput, TaskQuery, TaskStatus, User,
};
use crate::session::{Session, SessionOptions};
use crate::stats::{ProjectStats, TaskStats};
use crate::storage::{load_json, tasks_key, KeyValueStore};
use crate::stores::{Board, MessageStore, ProjectStore, TaskStore};

/// The stores of the project currently open.
#[derive(Debug)]
pub struct ProjectScope {
    project: Project,
    tasks: TaskStore,
    messages: MessageStore,
}

impl ProjectScope {
    fn enter(storage: &dyn KeyValueStore, project: Project) -> Result<Self, AppError> {
        let tasks = TaskStore::load(storage, &project.id)?;
        let messages = MessageStore::load(storage, &project.id)?;
        debug!(
            "Entered project {} with {} tasks and {} messages",
            project.id,
            tasks.list().len(),
            messages.list().len()
        );
        Ok(Self {
            project,
            tasks,
            messages,
        })
    }

}

/// What the dashboard shows besides the project list.
#[derive(Debug, Clone, Serialize)]
pub struct Dashboard {
    pub stats: ProjectStats,
    pub missing_profile_fields: Vec<&'static str>,
    pub projects: Vec<Project>,
}

struct State {
    projects: ProjectStore,
    open: Option<ProjectScope>,
}

pub struct Workspace {
    storage: Arc<dyn KeyValueStore>,
    session: Session,
    state: Mutex<State>,
}

impl Workspace {
    /// Restores the session and reads the project list.
    pub fn open(storage: Arc<dyn KeyValueStore>, options: SessionOptions) -> Result<Self, AppError> {
        let session = Session::restore(storage.clone(), options);
        let projects = ProjectStore::load(storage.as_ref())?;
        info!("Workspace opened with {} projects", projects.list().len());
        Ok(Self {
            storage,
            session,
            state: Mutex::new(State {
                projects,
                open: None,
            }),
        })
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn projects(&self) -> Vec<Project> {
        self.lock().projects.list().to_vec()
    }

    pub fn project(&self, project_id: &str) -> Result<Project, AppError> {
        self.lock().projects.get(project_id).cloned()
    }

    pub fn create_project(&self, input: ProjectInput) -> Result<Project, AppError> {
        self.lock().projects.create(self.storage.as_ref(), input)
    }

    /// Runs `f` against the scope of `project_id`, entering it first if another
    /// project (or none) is open.
    pub fn with_project<R, F>(&self, project_id: &str, f: F) -> Result<R, AppError>
    where
        F: FnOnce(&mut ProjectScope, &dyn KeyValueStore) -> Result<R, AppError>,
    {
        let mut state = self.lock();
        let is_open = state
            .open
            .as_ref()
            .is_some_and(|scope| scope.project.id == project_id);
        if !is_open {
            let project = state.projects.get(project_id)?.clone();
            state.open = Some(ProjectScope::enter(self.storage.as_ref(), project)?);
        }

        match state.open.as_mut() {
            Some(scope) => f(scope, self.storage.as_ref()),
            None => Err(AppError::InternalServerError("Project scope missing".into())),
        }
    }

    /// Leaves the open project, if any.
    pub fn close_project(&self) {
        if let Some(scope) = self.lock().open.take() {
            debug!("Left project {}", scope.project.id);
        }
    }

    pub fn open_project_id(&self) -> Option<String> {
        self.lock().open.as_ref().map(|scope| scope.project.id.clone())
    }

    pub fn tasks(&self, project_id: &str, query: &TaskQuery) -> Result<Vec<Task>, AppError> {
        self.with_project(project_id, |scope, _| Ok(scope.tasks.filter(query)))
    }

    pub fn board(&self, project_id: &str, query: &TaskQuery) -> Result<Board, AppError> {
        self.with_project(project_id, |scope, _| Ok(scope.tasks.board(query)))
    }

    pub fn task_stats(&self, project_id: &str) -> Result<TaskStats, AppError> {
        self.with_project(project_id, |scope, _| Ok(scope.tasks.stats()))
    }

    pub fn create_task(&self, project_id: &str, input: TaskInput) -> Result<Task, AppError> {
        self.with_project(project_id, |scope, storage| scope.tasks.create(storage, input))
    }

    pub fn set_task_status(
        &self,
        project_id: &str,
        task_id: &str,
        status: TaskStatus,
    ) -> Result<Task, AppError> {
        self.with_project(project_id, |scope, storage| {
            scope.tasks.set_status(storage, task_id, status)
        })
    }

    pub fn delete_task(&self, project_id: &str, task_id: &str) -> Result<(), AppError> {
        self.with_project(project_id, |scope, storage| scope.tasks.delete(storage, task_id))
    }

    pub fn messages(&self, project_id: &str) -> Result<Vec<Message>, AppError> {
        self.with_project(project_id, |scope, _| Ok(scope.messages.list().to_vec()))
    }

    /// Appends a message signed by the user signed in right now. A session that ended
    /// after the request passed the guard is rejected here.
    pub fn send_message(&self, project_id: &str, input: MessageInput) -> Result<Message, AppError> {
        let author = self
            .session
            .current_user()
            .ok_or_else(|| AppError::Unauthorized("No active session".into()))?;
        self.with_project(project_id, |scope, storage| {
            scope.messages.send(storage, &author, input)
        })
    }

    /// Dashboard counters. Reads every project's persisted task list directly, without
    /// entering the projects.
    pub fn dashboard(&self, user: &User) -> Result<Dashboard, AppError> {
        let projects = self.projects();
        let mut all_tasks = Vec::new();
        for project in &projects {
            if let Some(tasks) = load_json::<Vec<Task>>(self.storage.as_ref(), &tasks_key(&project.id))? {
                all_tasks.extend(tasks);
            }
        }
        Ok(Dashboard {
            stats: ProjectStats::new(projects.len(), &all_tasks),
            missing_profile_fields: user.missing_profile_fields(),
            projects,
        })
    }

    fn lock(&self) -> MutexGuard<'_, State> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
