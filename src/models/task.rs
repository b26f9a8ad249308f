use chrono::{DateTime, NaiveDate, Utc};
use serde::de::{value::StringDeserializer, IntoDeserializer};
use serde::{Deserialize, Deserializer, Serialize};
use validator::Validate;

use crate::id::generate_id;
use crate::models::user::{non_blank, not_blank};

/// Represents the priority of a task.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum TaskPriority {
    /// Low priority.
    Low,
    /// Medium priority.
    #[default]
    Medium,
    /// High priority.
    High,
    /// Urgent priority.
    Urgent,
}

/// Represents the status of a task, which is also its column on the board.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Task is yet to be started.
    #[default]
    Todo,
    /// Task is currently being worked on.
    InProgress,
    /// Task is completed and under review.
    Review,
    /// Task is completed.
    Done,
}

impl TaskStatus {
    /// Board columns, left to right.
    pub const ALL: [TaskStatus; 4] = [
        TaskStatus::Todo,
        TaskStatus::InProgress,
        TaskStatus::Review,
        TaskStatus::Done,
    ];

    pub fn label(self) -> &'static str {
        match self {
            TaskStatus::Todo => "To Do",
            TaskStatus::InProgress => "In Progress",
            TaskStatus::Review => "Review",
            TaskStatus::Done => "Done",
        }
    }
}

/// Input structure for creating a task.
/// Contains validation rules for its fields.
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct TaskInput {
    /// The title of the task.
    /// Must not be blank and at most 200 characters.
    #[validate(custom = "not_blank", length(max = 200))]
    pub title: String,

    /// An optional description for the task.
    /// Maximum length of 1000 characters if provided.
    #[validate(length(max = 1000))]
    pub description: Option<String>,

    /// Defaults to `medium`.
    pub priority: Option<TaskPriority>,

    /// Defaults to `todo`.
    pub status: Option<TaskStatus>,

    /// Optional due date for the task (`YYYY-MM-DD`).
    pub due_date: Option<NaiveDate>,
}

/// A task as persisted under `tasks-<projectId>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Random local token.
    pub id: String,
    pub title: String,
    /// Persisted as `null` when absent.
    pub description: Option<String>,
    pub status: TaskStatus,
    pub priority: TaskPriority,
    pub due_date: Option<NaiveDate>,
    pub created_at: DateTime<Utc>,
}

impl Task {
    /// Creates a new `Task` from validated input, trimming text fields and filling in
    /// the default priority and status.
    pub fn new(input: TaskInput) -> Self {
        Self {
            id: generate_id(),
            title: input.title.trim().to_string(),
            description: non_blank(input.description),
            status: input.status.unwrap_or_default(),
            priority: input.priority.unwrap_or_default(),
            due_date: input.due_date,
            created_at: Utc::now(),
        }
    }
}

/// The filter bar of the task board.
///
/// The "All" choices of the priority and status selects submit an empty value, which
/// reads as no filter.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct TaskQuery {
    /// Case-insensitive substring of the title or the description.
    pub search: Option<String>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub priority: Option<TaskPriority>,
    #[serde(default, deserialize_with = "empty_as_none")]
    pub status: Option<TaskStatus>,
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    match Option::<String>::deserialize(deserializer)? {
        Some(value) if !value.trim().is_empty() => {
            let value: StringDeserializer<D::Error> = value.into_deserializer();
            T::deserialize(value).map(Some)
        }
        _ => Ok(None),
    }
}

impl TaskQuery {
    pub fn matches(&self, task: &Task) -> bool {
        let matches_search = match self.search.as_deref() {
            None | Some("") => true,
            Some(search) => {
                let needle = search.to_lowercase();
                task.title.to_lowercase().contains(&needle)
                    || task
                        .description
                        .as_deref()
                        .is_some_and(|d| d.to_lowercase().contains(&needle))
            }
        };
        let matches_priority = self.priority.map_or(true, |p| task.priority == p);
        let matches_status = self.status.map_or(true, |s| task.status == s);

        matches_search && matches_priority && matches_status
    }

    pub fn is_active(&self) -> bool {
        self.search.as_deref().is_some_and(|s| !s.is_empty())
            || self.priority.is_some()
            || self.status.is_some()
    }
}
