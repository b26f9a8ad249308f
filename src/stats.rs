//! Counters shown above the task board and on the dashboard.

use serde::Serialize;

use crate::models::{Task, TaskPriority, TaskStatus};

/// Share of done tasks as a whole percentage, rounded half up. Zero when there are no
/// tasks.
pub fn completion_rate(done: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    ((done as f64 / total as f64) * 100.0).round() as u8
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TaskStats {
    pub total: usize,
    pub done: usize,
    pub in_progress: usize,
    pub todo: usize,
    pub urgent: usize,
    pub completion_rate: u8,
}

impl TaskStats {
    pub fn from_tasks(tasks: &[Task]) -> Self {
        let count_status = |status: TaskStatus| tasks.iter().filter(|t| t.status == status).count();
        let total = tasks.len();
        let done = count_status(TaskStatus::Done);
        Self {
            total,
            done,
            in_progress: count_status(TaskStatus::InProgress),
            todo: count_status(TaskStatus::Todo),
            urgent: tasks
                .iter()
                .filter(|t| t.priority == TaskPriority::Urgent)
                .count(),
            completion_rate: completion_rate(done, total),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectStats {
    pub total_projects: usize,
    pub total_tasks: usize,
    pub completed_tasks: usize,
    pub completion_rate: u8,
}

impl ProjectStats {
    pub fn new(total_projects: usize, all_tasks: &[Task]) -> Self {
        let completed_tasks = all_tasks
            .iter()
            .filter(|t| t.status == TaskStatus::Done)
            .count();
        Self {
            total_projects,
            total_tasks: all_tasks.len(),
            completed_tasks,
            completion_rate: completion_rate(completed_tasks, all_tasks.len()),
        }
    }
}
