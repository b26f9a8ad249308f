pub mod message;
pub mod project;
pub mod task;
pub mod user;

pub use message::{Message, MessageInput};
pub use project::{Project, ProjectInput};
pub use task::{Task, TaskInput, TaskPriority, TaskQuery, TaskStatus};
pub use user::{ProfileInput, SignInInput, SignUpInput, User};
