use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::id::generate_id;
use crate::models::user::{not_blank, User};

/// One chat line of a project, persisted under `messages-<projectId>`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub content: String,
    #[serde(rename = "userId")]
    pub user_id: String,
    /// Author's full name at the time of sending.
    #[serde(rename = "displayName")]
    pub display_name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct MessageInput {
    #[validate(custom = "not_blank", length(max = 4000))]
    pub content: String,
}

impl Message {
    pub fn new(input: MessageInput, author: &User) -> Self {
        Self {
            id: generate_id(),
            content: input.content.trim().to_string(),
            user_id: author.id.clone(),
            display_name: author.full_name.clone(),
            created_at: Utc::now(),
        }
    }
}
