use log::debug;
use validator::Validate;

use crate::error::AppError;
use crate::models::{Message, MessageInput, User};
use crate::storage::{messages_key, KeyValueStore};
use crate::stores::Collection;

/// A project's chat, oldest first. Append-only.
#[derive(Debug, Clone)]
pub struct MessageStore {
    messages: Collection<Message>,
}

impl MessageStore {
    pub fn load(storage: &dyn KeyValueStore, project_id: &str) -> Result<Self, AppError> {
        Ok(Self {
            messages: Collection::load(storage, messages_key(project_id))?,
        })
    }

    pub fn list(&self) -> &[Message] {
        self.messages.items()
    }

    pub fn send(
        &mut self,
        storage: &dyn KeyValueStore,
        author: &User,
        input: MessageInput,
    ) -> Result<Message, AppError> {
        input.validate()?;
        let message = Message::new(input, author);

        let mut next = self.messages.items().to_vec();
        next.push(message.clone());
        self.messages.commit(storage, next)?;

        debug!("{} posted to '{}'", author.email, self.messages.key());
        Ok(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::SignUpInput;
    use crate::storage::MemoryStorage;

    fn author() -> User {
        User::from_sign_up(&SignUpInput {
            email: "ada@example.com".to_string(),
            password: "password123".to_string(),
            full_name: "Ada Lovelace".to_string(),
        })
    }

    fn say(content: &str) -> MessageInput {
        MessageInput {
            content: content.to_string(),
        }
    }

    #[test]
    fn test_send_appends() {
        let storage = MemoryStorage::new();
        let ada = author();
        let mut chat = MessageStore::load(&storage, "p1").unwrap();

        chat.send(&storage, &ada, say("first")).unwrap();
        let second = chat.send(&storage, &ada, say("  second  ")).unwrap();
        assert_eq!(second.content, "second");
        assert_eq!(second.display_name, "Ada Lovelace");
        assert_eq!(second.user_id, ada.id);

        let reloaded = MessageStore::load(&storage, "p1").unwrap();
        let contents: Vec<&str> = reloaded.list().iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second"]);

        let raw = storage.get("messages-p1").unwrap().unwrap();
        assert!(raw.contains("\"displayName\":\"Ada Lovelace\""));
        assert!(raw.contains("\"userId\""));
    }

    #[test]
    fn test_blank_message_rejected() {
        let storage = MemoryStorage::new();
        let mut chat = MessageStore::load(&storage, "p1").unwrap();
        assert!(chat.send(&storage, &author(), say("  ")).is_err());
        assert!(chat.list().is_empty());
    }
}
