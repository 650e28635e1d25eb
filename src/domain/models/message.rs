#[cfg(test)]
#[path = "message_test.rs"]
mod tests;

use serde::Deserialize;
use serde::Serialize;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// A single entry of the conversation history, in the shape the completion
/// service expects it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

impl Message {
    pub fn new(role: Role, content: &str) -> Message {
        return Message {
            role,
            content: content.to_string(),
            name: None,
        };
    }

    pub fn system(content: &str) -> Message {
        return Message::new(Role::System, content);
    }

    pub fn user(content: &str) -> Message {
        return Message::new(Role::User, content);
    }

    pub fn assistant(content: &str) -> Message {
        return Message::new(Role::Assistant, content);
    }

    /// Field values as the service sees them, in wire order. Used for token
    /// accounting.
    pub fn field_values(&self) -> Vec<String> {
        let mut values = vec![self.role.to_string(), self.content.to_string()];
        if let Some(name) = &self.name {
            values.push(name.to_string());
        }

        return values;
    }
}
