#[cfg(test)]
#[path = "conversation_test.rs"]
mod tests;

use super::Message;

/// Ordered message history of the active session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new(system_prompt: &str) -> Conversation {
        let mut conversation = Conversation::default();
        conversation.reset(system_prompt);
        return conversation;
    }

    pub fn reset(&mut self, system_prompt: &str) {
        self.messages = vec![Message::system(system_prompt)];
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        return &self.messages;
    }
}
