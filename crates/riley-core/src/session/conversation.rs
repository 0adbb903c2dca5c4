//! Append-only chat log.

use super::message::Message;

/// The greeting every console opens with.
pub const GREETING: &str = "Hello, I am Riley. How can I assist you today?";

/// Ordered, append-only sequence of messages for one session.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    /// Creates an empty conversation.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a conversation that already holds Riley's greeting.
    pub fn with_greeting() -> Self {
        let mut conversation = Self::new();
        conversation.push(Message::assistant(GREETING));
        conversation
    }

    pub fn push(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::MessageRole;

    #[test]
    fn test_with_greeting() {
        let conversation = Conversation::with_greeting();
        assert_eq!(conversation.len(), 1);
        let first = &conversation.messages()[0];
        assert_eq!(first.role, MessageRole::Assistant);
        assert_eq!(first.content, GREETING);
    }

    #[test]
    fn test_push_preserves_order() {
        let mut conversation = Conversation::new();
        assert!(conversation.is_empty());

        conversation.push(Message::user("first"));
        conversation.push(Message::assistant("second"));
        conversation.push(Message::user("third"));

        let contents: Vec<&str> = conversation.iter().map(|m| m.content.as_str()).collect();
        assert_eq!(contents, vec!["first", "second", "third"]);
        assert_eq!(conversation.last().unwrap().content, "third");
    }
}
