//! Chat widget state.

use serde::{Deserialize, Serialize};

#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: ChatRole,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: ChatRole::Assistant,
            content: content.into(),
        }
    }
}

/// Conversation so far plus the unsent input line.
#[derive(Debug, Clone, Default)]
pub struct ChatLog {
    pub messages: Vec<ChatMessage>,
    pub input: String,
}

impl ChatLog {
    /// Takes the input buffer as the next user message.
    ///
    /// Returns the message and the history that preceded it, or `None` when
    /// the input is blank.
    pub fn submit_input(&mut self) -> Option<(String, Vec<ChatMessage>)> {
        let message = self.input.trim().to_string();
        self.input.clear();
        if message.is_empty() {
            return None;
        }
        Some(self.push_user(message))
    }

    /// Appends a user message, returning it with the preceding history.
    pub fn push_user(&mut self, message: String) -> (String, Vec<ChatMessage>) {
        let history = self.messages.clone();
        self.messages.push(ChatMessage::user(message.clone()));
        (message, history)
    }

    pub fn push_assistant(&mut self, content: impl Into<String>) {
        self.messages.push(ChatMessage::assistant(content));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_submit_input_returns_prior_history() {
        let mut chat = ChatLog::default();
        chat.input = "  what is QAOA?  ".to_string();
        let (message, history) = chat.submit_input().unwrap();
        assert_eq!(message, "what is QAOA?");
        assert!(history.is_empty());
        assert!(chat.input.is_empty());

        chat.push_assistant("A variational algorithm.");
        chat.input = "thanks".to_string();
        let (_, history) = chat.submit_input().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[1].role, ChatRole::Assistant);
        assert_eq!(chat.messages.len(), 3);
    }

    #[test]
    fn test_blank_input_is_not_sent() {
        let mut chat = ChatLog::default();
        chat.input = "   ".to_string();
        assert!(chat.submit_input().is_none());
        assert!(chat.messages.is_empty());
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_string(&ChatMessage::user("hi")).unwrap();
        assert_eq!(json, r#"{"role":"user","content":"hi"}"#);
    }
}
