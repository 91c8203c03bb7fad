//! Append-only conversation log.

use chrono::Utc;

use super::message::{ConversationMessage, MessageId, MessageRole};

/// The ordered message log of a single session.
///
/// Messages are only ever appended. The one mutation allowed after the fact is
/// overwriting the content of the most recently appended message, which is how
/// the "Thinking..." placeholder becomes the final answer.
#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    messages: Vec<ConversationMessage>,
    last_id: u64,
}

impl ConversationStore {
    /// Creates an empty store. The first appended message gets id 1.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a message and returns its id.
    pub fn append(&mut self, role: MessageRole, content: impl Into<String>) -> MessageId {
        self.last_id += 1;
        let id = MessageId(self.last_id);
        self.messages.push(ConversationMessage {
            id,
            role,
            content: content.into(),
            timestamp: Utc::now(),
        });
        id
    }

    /// Overwrites the content and timestamp of the last message.
    ///
    /// Id and role are preserved. Does nothing when the store is empty.
    pub fn replace_last(&mut self, content: impl Into<String>) {
        if let Some(last) = self.messages.last_mut() {
            last.content = content.into();
            last.timestamp = Utc::now();
        }
    }

    /// Overwrites the message identified by `id`, which must still be the
    /// last message in the log.
    ///
    /// Returns `false` without touching anything when `id` is unknown or a
    /// newer message has been appended since.
    pub fn replace_at(&mut self, id: MessageId, content: impl Into<String>) -> bool {
        match self.messages.last() {
            Some(last) if last.id == id => {
                self.replace_last(content);
                true
            }
            _ => false,
        }
    }

    /// Returns a copy of all messages in append order.
    pub fn snapshot(&self) -> Vec<ConversationMessage> {
        self.messages.clone()
    }

    /// Borrowed view of the messages in append order.
    pub fn messages(&self) -> &[ConversationMessage] {
        &self.messages
    }

    pub fn last(&self) -> Option<&ConversationMessage> {
        self.messages.last()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
