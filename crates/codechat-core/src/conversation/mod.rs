//! Conversation domain module.
//!
//! # Module Structure
//!
//! - `message`: Conversation message types (`MessageId`, `MessageRole`, `ConversationMessage`)
//! - `store`: The append-only message log owned by a session (`ConversationStore`)

mod message;
mod store;

pub use message::{ConversationMessage, MessageId, MessageRole};
pub use store::ConversationStore;
