//! Request construction for the Gemini `generateContent` endpoint.
//!
//! The first entry of `contents` always carries the instructional preamble and
//! the captured code, so the model has the context before any turn-taking
//! starts. Every history message follows, in order, with nothing trimmed.

use codechat_core::config::DEFAULT_PREAMBLE;
use codechat_core::context::ContextSnapshot;
use codechat_core::conversation::{ConversationMessage, MessageRole};
use serde::{Deserialize, Serialize};

pub const USER_ROLE: &str = "user";
pub const MODEL_ROLE: &str = "model";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenerateContentRequest {
    pub contents: Vec<Content>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Content {
    pub role: String,
    pub parts: Vec<Part>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Part {
    pub text: String,
}

impl Content {
    fn text(role: &str, text: impl Into<String>) -> Self {
        Self {
            role: role.to_string(),
            parts: vec![Part { text: text.into() }],
        }
    }
}

/// Maps a conversation role onto the API's role names.
pub fn api_role(role: MessageRole) -> &'static str {
    match role {
        MessageRole::User => USER_ROLE,
        MessageRole::Assistant => MODEL_ROLE,
    }
}

/// Turns a context snapshot plus the conversation into a request body.
#[derive(Debug, Clone)]
pub struct RequestBuilder {
    preamble: String,
}

impl Default for RequestBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_PREAMBLE)
    }
}

impl RequestBuilder {
    pub fn new(preamble: impl Into<String>) -> Self {
        Self {
            preamble: preamble.into(),
        }
    }

    pub fn build(
        &self,
        context: &ContextSnapshot,
        history: &[ConversationMessage],
    ) -> GenerateContentRequest {
        let mut contents = Vec::with_capacity(history.len() + 1);
        contents.push(Content::text(
            USER_ROLE,
            format!("{}\n\n{}", self.preamble, context.text),
        ));
        contents.extend(
            history
                .iter()
                .map(|message| Content::text(api_role(message.role), message.content.clone())),
        );

        GenerateContentRequest { contents }
    }
}
