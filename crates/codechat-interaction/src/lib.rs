//! Adapters to the outside world: the Gemini REST API and the file-backed
//! editor.

pub mod file_editor;
pub mod gemini_api_agent;
pub mod request;

pub use file_editor::{FileEditor, LineRange};
pub use gemini_api_agent::{GeminiApiAgent, ModelClient, ModelError, NO_RESPONSE_TEXT};
pub use request::{Content, GenerateContentRequest, Part, RequestBuilder};
