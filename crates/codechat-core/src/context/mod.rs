//! Editor context capture.
//!
//! # Module Structure
//!
//! - `snapshot`: The captured code and how it was obtained (`ContextSnapshot`, `ContextSource`)
//! - `editor`: The editor-introspection seam (`EditorApi`, `EditorError`)
//! - `provider`: Selection-then-document capture policy (`ContextProvider`)

mod editor;
mod provider;
mod snapshot;

pub use editor::{EditorApi, EditorError};
pub use provider::{CONTEXT_ERROR_PREFIX, ContextProvider, DEFAULT_EMPTY_PLACEHOLDER};
pub use snapshot::{ContextSnapshot, ContextSource};
