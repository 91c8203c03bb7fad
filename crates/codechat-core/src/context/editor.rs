use thiserror::Error;

/// Failures while querying an editor.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EditorError {
    #[error("editor is not running")]
    NotRunning,

    #[error("no document is open")]
    NoDocument,

    #[error("permission denied: {0}")]
    PermissionDenied(String),

    #[error("{0}")]
    Io(String),
}

/// Read-only view of the user's editor.
///
/// Implementations answer two questions: what is selected, and what is in the
/// active document. `Ok(None)` means "nothing there", which is not an error.
pub trait EditorApi {
    /// Brings the source view to the front before reading. Best effort.
    fn focus_source(&self) -> Result<(), EditorError> {
        Ok(())
    }

    /// Text of the current selection, if any.
    fn selection_text(&self) -> Result<Option<String>, EditorError>;

    /// Full text of the active document, if any.
    fn document_text(&self) -> Result<Option<String>, EditorError>;
}
