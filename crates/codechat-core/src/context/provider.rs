use tracing::debug;

use super::editor::{EditorApi, EditorError};
use super::snapshot::{ContextSnapshot, ContextSource};

/// Placeholder text used when there is no code to send.
pub const DEFAULT_EMPTY_PLACEHOLDER: &str = "No code in the active document.";

/// Prefix of the diagnostic text carried by an `Error` snapshot.
pub const CONTEXT_ERROR_PREFIX: &str = "Error retrieving code context";

/// Captures code context from an editor.
///
/// The selection wins over the document; an empty document yields a fixed
/// placeholder; editor failures become an `Error` snapshot. `capture` never
/// fails.
pub struct ContextProvider<E> {
    editor: E,
    empty_placeholder: String,
}

impl<E: EditorApi> ContextProvider<E> {
    pub fn new(editor: E) -> Self {
        Self {
            editor,
            empty_placeholder: DEFAULT_EMPTY_PLACEHOLDER.to_string(),
        }
    }

    /// Overrides the text used for `Empty` snapshots.
    pub fn with_empty_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.empty_placeholder = placeholder.into();
        self
    }

    pub fn editor(&self) -> &E {
        &self.editor
    }

    /// Mutable access for front-ends that drive the editor (open a file,
    /// change the selection).
    pub fn editor_mut(&mut self) -> &mut E {
        &mut self.editor
    }

    /// The snapshot a session starts with, before anything was captured.
    pub fn empty_snapshot(&self) -> ContextSnapshot {
        ContextSnapshot::new(self.empty_placeholder.clone(), ContextSource::Empty)
    }

    /// Reads the selection, falling back to the full document.
    pub fn capture(&self) -> ContextSnapshot {
        if let Err(err) = self.editor.focus_source() {
            debug!(error = %err, "Could not focus editor source view, reading anyway");
        }

        let snapshot = match self.read_editor() {
            Ok(snapshot) => snapshot,
            Err(err) => {
                ContextSnapshot::new(format!("{CONTEXT_ERROR_PREFIX}: {err}"), ContextSource::Error)
            }
        };

        debug!(
            source = ?snapshot.source,
            chars = snapshot.char_count(),
            "Captured editor context"
        );
        snapshot
    }

    fn read_editor(&self) -> Result<ContextSnapshot, EditorError> {
        if let Some(selection) = self.editor.selection_text()? {
            if !selection.trim().is_empty() {
                return Ok(ContextSnapshot::new(selection, ContextSource::Selection));
            }
        }

        match self.editor.document_text()? {
            Some(text) if !text.trim().is_empty() => {
                Ok(ContextSnapshot::new(text, ContextSource::FullDocument))
            }
            _ => Ok(self.empty_snapshot()),
        }
    }
}
