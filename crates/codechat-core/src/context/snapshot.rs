use serde::{Deserialize, Serialize};
use std::fmt;

/// How the text of a [`ContextSnapshot`] was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContextSource {
    /// The user's explicit selection in the editor.
    Selection,
    /// The whole active document.
    FullDocument,
    /// Nothing to send: no selection and an empty or missing document.
    Empty,
    /// The editor could not be queried; the text is a diagnostic.
    Error,
}

impl fmt::Display for ContextSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ContextSource::Selection => "Selected code",
            ContextSource::FullDocument => "Full document",
            ContextSource::Empty => "No code",
            ContextSource::Error => "Error",
        };
        f.write_str(label)
    }
}

/// The code captured from the editor, tagged with its source.
///
/// Only the latest snapshot is kept by a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContextSnapshot {
    pub text: String,
    pub source: ContextSource,
}

impl ContextSnapshot {
    pub fn new(text: impl Into<String>, source: ContextSource) -> Self {
        Self {
            text: text.into(),
            source,
        }
    }

    /// True when the snapshot came from an explicit user selection.
    pub fn is_selection(&self) -> bool {
        self.source == ContextSource::Selection
    }

    /// Length of the captured text in characters, not bytes.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_char_count_counts_characters() {
        let snapshot = ContextSnapshot::new("// héllo ✓", ContextSource::Selection);
        assert_eq!(snapshot.char_count(), 10);
        assert!(snapshot.text.len() > snapshot.char_count());
    }
}
