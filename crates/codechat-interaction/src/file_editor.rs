//! File-backed editor.
//!
//! Stands in for an IDE: the "active document" is a file on disk and the
//! "selection" is an inclusive, 1-based line range within it. The file is
//! re-read on every query, so edits made in another program are picked up by
//! the next capture.

use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use codechat_core::context::{EditorApi, EditorError};

/// Inclusive, 1-based line range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineRange {
    pub start: usize,
    pub end: usize,
}

impl LineRange {
    pub fn new(start: usize, end: usize) -> Result<Self, String> {
        if start == 0 {
            return Err("line numbers start at 1".to_string());
        }
        if end < start {
            return Err(format!("range end {end} is before start {start}"));
        }
        Ok(Self { start, end })
    }
}

impl FromStr for LineRange {
    type Err = String;

    /// Parses `"12"` or `"3-10"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse = |part: &str| {
            part.trim()
                .parse::<usize>()
                .map_err(|_| format!("invalid line number: '{}'", part.trim()))
        };

        match s.split_once('-') {
            Some((start, end)) => Self::new(parse(start)?, parse(end)?),
            None => {
                let line = parse(s)?;
                Self::new(line, line)
            }
        }
    }
}

impl fmt::Display for LineRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.start == self.end {
            write!(f, "{}", self.start)
        } else {
            write!(f, "{}-{}", self.start, self.end)
        }
    }
}

/// An [`EditorApi`] over a single file on disk.
#[derive(Debug, Clone, Default)]
pub struct FileEditor {
    document: Option<PathBuf>,
    selection: Option<LineRange>,
}

impl FileEditor {
    /// An editor with nothing open.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_document(path: impl Into<PathBuf>) -> Self {
        Self {
            document: Some(path.into()),
            selection: None,
        }
    }

    /// Opens another document. The selection is cleared.
    pub fn open(&mut self, path: impl Into<PathBuf>) {
        self.document = Some(path.into());
        self.selection = None;
    }

    pub fn select(&mut self, range: LineRange) {
        self.selection = Some(range);
    }

    pub fn clear_selection(&mut self) {
        self.selection = None;
    }

    pub fn document(&self) -> Option<&Path> {
        self.document.as_deref()
    }

    pub fn selection(&self) -> Option<LineRange> {
        self.selection
    }

    fn read_document(&self, path: &Path) -> Result<String, EditorError> {
        fs::read_to_string(path).map_err(|err| match err.kind() {
            ErrorKind::PermissionDenied => EditorError::PermissionDenied(path.display().to_string()),
            _ => EditorError::Io(format!("cannot read {}: {}", path.display(), err)),
        })
    }
}

impl EditorApi for FileEditor {
    fn selection_text(&self) -> Result<Option<String>, EditorError> {
        let (Some(path), Some(range)) = (self.document.as_deref(), self.selection) else {
            return Ok(None);
        };

        let text = self.read_document(path)?;
        let selected: Vec<&str> = text
            .lines()
            .skip(range.start.saturating_sub(1))
            .take(range.end.saturating_sub(range.start) + 1)
            .collect();

        if selected.is_empty() {
            return Ok(None);
        }
        Ok(Some(selected.join("\n")))
    }

    fn document_text(&self) -> Result<Option<String>, EditorError> {
        match self.document.as_deref() {
            Some(path) => self.read_document(path).map(Some),
            None => Ok(None),
        }
    }
}
