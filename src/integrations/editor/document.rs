use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::error::DiffError;

/// Stable identity of an open document, independent of its file name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentId(Uuid);

impl DocumentId {
    pub fn new() -> Self {
        DocumentId(Uuid::new_v4())
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What the diff pipeline can observe about an open document.
#[derive(Debug, Clone)]
pub struct Document {
    id: DocumentId,
    file_name: Option<PathBuf>,
    text: Vec<u8>,
    modified: bool,
    filetype: Option<String>,
    name: Option<String>,
}

impl Document {
    /// A document freshly loaded from disk, matching its saved file.
    pub fn from_file(path: &Path) -> Result<Self, DiffError> {
        let text = std::fs::read(path)?;
        Ok(Self::saved(path.to_path_buf(), text))
    }

    /// A document backed by `path` with no pending edits.
    pub fn saved(path: PathBuf, text: Vec<u8>) -> Self {
        Document {
            id: DocumentId::new(),
            file_name: Some(path),
            text,
            modified: false,
            filetype: None,
            name: None,
        }
    }

    /// A buffer that was never written to disk.
    pub fn untitled(text: Vec<u8>) -> Self {
        Document {
            id: DocumentId::new(),
            file_name: None,
            text,
            modified: true,
            filetype: None,
            name: None,
        }
    }

    /// Name a buffer that has no file behind it.
    pub fn with_name(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_filetype(mut self, filetype: &str) -> Self {
        self.filetype = Some(filetype.to_string());
        self
    }

    pub fn id(&self) -> DocumentId {
        self.id
    }

    pub fn saved_path(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.modified
    }

    pub fn text(&self) -> &[u8] {
        &self.text
    }

    pub fn filetype(&self) -> Option<&str> {
        self.filetype.as_deref()
    }

    /// Replace the in-memory text, leaving the saved file untouched.
    pub fn edit(&mut self, text: Vec<u8>) {
        self.text = text;
        self.modified = true;
    }

    /// Record that the current text was written to `path`.
    pub fn mark_saved(&mut self, path: PathBuf) {
        self.file_name = Some(path);
        self.modified = false;
    }

    /// Base name of the saved file, if the document has one.
    pub fn base_name(&self) -> Option<&str> {
        self.file_name
            .as_deref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
    }

    pub fn display_name(&self) -> String {
        self.base_name()
            .map(str::to_string)
            .or_else(|| self.name.clone())
            .unwrap_or_else(|| "untitled".to_string())
    }
}
