mod actions;
mod document;

pub use actions::{ActionRegistry, DiffAction, DiffRequest, KeyBinding, MenuEntry, document_menu};
pub use document::{Document, DocumentId};

use parking_lot::Mutex;

use crate::integrations::EditorHost;

#[derive(Debug, Default)]
struct EditorState {
    documents: Vec<Document>,
    current: Option<DocumentId>,
    status: Vec<String>,
}

/// In-memory editor used by the command line front end and in tests.
#[derive(Debug, Default)]
pub struct MemoryEditor {
    state: Mutex<EditorState>,
}

impl MemoryEditor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a document to the tab list and focus it.
    pub fn open(&self, document: Document) -> DocumentId {
        let id = document.id();
        let mut state = self.state.lock();
        state.documents.push(document);
        state.current = Some(id);
        id
    }

    /// Focus an open document. Returns false if it is not open.
    pub fn focus(&self, id: DocumentId) -> bool {
        let mut state = self.state.lock();
        if state.documents.iter().any(|d| d.id() == id) {
            state.current = Some(id);
            true
        } else {
            false
        }
    }

    /// Run `f` against an open document, e.g. to edit or save it.
    pub fn update<F>(&self, id: DocumentId, f: F) -> bool
    where
        F: FnOnce(&mut Document),
    {
        let mut state = self.state.lock();
        match state.documents.iter_mut().find(|d| d.id() == id) {
            Some(document) => {
                f(document);
                true
            }
            None => false,
        }
    }

    /// Documents of the given filetype, in tab order.
    pub fn documents_with_filetype(&self, filetype: &str) -> Vec<Document> {
        self.state
            .lock()
            .documents
            .iter()
            .filter(|d| d.filetype() == Some(filetype))
            .cloned()
            .collect()
    }

    pub fn status_messages(&self) -> Vec<String> {
        self.state.lock().status.clone()
    }

    pub fn last_status(&self) -> Option<String> {
        self.state.lock().status.last().cloned()
    }
}

impl EditorHost for MemoryEditor {
    fn documents(&self) -> Vec<DocumentId> {
        self.state.lock().documents.iter().map(Document::id).collect()
    }

    fn current_document(&self) -> Option<DocumentId> {
        self.state.lock().current
    }

    fn document(&self, id: DocumentId) -> Option<Document> {
        self.state
            .lock()
            .documents
            .iter()
            .find(|d| d.id() == id)
            .cloned()
    }

    fn new_document(&self, name: &str, filetype: &str, text: &str) -> DocumentId {
        let document = Document::untitled(text.as_bytes().to_vec())
            .with_name(name)
            .with_filetype(filetype);
        self.open(document)
    }

    fn set_status(&self, message: &str) {
        self.state.lock().status.push(message.to_string());
    }
}
