pub mod editor;

pub use editor::{
    ActionRegistry, DiffAction, DiffRequest, Document, DocumentId, KeyBinding, MemoryEditor,
    MenuEntry, document_menu,
};

/// The editor the diff tool is embedded in.
///
/// The host owns its documents; everything here only reads them, apart
/// from opening new output buffers and posting status messages.
pub trait EditorHost {
    /// Open documents in tab order.
    fn documents(&self) -> Vec<DocumentId>;

    /// The document that has focus, if any.
    fn current_document(&self) -> Option<DocumentId>;

    /// A snapshot of an open document.
    fn document(&self, id: DocumentId) -> Option<Document>;

    /// Open a new, unsaved buffer holding `text`.
    fn new_document(&self, name: &str, filetype: &str, text: &str) -> DocumentId;

    /// Show a short message in the status bar.
    fn set_status(&self, message: &str);
}
