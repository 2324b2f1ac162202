use tracing::debug;

use crate::integrations::{DocumentId, EditorHost};

/// Name given to buffers holding captured diff output.
pub const OUTPUT_DOCUMENT_NAME: &str = "diff";
/// Filetype used to highlight captured diff output.
pub const OUTPUT_FILETYPE: &str = "Diff";

/// Hands captured command output to the editor as a new buffer.
#[derive(Debug, Clone)]
pub struct ResultSink {
    name: String,
    filetype: String,
}

impl ResultSink {
    pub fn new(name: &str, filetype: &str) -> Self {
        Self {
            name: name.to_string(),
            filetype: filetype.to_string(),
        }
    }

    /// Open a new unsaved buffer with `output`. Nothing happens when there
    /// is no output, i.e. the command ran asynchronously.
    pub fn deliver(&self, host: &dyn EditorHost, output: Option<&str>) -> Option<DocumentId> {
        let output = output?;
        let id = host.new_document(&self.name, &self.filetype, output);
        debug!(document = %id, bytes = output.len(), "opened diff output buffer");
        Some(id)
    }
}

impl Default for ResultSink {
    fn default() -> Self {
        Self::new(OUTPUT_DOCUMENT_NAME, OUTPUT_FILETYPE)
    }
}
