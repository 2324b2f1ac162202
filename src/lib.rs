// difftool - run an external diff tool between two editor documents
//
// Documents with unsaved edits are snapshotted to temporary files, the
// selected command template is filled in with both paths, and the command
// runs through the platform shell. Captured output lands in a new buffer.

pub mod config;
pub mod diff;
pub mod error;
pub mod integrations;
pub mod logging;
pub mod shell;
pub mod ui;

#[cfg(test)]
mod tests;

pub use config::{LogLevel, Settings};
pub use diff::{DiffCommand, DiffPipeline, ResolvedPath, STOCK_COMMANDS};
pub use error::DiffError;
pub use integrations::{ActionRegistry, DiffAction, Document, DocumentId, EditorHost, MemoryEditor};
pub use shell::{ProcessRunner, RunResult, ShellRunner};

/// Version of the difftool crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
