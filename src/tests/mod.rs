#[cfg(unix)]
pub mod action_tests;

use test_context::TestContext;
use tempfile::TempDir;

use crate::diff::DiffPipeline;
use crate::diff::snapshot::SnapshotResolver;
use crate::integrations::MemoryEditor;
use crate::shell::ShellRunner;

// Common test utilities and helpers
pub(crate) mod test_utils {
    use std::path::{Path, PathBuf};

    pub fn write_file(dir: &Path, name: &str, contents: &str) -> PathBuf {
        let path = dir.join(name);
        std::fs::write(&path, contents).unwrap();
        path
    }

    pub fn entries(dir: &Path) -> usize {
        std::fs::read_dir(dir).unwrap().count()
    }
}

/// An editor, a scratch directory for files and one for snapshots, and a
/// pipeline running commands through `/bin/sh`.
pub struct DiffContext {
    pub editor: MemoryEditor,
    pub pipeline: DiffPipeline<ShellRunner>,
    pub files: TempDir,
    pub snapshots: TempDir,
}

impl TestContext for DiffContext {
    fn setup() -> Self {
        let files = TempDir::new().unwrap();
        let snapshots = TempDir::new().unwrap();
        let pipeline = DiffPipeline::with_runner(ShellRunner::new().with_shell("/bin/sh"))
            .resolver(SnapshotResolver::in_dir(snapshots.path().to_path_buf()));

        DiffContext {
            editor: MemoryEditor::new(),
            pipeline,
            files,
            snapshots,
        }
    }
}
