use std::path::PathBuf;

use tracing::{debug, warn};

use super::DiffCommand;
use super::snapshot::SnapshotResolver;
use crate::config::Settings;
use crate::error::DiffError;
use crate::integrations::{Document, DocumentId, EditorHost};
use crate::shell::{ProcessRunner, ShellRunner};
use crate::ui::ResultSink;

/// What a successful diff request did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DiffOutcome {
    /// The command line handed to the shell.
    pub command_line: String,
    /// Buffer holding captured output, for synchronous commands.
    pub output_document: Option<DocumentId>,
    /// Exit status of a synchronous command.
    pub exit_code: Option<i32>,
    /// Snapshots still on disk. Only asynchronous runs leave any, since the
    /// external tool may still be reading them.
    pub leftover_snapshots: Vec<PathBuf>,
}

/// Resolve, build, run, deliver.
pub struct DiffPipeline<R: ProcessRunner = ShellRunner> {
    runner: R,
    resolver: SnapshotResolver,
    sink: ResultSink,
}

impl DiffPipeline<ShellRunner> {
    pub fn new() -> Self {
        Self::with_runner(ShellRunner::new())
    }
}

impl Default for DiffPipeline<ShellRunner> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: ProcessRunner> DiffPipeline<R> {
    pub fn with_runner(runner: R) -> Self {
        Self {
            runner,
            resolver: SnapshotResolver::new(),
            sink: ResultSink::default(),
        }
    }

    pub fn resolver(mut self, resolver: SnapshotResolver) -> Self {
        self.resolver = resolver;
        self
    }

    pub fn sink(mut self, sink: ResultSink) -> Self {
        self.sink = sink;
        self
    }

    /// Compare two open documents with the command selected in `settings`.
    ///
    /// Errors are logged and shown on the host's status bar before being
    /// returned; the pipeline stays usable for later requests.
    pub fn diff(
        &self,
        host: &dyn EditorHost,
        settings: &Settings,
        current: DocumentId,
        target: DocumentId,
    ) -> Result<DiffOutcome, DiffError> {
        let result = settings
            .active_command()
            .and_then(|command| self.diff_ids(host, &command, current, target));
        report(host, result)
    }

    /// Like [`DiffPipeline::diff`] with an explicit command.
    pub fn diff_with(
        &self,
        host: &dyn EditorHost,
        command: &DiffCommand,
        current: DocumentId,
        target: DocumentId,
    ) -> Result<DiffOutcome, DiffError> {
        report(host, self.diff_ids(host, command, current, target))
    }

    fn diff_ids(
        &self,
        host: &dyn EditorHost,
        command: &DiffCommand,
        current: DocumentId,
        target: DocumentId,
    ) -> Result<DiffOutcome, DiffError> {
        let current = host
            .document(current)
            .ok_or_else(|| DiffError::DocumentNotFound(current.to_string()))?;
        let target = host
            .document(target)
            .ok_or_else(|| DiffError::DocumentNotFound(target.to_string()))?;

        self.run_request(host, command, &current, &target)
    }

    /// Compare two documents the caller already holds.
    pub fn diff_documents(
        &self,
        host: &dyn EditorHost,
        command: &DiffCommand,
        current: &Document,
        target: &Document,
    ) -> Result<DiffOutcome, DiffError> {
        report(host, self.run_request(host, command, current, target))
    }

    fn run_request(
        &self,
        host: &dyn EditorHost,
        command: &DiffCommand,
        current: &Document,
        target: &Document,
    ) -> Result<DiffOutcome, DiffError> {
        // The target is resolved first so a self-diff without a saved
        // version fails before any snapshot is written.
        let target_path = if current.id() == target.id() {
            self.resolver.resolve_saved(target)?
        } else {
            self.resolver.resolve(target)?
        };
        let current_path = self.resolver.resolve(current)?;

        let command_line = command.command_line(current_path.as_arg()?, target_path.as_arg()?);
        debug!(
            command = %command.label,
            current = %current_path.path().display(),
            target = %target_path.path().display(),
            "built diff command"
        );

        let result = self.runner.run(&command_line, command.runs_synchronously)?;

        let snapshots = [current_path, target_path];
        let leftover_snapshots = if command.runs_synchronously {
            snapshots.iter().for_each(|p| {
                p.remove_if_temporary();
            });
            Vec::new()
        } else {
            snapshots
                .iter()
                .filter(|p| p.is_temporary())
                .map(|p| p.path().to_path_buf())
                .collect()
        };

        let output_document = self.sink.deliver(host, result.captured_output.as_deref());

        Ok(DiffOutcome {
            command_line,
            output_document,
            exit_code: result.exit_code,
            leftover_snapshots,
        })
    }
}

fn report(
    host: &dyn EditorHost,
    result: Result<DiffOutcome, DiffError>,
) -> Result<DiffOutcome, DiffError> {
    if let Err(ref err) = result {
        warn!("difftool: error: {}", err);
        host.set_status(&format!("difftool: error: {}", err));
    }
    result
}
