use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use crate::error::DiffError;
use crate::integrations::Document;

const GENERIC_PREFIX: &str = "difftool-";

/// A path that reflects a document's content for one diff request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPath {
    path: PathBuf,
    is_temporary: bool,
}

impl ResolvedPath {
    pub fn saved(path: &Path) -> Self {
        ResolvedPath {
            path: path.to_path_buf(),
            is_temporary: false,
        }
    }

    pub fn temporary(path: PathBuf) -> Self {
        ResolvedPath {
            path,
            is_temporary: true,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Whether this is a snapshot the caller has to delete.
    pub fn is_temporary(&self) -> bool {
        self.is_temporary
    }

    /// The path as it goes into a command line. Paths that are not valid
    /// UTF-8 are refused rather than rewritten.
    pub fn as_arg(&self) -> Result<&str, DiffError> {
        self.path
            .to_str()
            .ok_or_else(|| DiffError::InvalidPath(self.path.clone()))
    }

    /// Delete the snapshot file. Saved paths are never touched.
    pub fn remove_if_temporary(&self) -> bool {
        if !self.is_temporary {
            return false;
        }
        match std::fs::remove_file(&self.path) {
            Ok(()) => true,
            Err(e) => {
                warn!(path = %self.path.display(), "could not remove snapshot: {}", e);
                false
            }
        }
    }
}

/// Turns documents into paths an external tool can read.
#[derive(Debug, Clone, Default)]
pub struct SnapshotResolver {
    dir: Option<PathBuf>,
}

impl SnapshotResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write snapshots to `dir` instead of the system temp directory.
    pub fn in_dir(dir: PathBuf) -> Self {
        SnapshotResolver { dir: Some(dir) }
    }

    /// The document's saved path when it has no pending edits, otherwise a
    /// fresh snapshot of its in-memory text.
    pub fn resolve(&self, doc: &Document) -> Result<ResolvedPath, DiffError> {
        if !doc.has_unsaved_changes() {
            if let Some(path) = doc.saved_path() {
                debug!(document = %doc.display_name(), path = %path.display(), "using saved file");
                return Ok(ResolvedPath::saved(path));
            }
        }

        self.write_snapshot(doc)
    }

    /// The document's saved path, whatever its in-memory state.
    pub fn resolve_saved(&self, doc: &Document) -> Result<ResolvedPath, DiffError> {
        doc.saved_path()
            .map(ResolvedPath::saved)
            .ok_or_else(|| DiffError::NoSavedVersion(doc.display_name()))
    }

    fn write_snapshot(&self, doc: &Document) -> Result<ResolvedPath, DiffError> {
        let snapshot_error = |e: std::io::Error| DiffError::Snapshot {
            document: doc.display_name(),
            message: e.to_string(),
        };

        let prefix = snapshot_prefix(doc);
        let suffix = doc
            .saved_path()
            .and_then(|p| p.extension())
            .map(|ext| format!(".{}", ext.to_string_lossy()))
            .unwrap_or_default();

        let mut builder = tempfile::Builder::new();
        builder.prefix(&prefix).suffix(&suffix);
        let mut file = match &self.dir {
            Some(dir) => builder.tempfile_in(dir),
            None => builder.tempfile(),
        }
        .map_err(snapshot_error)?;

        file.write_all(doc.text()).map_err(snapshot_error)?;
        file.flush().map_err(snapshot_error)?;

        let (_, path) = file.keep().map_err(|e| snapshot_error(e.error))?;
        debug!(document = %doc.display_name(), path = %path.display(), "wrote snapshot");

        Ok(ResolvedPath::temporary(path))
    }
}

fn snapshot_prefix(doc: &Document) -> String {
    doc.saved_path()
        .and_then(|p| p.file_stem())
        .map(|stem| format!("{}-", stem.to_string_lossy()))
        .unwrap_or_else(|| GENERIC_PREFIX.to_string())
}

/// [`SnapshotResolver::resolve`] using the system temp directory.
pub fn resolve(doc: &Document) -> Result<ResolvedPath, DiffError> {
    SnapshotResolver::new().resolve(doc)
}

/// [`SnapshotResolver::resolve_saved`].
pub fn resolve_saved(doc: &Document) -> Result<ResolvedPath, DiffError> {
    SnapshotResolver::new().resolve_saved(doc)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn entries(dir: &Path) -> Vec<PathBuf> {
        std::fs::read_dir(dir)
            .unwrap()
            .map(|e| e.unwrap().path())
            .collect()
    }

    #[test]
    fn test_unmodified_document_uses_saved_path() {
        let snapshots = tempdir().unwrap();
        let resolver = SnapshotResolver::in_dir(snapshots.path().to_path_buf());
        let doc = Document::saved(PathBuf::from("/srv/project/main.rs"), b"fn main() {}".to_vec());

        let resolved = resolver.resolve(&doc).unwrap();
        assert_eq!(resolved.path(), Path::new("/srv/project/main.rs"));
        assert!(!resolved.is_temporary());
        assert!(entries(snapshots.path()).is_empty());
    }

    #[test]
    fn test_modified_document_is_snapshotted() {
        let snapshots = tempdir().unwrap();
        let resolver = SnapshotResolver::in_dir(snapshots.path().to_path_buf());
        let mut doc = Document::saved(PathBuf::from("/srv/project/main.rs"), b"old".to_vec());
        doc.edit(b"new \xff bytes\r\n".to_vec());

        let resolved = resolver.resolve(&doc).unwrap();
        assert!(resolved.is_temporary());
        assert_eq!(entries(snapshots.path()), vec![resolved.path().to_path_buf()]);
        assert_eq!(std::fs::read(resolved.path()).unwrap(), b"new \xff bytes\r\n");

        let name = resolved.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with("main-"));
        assert!(name.ends_with(".rs"));
    }

    #[test]
    fn test_untitled_document_gets_generic_name() {
        let snapshots = tempdir().unwrap();
        let resolver = SnapshotResolver::in_dir(snapshots.path().to_path_buf());
        let doc = Document::untitled(b"scratch".to_vec());

        let resolved = resolver.resolve(&doc).unwrap();
        let name = resolved.path().file_name().unwrap().to_string_lossy().to_string();
        assert!(name.starts_with(GENERIC_PREFIX));
        assert_eq!(std::fs::read(resolved.path()).unwrap(), b"scratch");
    }

    #[test]
    fn test_each_resolution_makes_a_new_file() {
        let snapshots = tempdir().unwrap();
        let resolver = SnapshotResolver::in_dir(snapshots.path().to_path_buf());
        let doc = Document::untitled(b"same".to_vec());

        let first = resolver.resolve(&doc).unwrap();
        let second = resolver.resolve(&doc).unwrap();
        assert_ne!(first.path(), second.path());
        assert_eq!(entries(snapshots.path()).len(), 2);
    }

    #[cfg(target_family = "unix")]
    #[test]
    fn test_non_utf8_path_is_refused() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let path = Path::new(OsStr::from_bytes(b"/srv/caf\xe9.txt"));
        let resolved = ResolvedPath::saved(path);
        assert!(matches!(resolved.as_arg(), Err(DiffError::InvalidPath(p)) if p == path));

        let plain = ResolvedPath::saved(Path::new("/srv/cafe.txt"));
        assert_eq!(plain.as_arg().unwrap(), "/srv/cafe.txt");
    }

    #[test]
    fn test_resolve_saved() {
        let mut doc = Document::saved(PathBuf::from("/srv/a.txt"), b"a".to_vec());
        doc.edit(b"b".to_vec());
        let resolved = resolve_saved(&doc).unwrap();
        assert_eq!(resolved.path(), Path::new("/srv/a.txt"));
        assert!(!resolved.is_temporary());

        let untitled = Document::untitled(Vec::new());
        assert!(matches!(
            resolve_saved(&untitled),
            Err(DiffError::NoSavedVersion(_))
        ));
    }

    #[test]
    fn test_unwritable_directory_fails() {
        let resolver = SnapshotResolver::in_dir(PathBuf::from("/nonexistent/difftool/snapshots"));
        let err = resolver.resolve(&Document::untitled(b"x".to_vec())).unwrap_err();
        assert!(matches!(err, DiffError::Snapshot { .. }));
    }

    #[test]
    fn test_remove_if_temporary() {
        let snapshots = tempdir().unwrap();
        let resolver = SnapshotResolver::in_dir(snapshots.path().to_path_buf());
        let resolved = resolver.resolve(&Document::untitled(b"x".to_vec())).unwrap();

        assert!(resolved.remove_if_temporary());
        assert!(!resolved.path().exists());

        let saved = ResolvedPath::saved(Path::new("/srv/keep.txt"));
        assert!(!saved.remove_if_temporary());
    }
}
