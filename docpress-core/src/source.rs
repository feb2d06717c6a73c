use std::path::{Path, PathBuf};

/// Where the resolver asks whether a page file exists.
///
/// Kept behind a trait so resolution can run against the real docs tree,
/// against nothing at all, or against a fixture in tests.
pub trait ContentSource {
    /// `rel_path` is relative to the docs source root, e.g. `guide/Setup.md`.
    fn page_exists(&self, rel_path: &Path) -> bool;
}

/// Content source backed by a directory on disk.
pub struct FsContentSource {
    root: PathBuf,
}

impl FsContentSource {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }
}

impl ContentSource for FsContentSource {
    fn page_exists(&self, rel_path: &Path) -> bool {
        self.root.join(rel_path).is_file()
    }
}

/// Content source that reports every page as present.
///
/// Used when a configuration should resolve without a docs tree on hand.
pub struct NullContentSource;

impl ContentSource for NullContentSource {
    fn page_exists(&self, _rel_path: &Path) -> bool {
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fs_source_checks_files_under_root() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(dir.path().join("guide")).unwrap();
        std::fs::write(dir.path().join("guide/README.md"), "# Guide\n").unwrap();

        let source = FsContentSource::new(dir.path());
        assert!(source.page_exists(Path::new("guide/README.md")));
        assert!(!source.page_exists(Path::new("guide/Setup.md")));
        // Directories are not pages
        assert!(!source.page_exists(Path::new("guide")));
    }

    #[test]
    fn null_source_always_answers_yes() {
        assert!(NullContentSource.page_exists(Path::new("anything/at-all.md")));
    }
}
