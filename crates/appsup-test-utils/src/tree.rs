//! [`TestTree`] builder for reconciler test scenarios.

use std::collections::BTreeSet;
use std::fs;
use std::path::{Path, PathBuf};

use filetime::FileTime;
use tempfile::TempDir;

/// A temporary directory with helpers to lay out source and destination
/// trees and assert on the result.
///
/// All `rel` arguments are relative to [`TestTree::root`].
///
/// # Example
///
/// ```rust,no_run
/// use appsup_test_utils::TestTree;
///
/// let tree = TestTree::new();
/// tree.write("A/x.txt", "0123456789");
/// tree.write("A/sub/y.txt", "y");
/// tree.mkdir("dst");
/// tree.assert_file("A/x.txt", "0123456789");
/// ```
pub struct TestTree {
    temp_dir: TempDir,
}

impl Default for TestTree {
    fn default() -> Self {
        Self::new()
    }
}

impl TestTree {
    /// Create an empty temporary directory.
    pub fn new() -> Self {
        Self {
            temp_dir: TempDir::new().unwrap(),
        }
    }

    /// Return the root path of the temporary directory.
    pub fn root(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn path(&self, rel: &str) -> PathBuf {
        self.root().join(rel)
    }

    /// Write a file, creating parent directories.
    pub fn write(&self, rel: &str, content: &str) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        fs::write(&path, content).unwrap();
        path
    }

    /// Write a file and set its modification time to `unix_secs`.
    pub fn write_with_mtime(&self, rel: &str, content: &str, unix_secs: i64) -> PathBuf {
        let path = self.write(rel, content);
        self.set_mtime(rel, unix_secs);
        path
    }

    pub fn set_mtime(&self, rel: &str, unix_secs: i64) {
        filetime::set_file_mtime(self.path(rel), FileTime::from_unix_time(unix_secs, 0)).unwrap();
    }

    pub fn mtime(&self, rel: &str) -> i64 {
        let meta = fs::metadata(self.path(rel)).unwrap();
        FileTime::from_last_modification_time(&meta).unix_seconds()
    }

    /// Create a directory and its parents.
    pub fn mkdir(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        fs::create_dir_all(&path).unwrap();
        path
    }

    /// Create a symbolic link at `rel` storing `target` verbatim.
    #[cfg(unix)]
    pub fn symlink(&self, rel: &str, target: impl AsRef<Path>) -> PathBuf {
        let path = self.path(rel);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).unwrap();
        }
        std::os::unix::fs::symlink(target, &path).unwrap();
        path
    }

    pub fn read(&self, rel: &str) -> String {
        fs::read_to_string(self.path(rel)).unwrap()
    }

    /// Names of the immediate children of a directory.
    pub fn child_names(&self, rel: &str) -> BTreeSet<String> {
        fs::read_dir(self.path(rel))
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect()
    }

    pub fn is_symlink(&self, rel: &str) -> bool {
        fs::symlink_metadata(self.path(rel))
            .map(|meta| meta.file_type().is_symlink())
            .unwrap_or(false)
    }

    /// Assert that `rel` is a symbolic link and return its stored target.
    ///
    /// # Panics
    /// Panics with a descriptive message if `rel` is not a link.
    pub fn assert_symlink(&self, rel: &str) -> PathBuf {
        let path = self.path(rel);
        assert!(
            self.is_symlink(rel),
            "Expected a symbolic link: {}",
            path.display()
        );
        fs::read_link(&path).unwrap()
    }

    /// Assert that `rel` is a regular file (not a link) with `content`.
    ///
    /// # Panics
    /// Panics with a descriptive message on mismatch.
    pub fn assert_file(&self, rel: &str, content: &str) {
        let path = self.path(rel);
        let meta = fs::symlink_metadata(&path)
            .unwrap_or_else(|_| panic!("Expected file to exist: {}", path.display()));
        assert!(
            meta.is_file(),
            "Expected a regular file: {}",
            path.display()
        );
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            content,
            "Unexpected content in {}",
            path.display()
        );
    }

    /// Assert that nothing exists at `rel`, not even a dangling link.
    ///
    /// # Panics
    /// Panics with a descriptive message if the path exists.
    pub fn assert_missing(&self, rel: &str) {
        let path = self.path(rel);
        assert!(
            fs::symlink_metadata(&path).is_err(),
            "Expected path NOT to exist: {}",
            path.display()
        );
    }
}
