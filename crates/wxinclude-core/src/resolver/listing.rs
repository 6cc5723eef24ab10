//! Directory listing used for extension mask matching.

use std::io;
use std::path::{Path, PathBuf};
use tracing::trace;
use walkdir::WalkDir;

/// Lists the regular files directly inside a directory
///
/// Implementations must return paths in a deterministic order so that
/// the generated output does not depend on file system iteration order.
pub trait DirectoryListing {
    /// Returns the regular files in `dir`, sorted by path
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>>;
}

/// Non-recursive listing backed by `walkdir`
///
/// Symbolic links are followed, so a link to a regular file is listed.
#[derive(Debug, Clone, Copy, Default)]
pub struct WalkDirListing;

impl DirectoryListing for WalkDirListing {
    fn list_files(&self, dir: &Path) -> io::Result<Vec<PathBuf>> {
        let mut files = Vec::new();

        for entry in WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .follow_links(true)
            .sort_by_file_name()
        {
            let entry = match entry {
                Ok(entry) => entry,
                // The directory itself could not be read
                Err(e) if e.depth() == 0 => return Err(e.into()),
                Err(e) => {
                    trace!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            if entry.file_type().is_file() {
                files.push(entry.into_path());
            }
        }

        files.sort();
        Ok(files)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_lists_regular_files_sorted() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("b.png"), b"b").unwrap();
        fs::write(dir.path().join("a.png"), b"a").unwrap();
        fs::write(dir.path().join("c.txt"), b"c").unwrap();
        fs::create_dir(dir.path().join("sub.png")).unwrap();
        fs::write(dir.path().join("sub.png").join("nested.png"), b"n").unwrap();

        let files = WalkDirListing.list_files(dir.path()).unwrap();
        let names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["a.png", "b.png", "c.txt"]);
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        assert!(WalkDirListing.list_files(&dir.path().join("missing")).is_err());
    }
}
