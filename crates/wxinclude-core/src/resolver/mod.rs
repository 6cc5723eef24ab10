//! Input file discovery.
//!
//! Inputs come from two sources:
//!
//! 1. Explicit files, kept in the order they were given (duplicates
//!    included; identifier collisions are caught by the converter)
//! 2. Extension masks, matched against the regular files of a base
//!    directory (non-recursive) and collected into one sorted set
//!
//! Explicit files always come first in the resolved [`FileSet`].
//!
//! ## Extensibility
//!
//! The [`DirectoryListing`] trait decouples mask matching from the file
//! system:
//!
//! ```no_run
//! use std::path::{Path, PathBuf};
//! use wxinclude_core::resolver::DirectoryListing;
//!
//! struct FixedListing(Vec<PathBuf>);
//!
//! impl DirectoryListing for FixedListing {
//!     fn list_files(&self, _dir: &Path) -> std::io::Result<Vec<PathBuf>> {
//!         Ok(self.0.clone())
//!     }
//! }
//! ```

mod listing;

use crate::error::{Error, Result};
use crate::naming::{compose_name, extension_of};
use std::collections::BTreeSet;
use std::fs::File;
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

pub use listing::{DirectoryListing, WalkDirListing};

/// One input specification
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSpec {
    /// A file named directly
    ExplicitFile(PathBuf),
    /// An extension mask such as `.png`, matched in the base directory
    ExtensionMask(String),
}

impl InputSpec {
    /// Creates an explicit file spec
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::ExplicitFile(path.into())
    }

    /// Creates an extension mask spec
    pub fn mask(pattern: impl Into<String>) -> Self {
        Self::ExtensionMask(pattern.into())
    }
}

/// An input file that was successfully opened
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedFile {
    /// Path of the file
    pub path: PathBuf,
    /// Extension including the leading dot, or empty
    pub extension: String,
    /// Size in bytes when the file was opened
    pub len: u64,
}

impl ResolvedFile {
    /// Opens a file and records its size
    ///
    /// The returned handle is positioned at the start of the file.
    pub fn open(path: impl AsRef<Path>) -> Result<(Self, File)> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|e| Error::input_open(path, e))?;
        let metadata = file.metadata().map_err(|e| Error::input_open(path, e))?;

        if metadata.is_dir() {
            return Err(Error::input_open(
                path,
                std::io::Error::new(std::io::ErrorKind::Other, "is a directory"),
            ));
        }

        let resolved = Self {
            path: path.to_path_buf(),
            extension: extension_of(path),
            len: metadata.len(),
        };
        Ok((resolved, file))
    }

    /// Derives the array identifier from the base name and [`Self::extension`]
    pub fn identifier(&self, respect_case: bool, append_type: bool) -> String {
        let stem = self
            .path
            .file_stem()
            .map(|s| s.to_string_lossy())
            .unwrap_or_default();
        compose_name(&stem, &self.extension, respect_case, append_type)
    }
}

/// Ordered collection of input paths
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileSet {
    /// Explicit files in declaration order
    pub explicit: Vec<PathBuf>,
    /// Mask matches, sorted and de-duplicated
    pub matched: BTreeSet<PathBuf>,
}

impl FileSet {
    /// Iterates over all paths, explicit files first
    pub fn iter(&self) -> impl Iterator<Item = &Path> {
        self.explicit
            .iter()
            .chain(self.matched.iter())
            .map(PathBuf::as_path)
    }

    /// Total number of paths
    pub fn len(&self) -> usize {
        self.explicit.len() + self.matched.len()
    }

    /// Returns true if no path was resolved
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Expands input specs into a [`FileSet`]
pub struct FileSetResolver<L = WalkDirListing> {
    base_dir: PathBuf,
    respect_case: bool,
    listing: L,
}

impl FileSetResolver<WalkDirListing> {
    /// Creates a resolver scanning `base_dir` for mask matches
    pub fn new(base_dir: impl Into<PathBuf>, respect_case: bool) -> Self {
        Self::with_listing(base_dir, respect_case, WalkDirListing)
    }
}

impl<L: DirectoryListing> FileSetResolver<L> {
    /// Creates a resolver with a custom directory listing
    pub fn with_listing(base_dir: impl Into<PathBuf>, respect_case: bool, listing: L) -> Self {
        Self {
            base_dir: base_dir.into(),
            respect_case,
            listing,
        }
    }

    /// Resolves the given specs
    pub fn resolve(&self, inputs: &[InputSpec]) -> FileSet {
        let mut set = FileSet::default();
        let mut masks = Vec::new();

        for input in inputs {
            match input {
                InputSpec::ExplicitFile(path) => set.explicit.push(path.clone()),
                InputSpec::ExtensionMask(mask) => masks.push(mask.as_str()),
            }
        }

        if !masks.is_empty() {
            set.matched = self.match_masks(&masks);
        }

        debug!(
            "Resolved {} explicit and {} matched files",
            set.explicit.len(),
            set.matched.len()
        );
        set
    }

    fn match_masks(&self, masks: &[&str]) -> BTreeSet<PathBuf> {
        let files = match self.listing.list_files(&self.base_dir) {
            Ok(files) => files,
            Err(e) => {
                warn!("Failed to scan {}: {}", self.base_dir.display(), e);
                return BTreeSet::new();
            }
        };

        files
            .into_iter()
            .filter(|path| {
                let extension = extension_of(path);
                let matched = masks
                    .iter()
                    .any(|mask| extension_matches(&extension, mask, self.respect_case));
                if matched {
                    trace!("Mask match: {}", path.display());
                }
                matched
            })
            .collect()
    }
}

/// Compares an extension against a mask
pub fn extension_matches(extension: &str, mask: &str, respect_case: bool) -> bool {
    if respect_case {
        extension == mask
    } else {
        extension == mask || extension.to_lowercase() == mask.to_lowercase()
    }
}
