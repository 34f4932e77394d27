//! Read-only access to a template tree
//!
//! - `local`: The filesystem-backed tree
//! - `memory`: An in-memory tree for embedding and tests

pub mod local;
pub mod memory;

use crate::error::Result;
use std::path::{Path, PathBuf};

pub use local::LocalTemplateTree;
pub use memory::MemoryTemplateTree;

/// A template file found while walking a directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateFile {
    /// Full path of the file inside the tree.
    pub path: PathBuf,
    /// Size of the source in bytes. Zero marks an explicit deletion.
    pub len: u64,
}

/// A hierarchy of template directories and files.
///
/// Listing order is unspecified. Callers that need determinism sort the results.
pub trait TemplateTree {
    /// The root directory holding `common` and the role directories.
    fn root(&self) -> &Path;

    /// Returns true if `path` is a directory, false if it does not exist, and
    /// `Error::NotADirectory` if something else is there.
    fn exists_dir(&self, path: &Path) -> Result<bool>;

    /// Names of the immediate subdirectories of `path`. Other entries are ignored.
    fn list_dirs(&self, path: &Path) -> Result<Vec<String>>;

    /// Every file below `path`, recursively.
    fn walk_files(&self, path: &Path) -> Result<Vec<TemplateFile>>;

    /// Reads the source of a template file.
    fn read(&self, path: &Path) -> Result<String>;
}
