use super::{TemplateFile, TemplateTree};
use crate::error::{Error, Result};
use crate::ioutils::{exists_dir, read_template};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Template tree on the local filesystem.
pub struct LocalTemplateTree {
    root: PathBuf,
}

impl LocalTemplateTree {
    /// Opens the template tree rooted at `root`.
    ///
    /// # Returns
    /// * `Err(Error::TemplateDoesNotExistsError)` - if the root does not exist
    pub fn new<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !exists_dir(root)? {
            return Err(Error::TemplateDoesNotExistsError {
                template_dir: root.display().to_string(),
            });
        }
        Ok(Self { root: root.to_path_buf() })
    }
}

impl TemplateTree for LocalTemplateTree {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists_dir(&self, path: &Path) -> Result<bool> {
        exists_dir(path)
    }

    fn list_dirs(&self, path: &Path) -> Result<Vec<String>> {
        let mut names = Vec::new();
        for entry in WalkDir::new(path).min_depth(1).max_depth(1).sort_by_file_name() {
            let entry = entry?;
            let name = entry.file_name().to_string_lossy().to_string();
            if entry.file_type().is_dir() {
                names.push(name);
            } else {
                log::info!("Ignoring non-directory path '{name}'");
            }
        }
        Ok(names)
    }

    fn walk_files(&self, path: &Path) -> Result<Vec<TemplateFile>> {
        let mut files = Vec::new();
        for entry in WalkDir::new(path).sort_by_file_name() {
            let entry = entry?;
            if entry.file_type().is_dir() {
                continue;
            }
            let len = entry.metadata()?.len();
            files.push(TemplateFile { path: entry.into_path(), len });
        }
        Ok(files)
    }

    fn read(&self, path: &Path) -> Result<String> {
        read_template(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_root_is_rejected() {
        let dir = TempDir::new().unwrap();
        let result = LocalTemplateTree::new(dir.path().join("missing"));
        assert!(matches!(result, Err(Error::TemplateDoesNotExistsError { .. })));
    }

    #[test]
    fn list_dirs_skips_files() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("worker")).unwrap();
        std::fs::create_dir_all(dir.path().join("master")).unwrap();
        std::fs::write(dir.path().join("README.md"), "docs").unwrap();

        let tree = LocalTemplateTree::new(dir.path()).unwrap();
        assert_eq!(tree.list_dirs(dir.path()).unwrap(), vec!["master", "worker"]);
    }

    #[test]
    fn walk_files_is_recursive_and_reports_sizes() {
        let dir = TempDir::new().unwrap();
        let files = dir.path().join("files");
        std::fs::create_dir_all(files.join("nested")).unwrap();
        std::fs::write(files.join("a.yaml"), "abc").unwrap();
        std::fs::write(files.join("nested/b.yaml"), "").unwrap();

        let tree = LocalTemplateTree::new(dir.path()).unwrap();
        let walked = tree.walk_files(&files).unwrap();
        assert_eq!(
            walked,
            vec![
                TemplateFile { path: files.join("a.yaml"), len: 3 },
                TemplateFile { path: files.join("nested/b.yaml"), len: 0 },
            ]
        );
    }
}
