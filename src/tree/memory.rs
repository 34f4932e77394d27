use super::{TemplateFile, TemplateTree};
use crate::error::{Error, Result};
use std::path::{Path, PathBuf};

/// Template tree held in memory.
///
/// Entries are listed in insertion order, which lets tests check that results do
/// not depend on listing order.
#[derive(Debug, Clone, Default)]
pub struct MemoryTemplateTree {
    root: PathBuf,
    files: Vec<(PathBuf, String)>,
}

impl MemoryTemplateTree {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self { root: root.as_ref().to_path_buf(), files: Vec::new() }
    }

    /// Adds a file at `relative` (below the root), replacing any previous content.
    pub fn insert<P: AsRef<Path>>(&mut self, relative: P, content: &str) -> &mut Self {
        let path = self.root.join(relative);
        self.files.retain(|(existing, _)| existing != &path);
        self.files.push((path, content.to_string()));
        self
    }

    /// Builds a tree from `(relative path, content)` pairs, in that listing order.
    pub fn from_entries<P, I>(root: P, entries: I) -> Self
    where
        P: AsRef<Path>,
        I: IntoIterator<Item = (PathBuf, String)>,
    {
        let mut tree = Self::new(root);
        for (relative, content) in entries {
            tree.insert(relative, &content);
        }
        tree
    }
}

impl TemplateTree for MemoryTemplateTree {
    fn root(&self) -> &Path {
        &self.root
    }

    fn exists_dir(&self, path: &Path) -> Result<bool> {
        if self.files.iter().any(|(file, _)| file == path) {
            return Err(Error::NotADirectory { path: path.display().to_string() });
        }
        Ok(self.files.iter().any(|(file, _)| file.starts_with(path) && file != path))
    }

    fn list_dirs(&self, path: &Path) -> Result<Vec<String>> {
        let mut names: Vec<String> = Vec::new();
        for (file, _) in &self.files {
            let Ok(relative) = file.strip_prefix(path) else { continue };
            let mut components = relative.components();
            let (Some(first), Some(_)) = (components.next(), components.next()) else {
                continue;
            };
            let name = first.as_os_str().to_string_lossy().to_string();
            if !names.contains(&name) {
                names.push(name);
            }
        }
        Ok(names)
    }

    fn walk_files(&self, path: &Path) -> Result<Vec<TemplateFile>> {
        Ok(self
            .files
            .iter()
            .filter(|(file, _)| file.starts_with(path) && file != path)
            .map(|(file, content)| TemplateFile {
                path: file.clone(),
                len: content.len() as u64,
            })
            .collect())
    }

    fn read(&self, path: &Path) -> Result<String> {
        self.files
            .iter()
            .find(|(file, _)| file == path)
            .map(|(_, content)| content.clone())
            .ok_or_else(|| Error::ReadError {
                path: path.display().to_string(),
                source: std::io::Error::from(std::io::ErrorKind::NotFound),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn directories_are_implied_by_files() {
        let mut tree = MemoryTemplateTree::new("/t");
        tree.insert("worker/00-worker/_base/files/a.yaml", "a");

        assert!(tree.exists_dir(Path::new("/t/worker/00-worker")).unwrap());
        assert!(!tree.exists_dir(Path::new("/t/master")).unwrap());
        assert!(matches!(
            tree.exists_dir(Path::new("/t/worker/00-worker/_base/files/a.yaml")),
            Err(Error::NotADirectory { .. })
        ));
    }

    #[test]
    fn list_dirs_ignores_plain_files() {
        let mut tree = MemoryTemplateTree::new("/t");
        tree.insert("worker/00-worker/_base/files/a.yaml", "a").insert("README.md", "docs");
        assert_eq!(tree.list_dirs(Path::new("/t")).unwrap(), vec!["worker"]);
    }

    #[test]
    fn read_missing_file_fails() {
        let tree = MemoryTemplateTree::new("/t");
        assert!(matches!(tree.read(Path::new("/t/none")), Err(Error::ReadError { .. })));
    }
}
