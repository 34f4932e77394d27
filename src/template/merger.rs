use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::ext::PathExt;
use crate::renderer::TemplateRenderer;
use crate::tree::TemplateTree;

/// Merges rendered templates from layered directories into one map per kind.
pub struct LayeredMerger<'a> {
    tree: &'a dyn TemplateTree,
    renderer: &'a dyn TemplateRenderer,
}

impl<'a> LayeredMerger<'a> {
    pub fn new(tree: &'a dyn TemplateTree, renderer: &'a dyn TemplateRenderer) -> Self {
        Self { tree, renderer }
    }

    /// Merges `<dir>/<kind>` for every directory in `dirs`, lowest precedence first.
    ///
    /// Entries are keyed by file base name, so a later directory overrides an earlier
    /// one. A zero-byte source removes the entry and a template that renders to
    /// nothing is not inserted. Missing `<kind>` directories are skipped.
    ///
    /// # Arguments
    /// * `dirs` - Layer directories in precedence order
    /// * `kind` - The artifact subdirectory, `files` or `units`
    ///
    /// # Returns
    /// * `Result<BTreeMap<String, String>>` - Rendered content by name
    pub fn merge(&self, dirs: &[PathBuf], kind: &str) -> Result<BTreeMap<String, String>> {
        let mut merged = BTreeMap::new();
        for dir in dirs {
            let kind_dir = dir.join(kind);
            if !self.tree.exists_dir(&kind_dir)? {
                continue;
            }
            self.merge_dir(&kind_dir, &mut merged)?;
        }
        Ok(merged)
    }

    fn merge_dir(&self, dir: &Path, merged: &mut BTreeMap<String, String>) -> Result<()> {
        let mut files = self.tree.walk_files(dir)?;
        files.sort_by(|a, b| a.path.cmp(&b.path));

        for file in files {
            let name = file.path.file_name_checked()?;

            // empty templates signify don't create
            if file.len == 0 {
                if merged.remove(name).is_some() {
                    log::debug!("Removed '{name}' (empty template '{}')", file.path.display());
                }
                continue;
            }

            let source = self.tree.read(&file.path)?;
            let rendered = self.renderer.render(file.path.to_str_checked()?, &source)?;

            if rendered.is_empty() {
                log::debug!("Template '{}' rendered nothing, skipping", file.path.display());
                continue;
            }
            log::debug!("Rendered '{name}' from '{}'", file.path.display());
            merged.insert(name.to_string(), rendered);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Infrastructure, InfrastructureStatus, PlatformStatus, RenderConfig};
    use crate::constants::{FILES_DIR, UNITS_DIR};
    use crate::error::Error;
    use crate::renderer::MiniJinjaRenderer;
    use crate::tree::MemoryTemplateTree;

    fn aws_renderer() -> MiniJinjaRenderer {
        MiniJinjaRenderer::new(&RenderConfig {
            infra: Some(Infrastructure {
                status: InfrastructureStatus {
                    platform_status: Some(PlatformStatus::new("AWS".into())),
                    ..Default::default()
                },
            }),
            ..Default::default()
        })
    }

    fn dirs(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(|name| Path::new("/t").join(name)).collect()
    }

    #[test]
    fn later_directories_override_earlier() {
        let mut tree = MemoryTemplateTree::new("/t");
        tree.insert("base/files/a.yaml", "base a")
            .insert("base/files/b.yaml", "base b")
            .insert("aws/files/a.yaml", "aws a");
        let renderer = aws_renderer();
        let merger = LayeredMerger::new(&tree, &renderer);

        let merged = merger.merge(&dirs(&["base", "aws"]), FILES_DIR).unwrap();
        assert_eq!(merged.get("a.yaml").map(String::as_str), Some("aws a"));
        assert_eq!(merged.get("b.yaml").map(String::as_str), Some("base b"));
    }

    #[test]
    fn zero_length_source_removes_entry() {
        let mut tree = MemoryTemplateTree::new("/t");
        tree.insert("base/units/a.service", "unit").insert("aws/units/a.service", "");
        let renderer = aws_renderer();
        let merger = LayeredMerger::new(&tree, &renderer);

        let merged = merger.merge(&dirs(&["base", "aws"]), UNITS_DIR).unwrap();
        assert!(merged.is_empty());
    }

    #[test]
    fn empty_render_is_not_inserted() {
        let mut tree = MemoryTemplateTree::new("/t");
        tree.insert(
            "base/files/gcp-only.conf",
            "{% if infra.status.platformStatus.type == 'GCP' %}gcp{% endif %}",
        );
        let renderer = aws_renderer();
        let merger = LayeredMerger::new(&tree, &renderer);

        let merged = merger.merge(&dirs(&["base"]), FILES_DIR).unwrap();
        assert!(!merged.contains_key("gcp-only.conf"));
    }

    #[test]
    fn empty_render_keeps_lower_layer_entry() {
        let mut tree = MemoryTemplateTree::new("/t");
        tree.insert("base/files/a.conf", "base")
            .insert("aws/files/a.conf", "{% if false %}never{% endif %}");
        let renderer = aws_renderer();
        let merger = LayeredMerger::new(&tree, &renderer);

        let merged = merger.merge(&dirs(&["base", "aws"]), FILES_DIR).unwrap();
        assert_eq!(merged.get("a.conf").map(String::as_str), Some("base"));
    }

    #[test]
    fn missing_kind_directory_is_skipped() {
        let mut tree = MemoryTemplateTree::new("/t");
        tree.insert("base/files/a.yaml", "a");
        let renderer = aws_renderer();
        let merger = LayeredMerger::new(&tree, &renderer);

        assert!(merger.merge(&dirs(&["base", "missing"]), UNITS_DIR).unwrap().is_empty());
    }

    #[test]
    fn kind_path_that_is_a_file_fails() {
        let mut tree = MemoryTemplateTree::new("/t");
        tree.insert("base/files", "not a directory");
        let renderer = aws_renderer();
        let merger = LayeredMerger::new(&tree, &renderer);

        let result = merger.merge(&dirs(&["base"]), FILES_DIR);
        assert!(matches!(result, Err(Error::NotADirectory { .. })));
    }

    #[test]
    fn nested_files_are_keyed_by_base_name() {
        let mut tree = MemoryTemplateTree::new("/t");
        tree.insert("base/files/z/dup.conf", "from z").insert("base/files/a/dup.conf", "from a");
        let renderer = aws_renderer();
        let merger = LayeredMerger::new(&tree, &renderer);

        let merged = merger.merge(&dirs(&["base"]), FILES_DIR).unwrap();
        assert_eq!(merged.len(), 1);
        assert_eq!(merged.get("dup.conf").map(String::as_str), Some("from z"));
    }

    #[test]
    fn render_failure_aborts_merge() {
        let mut tree = MemoryTemplateTree::new("/t");
        tree.insert("base/files/bad.conf", "{{ skip('Bad-Key') }}");
        let renderer = aws_renderer();
        let merger = LayeredMerger::new(&tree, &renderer);

        match merger.merge(&dirs(&["base"]), FILES_DIR) {
            Err(Error::TemplateRender { path, .. }) => {
                assert_eq!(path, "/t/base/files/bad.conf");
            }
            other => panic!("Expected TemplateRender, got {other:?}"),
        }
    }
}
