use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::config::RenderConfig;
use crate::constants::{
    COMMON_DIR, FILES_DIR, MASTER_ROLE, PLATFORM_BASE, PLATFORM_ON_PREM, UNITS_DIR,
    WORKER_ROLE,
};
use crate::error::Result;
use crate::platform::{resolve_platform, Platform};
use crate::renderer::{MiniJinjaRenderer, TemplateRenderer};
use crate::tree::TemplateTree;

use super::merger::LayeredMerger;

/// Rendered files and units for one (role, name), keyed by file name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedArtifacts {
    pub files: BTreeMap<String, String>,
    pub units: BTreeMap<String, String>,
}

impl RenderedArtifacts {
    /// File contents ordered by file name.
    pub fn sorted_files(&self) -> Vec<String> {
        self.files.values().cloned().collect()
    }

    /// Unit contents ordered by unit name.
    pub fn sorted_units(&self) -> Vec<String> {
        self.units.values().cloned().collect()
    }
}

/// The template directory a role reads. Custom pools reuse the worker templates.
pub fn role_template_dir(role: &str) -> &str {
    match role {
        MASTER_ROLE | WORKER_ROLE => role,
        _ => WORKER_ROLE,
    }
}

/// Builds the layered directory list for a (role, name) and merges it.
pub struct ArtifactAssembler<'a> {
    tree: &'a dyn TemplateTree,
    renderer: Box<dyn TemplateRenderer + 'a>,
    platform: Platform,
}

impl<'a> ArtifactAssembler<'a> {
    /// Resolves the platform of `config` and binds a renderer to it.
    ///
    /// # Returns
    /// * `Err` - if the platform cannot be resolved, in which case nothing is assembled
    pub fn new(tree: &'a dyn TemplateTree, config: &RenderConfig) -> Result<Self> {
        let platform = resolve_platform(config)?;
        log::debug!("Resolved platform '{}' (on-prem: {})", platform.id, platform.on_prem);
        Ok(Self::with_renderer(tree, Box::new(MiniJinjaRenderer::new(config)), platform))
    }

    pub fn with_renderer(
        tree: &'a dyn TemplateTree,
        renderer: Box<dyn TemplateRenderer + 'a>,
        platform: Platform,
    ) -> Self {
        Self { tree, renderer, platform }
    }

    pub fn platform(&self) -> &Platform {
        &self.platform
    }

    /// Platform segments in precedence order: `_base`, `on-prem` when it applies,
    /// then the platform itself.
    fn platform_segments(&self) -> Vec<&str> {
        let mut segments = vec![PLATFORM_BASE];
        if self.platform.on_prem {
            segments.push(PLATFORM_ON_PREM);
        }
        segments.push(&self.platform.id);
        segments
    }

    /// The existing segment directories under `parent`, in precedence order.
    ///
    /// A segment that exists but is not a directory is an error.
    pub fn layer_dirs(&self, parent: &Path) -> Result<Vec<PathBuf>> {
        let mut dirs = Vec::new();
        for segment in self.platform_segments() {
            let dir = parent.join(segment);
            if self.tree.exists_dir(&dir)? {
                dirs.push(dir);
            }
        }
        Ok(dirs)
    }

    /// The common layer shared by the names of a role.
    pub fn common_dirs(&self) -> Result<Vec<PathBuf>> {
        self.layer_dirs(&self.tree.root().join(COMMON_DIR))
    }

    /// The name-local directory of `role`/`name` in the tree.
    pub fn name_dir(&self, role: &str, name: &str) -> PathBuf {
        self.tree.root().join(role_template_dir(role)).join(name)
    }

    /// Merges `common` followed by the name-local layer of `role`/`name`.
    pub fn assemble_with_common(
        &self,
        common: &[PathBuf],
        role: &str,
        name: &str,
    ) -> Result<RenderedArtifacts> {
        let mut dirs = common.to_vec();
        dirs.extend(self.layer_dirs(&self.name_dir(role, name))?);
        log::debug!("Layers for {role}/{name}: {dirs:?}");

        let merger = LayeredMerger::new(self.tree, self.renderer.as_ref());
        Ok(RenderedArtifacts {
            files: merger.merge(&dirs, FILES_DIR)?,
            units: merger.merge(&dirs, UNITS_DIR)?,
        })
    }

    /// Assembles `role`/`name` with the common layer in front.
    pub fn assemble(&self, role: &str, name: &str) -> Result<RenderedArtifacts> {
        let common = self.common_dirs()?;
        self.assemble_with_common(&common, role, name)
    }
}

/// Renders the files and units for `role`/`name`, each sorted by name.
///
/// # Returns
/// * `Result<(Vec<String>, Vec<String>)>` - The sorted file contents and unit contents
pub fn assemble(
    role: &str,
    name: &str,
    tree: &dyn TemplateTree,
    config: &RenderConfig,
) -> Result<(Vec<String>, Vec<String>)> {
    let artifacts = ArtifactAssembler::new(tree, config)?.assemble(role, name)?;
    Ok((artifacts.sorted_files(), artifacts.sorted_units()))
}
