use serde::Serialize;
use sha2::{Digest, Sha256};

use crate::config::RenderConfig;
use crate::constants::COMMON_DIR;
use crate::error::{Error, Result};
use crate::tree::TemplateTree;

use super::assembler::{role_template_dir, ArtifactAssembler};

/// Which names of a role receive the common layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CommonScope {
    /// Every name of the role is merged on top of the common layer.
    #[default]
    EveryName,
    /// Only the first name visited (in sorted order, normally `00-<role>`).
    FirstName,
}

/// Options for a generation run.
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Roles to generate. Empty means every role found in the template root.
    pub roles: Vec<String>,
    pub common_scope: CommonScope,
}

/// The rendered configuration for one (role, name), ready for transpilation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedConfig {
    pub role: String,
    pub name: String,
    /// File contents sorted by file name.
    pub files: Vec<String>,
    /// Unit contents sorted by unit name.
    pub units: Vec<String>,
    #[serde(rename = "osImageURL")]
    pub os_image_url: String,
    /// Hex SHA-256 over the sorted files and units.
    pub fingerprint: String,
    pub generated_by: String,
}

impl GeneratedConfig {
    pub fn new(
        role: &str,
        name: &str,
        files: Vec<String>,
        units: Vec<String>,
        os_image_url: &str,
    ) -> Self {
        let fingerprint = fingerprint(&files, &units);
        Self {
            role: role.to_string(),
            name: name.to_string(),
            files,
            units,
            os_image_url: os_image_url.to_string(),
            fingerprint,
            generated_by: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Content fingerprint of a sorted file and unit sequence.
///
/// Every entry is length-prefixed so that moving bytes between entries, or between
/// files and units, changes the fingerprint.
pub fn fingerprint(files: &[String], units: &[String]) -> String {
    let mut hasher = Sha256::new();
    for sequence in [files, units] {
        hasher.update((sequence.len() as u64).to_be_bytes());
        for content in sequence {
            hasher.update((content.len() as u64).to_be_bytes());
            hasher.update(content.as_bytes());
        }
    }
    hex::encode(hasher.finalize())
}

/// Generates configurations for the requested roles, or for every role directory in
/// the template root when none are requested.
///
/// Non-directory entries are ignored and `common` is not a role. Requested roles
/// need no directory of their own: custom pools read the `worker` templates. Roles
/// are visited in sorted order. The first failing role aborts the run.
pub fn generate_configs(
    tree: &dyn TemplateTree,
    config: &RenderConfig,
    options: &GenerateOptions,
) -> Result<Vec<GeneratedConfig>> {
    let mut roles = if options.roles.is_empty() {
        tree.list_dirs(tree.root())?
    } else {
        options.roles.clone()
    };
    roles.retain(|role| {
        if role == COMMON_DIR {
            log::warn!("Skipping '{COMMON_DIR}', it holds shared templates and is not a role");
        }
        role != COMMON_DIR
    });
    roles.sort();
    roles.dedup();

    let mut configs = Vec::new();
    for role in roles {
        let role_configs = generate_configs_for_role(tree, config, &role, options)
            .map_err(|e| Error::RoleGeneration { role: role.clone(), source: Box::new(e) })?;
        configs.extend(role_configs);
    }
    Ok(configs)
}

/// Generates one configuration per name directory of `role`.
///
/// Roles other than `master` and `worker` reuse the `worker` templates but keep
/// their own role name in the result.
pub fn generate_configs_for_role(
    tree: &dyn TemplateTree,
    config: &RenderConfig,
    role: &str,
    options: &GenerateOptions,
) -> Result<Vec<GeneratedConfig>> {
    let role_dir = tree.root().join(role_template_dir(role));
    if !tree.exists_dir(&role_dir)? {
        return Err(Error::MissingRoleDirectory {
            role: role.to_string(),
            path: role_dir.display().to_string(),
        });
    }
    let mut names = tree.list_dirs(&role_dir)?;
    names.sort();

    let assembler = ArtifactAssembler::new(tree, config)?;
    // The common layer is resolved once per role.
    let common = assembler.common_dirs()?;

    let mut configs = Vec::new();
    for (index, name) in names.iter().enumerate() {
        let layers = match options.common_scope {
            CommonScope::FirstName if index > 0 => &[][..],
            _ => &common[..],
        };
        let artifacts = assembler.assemble_with_common(layers, role, name)?;
        log::info!(
            "Generated {role}/{name} for platform '{}': {} files, {} units",
            assembler.platform().id,
            artifacts.files.len(),
            artifacts.units.len()
        );
        configs.push(GeneratedConfig::new(
            role,
            name,
            artifacts.sorted_files(),
            artifacts.sorted_units(),
            &config.os_image_url,
        ));
    }
    Ok(configs)
}
