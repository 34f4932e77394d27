use mcrender::config::RenderConfig;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A template tree written to a temporary directory.
pub struct TemplateDir {
    dir: TempDir,
}

impl TemplateDir {
    pub fn new() -> Self {
        Self { dir: TempDir::new().unwrap() }
    }

    pub fn root(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `content` at `relative`, creating parent directories.
    pub fn file(&self, relative: &str, content: &str) -> &Self {
        let path = self.dir.path().join(relative);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
        self
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.dir.path().join(relative)
    }
}

/// Builds a normalized context from a YAML document.
pub fn context(yaml: &str) -> RenderConfig {
    RenderConfig::from_yaml_str(yaml).unwrap()
}

pub fn context_for(platform_type: &str) -> RenderConfig {
    context(&format!(
        r#"
infra:
  status:
    platformStatus:
      type: "{platform_type}"
    apiServerURL: https://api.sub.my-cluster.example.com:6443
    infrastructureName: sub-my-cluster-nzml9
dns:
  spec:
    baseDomain: example.com
osImageURL: quay.io/openshift/os@sha256:0123
"#
    ))
}
