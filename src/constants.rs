//! Constants used throughout mcrender

use std::collections::BTreeMap;

/// Template subdirectory holding rendered files
pub const FILES_DIR: &str = "files";

/// Template subdirectory holding rendered systemd units
pub const UNITS_DIR: &str = "units";

/// Platform segment applied on every platform
pub const PLATFORM_BASE: &str = "_base";

/// Platform segment applied on on-premises platforms only
pub const PLATFORM_ON_PREM: &str = "on-prem";

/// Directory under the template root shared by every role
pub const COMMON_DIR: &str = "common";

/// Roles with their own template directory. Any other role reuses `worker`.
pub const MASTER_ROLE: &str = "master";
pub const WORKER_ROLE: &str = "worker";

/// Platform identifier used for unsupported but non-empty platform types
pub const FALLBACK_PLATFORM: &str = "none";

/// Kubelet flag pointing at the cloud provider configuration
pub const CLOUD_CONFIG_FLAG: &str = "--cloud-config=/etc/kubernetes/cloud.conf";

/// Feature gate that moves cloud providers out of tree
pub const EXTERNAL_CLOUD_PROVIDER_FEATURE: &str = "ExternalCloudProvider";

/// Configuration file extensions in order of preference
pub const CONFIG_EXTENSIONS: &[&str] = &["json", "yaml", "yml"];

/// STDOUT indicator for CLI arguments
pub const STDOUT_INDICATOR: &str = "-";

/// Built-in values exposed to templates as `constants` when the caller sets none.
pub fn default_render_constants() -> BTreeMap<String, String> {
    [
        ("cloudConfigPath", "/etc/kubernetes/cloud.conf"),
        ("kubeletConfigPath", "/etc/kubernetes/kubelet.conf"),
        ("kubeconfigPath", "/etc/kubernetes/kubeconfig"),
        ("pullSecretPath", "/var/lib/kubelet/config.json"),
        ("staticPodPath", "/etc/kubernetes/manifests"),
    ]
    .into_iter()
    .map(|(k, v)| (k.to_string(), v.to_string()))
    .collect()
}

/// Exit codes
pub mod exit_codes {
    pub const FAILURE: i32 = 1;
}

/// Verbosity levels
pub mod verbosity {
    pub const OFF: u8 = 0;
    pub const INFO: u8 = 1;
    pub const DEBUG: u8 = 2;
    pub const TRACE: u8 = 3;
}
