//! Platform resolution for template directory selection

use crate::config::{PlatformType, RenderConfig};
use crate::constants::{FALLBACK_PLATFORM, PLATFORM_BASE};
use crate::error::{Error, Result};

/// A resolved runtime platform.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Platform {
    /// Lowercase identifier, also the name of the platform template directory.
    pub id: String,
    /// Whether the `on-prem` template layer applies.
    pub on_prem: bool,
}

/// Resolves the platform identifier for a configuration context.
///
/// # Returns
/// * `Ok(Platform)` - The lowercase platform identifier and its on-prem classification
/// * `Err(Error::MissingPlatformType)` - No platform type is set
/// * `Err(Error::BasePlatform)` - The platform type is the `_base` sentinel
///
/// Unsupported but non-empty platform types resolve to `none` with a warning.
pub fn resolve_platform(config: &RenderConfig) -> Result<Platform> {
    let platform_type = config.platform_type();

    let id = match platform_type {
        PlatformType::Unset => return Err(Error::MissingPlatformType),
        PlatformType::Other(other) if other == PLATFORM_BASE => {
            return Err(Error::BasePlatform)
        }
        PlatformType::Other(other) => {
            log::warn!(
                "The configuration context references an unsupported platform: {other}"
            );
            FALLBACK_PLATFORM.to_string()
        }
        known => known.as_str().to_lowercase(),
    };

    Ok(Platform { id, on_prem: is_on_prem(platform_type) })
}

/// Whether the platform needs infrastructure-specific endpoint data.
pub fn is_on_prem(platform_type: &PlatformType) -> bool {
    matches!(
        platform_type,
        PlatformType::BareMetal
            | PlatformType::Ovirt
            | PlatformType::OpenStack
            | PlatformType::VSphere
            | PlatformType::Kubevirt
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Infrastructure, InfrastructureStatus, PlatformStatus};

    fn config_for(platform_type: &str) -> RenderConfig {
        RenderConfig {
            infra: Some(Infrastructure {
                status: InfrastructureStatus {
                    platform_status: Some(PlatformStatus::new(platform_type.into())),
                    ..Default::default()
                },
            }),
            ..Default::default()
        }
    }

    #[test]
    fn resolves_known_platforms_to_lowercase() {
        let cases = [
            ("AWS", "aws", false),
            ("AlibabaCloud", "alibabacloud", false),
            ("BareMetal", "baremetal", true),
            ("oVirt", "ovirt", true),
            ("VSphere", "vsphere", true),
            ("KubeVirt", "kubevirt", true),
            ("OpenStack", "openstack", true),
            ("PowerVS", "powervs", false),
            ("None", "none", false),
        ];
        for (raw, id, on_prem) in cases {
            let platform = resolve_platform(&config_for(raw)).unwrap();
            assert_eq!(platform, Platform { id: id.to_string(), on_prem }, "{raw}");
        }
    }

    #[test]
    fn unsupported_platform_falls_back_to_none() {
        let platform = resolve_platform(&config_for("Nutanix")).unwrap();
        assert_eq!(platform.id, "none");
        assert!(!platform.on_prem);
    }

    #[test]
    fn empty_platform_type_fails() {
        let result = resolve_platform(&config_for(""));
        assert!(matches!(result, Err(Error::MissingPlatformType)));
    }

    #[test]
    fn missing_infrastructure_fails_like_empty_type() {
        let result = resolve_platform(&RenderConfig::default());
        assert!(matches!(result, Err(Error::MissingPlatformType)));
    }

    #[test]
    fn base_sentinel_is_rejected() {
        let result = resolve_platform(&config_for("_base"));
        assert!(matches!(result, Err(Error::BasePlatform)));
    }
}
