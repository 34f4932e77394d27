//! Configuration context types visible to every template

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::Display;

/// Infrastructure platform type as reported by the cluster.
///
/// Unknown values are preserved in `Other` so they can be reported and mapped to
/// the fallback platform instead of failing deserialization.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum PlatformType {
    Aws,
    AlibabaCloud,
    Azure,
    BareMetal,
    Gcp,
    OpenStack,
    Libvirt,
    Ovirt,
    VSphere,
    Kubevirt,
    PowerVs,
    None,
    /// No platform type has been set yet.
    #[default]
    Unset,
    Other(String),
}

impl PlatformType {
    pub fn as_str(&self) -> &str {
        match self {
            PlatformType::Aws => "AWS",
            PlatformType::AlibabaCloud => "AlibabaCloud",
            PlatformType::Azure => "Azure",
            PlatformType::BareMetal => "BareMetal",
            PlatformType::Gcp => "GCP",
            PlatformType::OpenStack => "OpenStack",
            PlatformType::Libvirt => "Libvirt",
            PlatformType::Ovirt => "oVirt",
            PlatformType::VSphere => "VSphere",
            PlatformType::Kubevirt => "KubeVirt",
            PlatformType::PowerVs => "PowerVS",
            PlatformType::None => "None",
            PlatformType::Unset => "",
            PlatformType::Other(other) => other,
        }
    }
}

impl From<String> for PlatformType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "AWS" => PlatformType::Aws,
            "AlibabaCloud" => PlatformType::AlibabaCloud,
            "Azure" => PlatformType::Azure,
            "BareMetal" => PlatformType::BareMetal,
            "GCP" => PlatformType::Gcp,
            "OpenStack" => PlatformType::OpenStack,
            "Libvirt" => PlatformType::Libvirt,
            "oVirt" => PlatformType::Ovirt,
            "VSphere" => PlatformType::VSphere,
            "KubeVirt" => PlatformType::Kubevirt,
            "PowerVS" => PlatformType::PowerVs,
            "None" => PlatformType::None,
            "" => PlatformType::Unset,
            _ => PlatformType::Other(value),
        }
    }
}

impl From<&str> for PlatformType {
    fn from(value: &str) -> Self {
        PlatformType::from(value.to_string())
    }
}

impl From<PlatformType> for String {
    fn from(value: PlatformType) -> Self {
        value.as_str().to_string()
    }
}

impl Display for PlatformType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Endpoints published by on-premises platforms.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnPremPlatformStatus {
    #[serde(rename = "apiServerInternalIP", default)]
    pub api_server_internal_ip: String,
    #[serde(rename = "ingressIP", default)]
    pub ingress_ip: String,
    #[serde(rename = "nodeDNSIP", default, skip_serializing_if = "String::is_empty")]
    pub node_dns_ip: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AzurePlatformStatus {
    #[serde(default)]
    pub cloud_name: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub resource_group_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionPlatformStatus {
    #[serde(default)]
    pub region: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlatformStatus {
    #[serde(default)]
    pub r#type: PlatformType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub aws: Option<RegionPlatformStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub azure: Option<AzurePlatformStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub gcp: Option<RegionPlatformStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub baremetal: Option<OnPremPlatformStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ovirt: Option<OnPremPlatformStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub openstack: Option<OnPremPlatformStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub vsphere: Option<OnPremPlatformStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub kubevirt: Option<OnPremPlatformStatus>,
}

impl PlatformStatus {
    pub fn new(r#type: PlatformType) -> Self {
        Self { r#type, ..Default::default() }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfrastructureStatus {
    #[serde(default)]
    pub platform_status: Option<PlatformStatus>,
    #[serde(rename = "apiServerURL", default)]
    pub api_server_url: String,
    #[serde(rename = "apiServerInternalURI", default)]
    pub api_server_internal_uri: String,
    #[serde(default)]
    pub infrastructure_name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Infrastructure {
    #[serde(default)]
    pub status: InfrastructureStatus,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DnsSpec {
    #[serde(default)]
    pub base_domain: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dns {
    #[serde(default)]
    pub spec: DnsSpec,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CustomFeatureGates {
    #[serde(default)]
    pub enabled: Vec<String>,
    #[serde(default)]
    pub disabled: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureGate {
    #[serde(default)]
    pub feature_set: String,
    #[serde(default)]
    pub custom_no_upgrade: Option<CustomFeatureGates>,
}

/// The configuration context every template renders against.
///
/// Constructed once per generation request and treated as read-only afterwards.
/// Absent nested descriptors are filled in by [`RenderConfig::normalized`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderConfig {
    #[serde(default)]
    pub infra: Option<Infrastructure>,
    #[serde(default)]
    pub dns: Option<Dns>,
    #[serde(default)]
    pub pull_secret: String,
    #[serde(default)]
    pub cloud_provider_config: String,
    #[serde(rename = "osImageURL", default)]
    pub os_image_url: String,
    #[serde(rename = "clusterDNSIP", default)]
    pub cluster_dns_ip: String,
    #[serde(default)]
    pub images: BTreeMap<String, String>,
    #[serde(default)]
    pub additional_trust_bundle: String,
    #[serde(default)]
    pub network_type: String,
    #[serde(default)]
    pub feature_gate: Option<FeatureGate>,
    #[serde(default)]
    pub constants: Option<BTreeMap<String, String>>,
    /// Remaining keys are passed through to templates unchanged.
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_json::Value>,
}

impl RenderConfig {
    /// Returns a copy where the infrastructure descriptor and its platform status are
    /// always present. A missing platform status becomes one with an unset type.
    pub fn normalized(mut self) -> Self {
        let infra = self.infra.get_or_insert_with(Infrastructure::default);
        infra.status.platform_status.get_or_insert_with(PlatformStatus::default);
        self
    }

    pub fn platform_status(&self) -> Option<&PlatformStatus> {
        self.infra.as_ref().and_then(|infra| infra.status.platform_status.as_ref())
    }

    /// The platform type, empty when no platform status is present.
    pub fn platform_type(&self) -> &PlatformType {
        static UNSET: PlatformType = PlatformType::Unset;
        self.platform_status().map_or(&UNSET, |status| &status.r#type)
    }

    pub fn infrastructure_status(&self) -> Option<&InfrastructureStatus> {
        self.infra.as_ref().map(|infra| &infra.status)
    }

    pub fn base_domain(&self) -> &str {
        self.dns.as_ref().map_or("", |dns| dns.spec.base_domain.as_str())
    }

    /// Constants exposed to templates, falling back to the built-in set.
    pub fn render_constants(&self) -> BTreeMap<String, String> {
        self.constants.clone().unwrap_or_else(crate::constants::default_render_constants)
    }
}
