//! Template function library
//!
//! Every function available to templates is listed in [`TemplateFunction`]. The
//! implementations are plain functions over [`RenderConfig`] so they can be used
//! and tested without a template environment.

use super::filters::regex_filter;
use crate::cluster_name::{infer_cluster_name, ClusterNameError};
use crate::config::{FeatureGate, OnPremPlatformStatus, PlatformStatus, PlatformType, RenderConfig};
use crate::constants::{CLOUD_CONFIG_FLAG, EXTERNAL_CLOUD_PROVIDER_FEATURE};
use minijinja::{Environment, Error as TemplateError, ErrorKind, Value};
use std::sync::Arc;
use thiserror::Error;
use url::{Host, Url};

/// Deferred-substitution keys must look like identifiers starting lowercase.
pub const SKIP_KEY_PATTERN: &str = r"^[_a-z][A-Za-z0-9_]*$";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FunctionError {
    #[error("Invalid key for skip: '{key}'.")]
    InvalidSkipKey { key: String },

    #[error("Invalid url '{url}': {source}")]
    InvalidUrl { url: String, source: url::ParseError },

    #[error("Unknown scheme in '{url}'.")]
    UnknownScheme { url: String },

    #[error("Invalid platform for {field}.")]
    InvalidPlatform { field: &'static str },

    #[error("Platform {platform} has no platform status for {field}.")]
    MissingPlatformStatus { platform: String, field: &'static str },

    #[error("Unknown feature set '{feature_set}'.")]
    UnknownFeatureSet { feature_set: String },

    #[error(transparent)]
    ClusterName(#[from] ClusterNameError),
}

/// The closed set of functions registered in every template environment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TemplateFunction {
    Skip,
    CloudProvider,
    CloudConfigFlag,
    OnPremPlatformApiServerInternalIp,
    OnPremPlatformIngressIp,
    OnPremPlatformShortName,
    OnPremPlatformKeepalivedEnableUnicast,
    UrlHost,
    UrlPort,
    ClusterName,
    ClusterBaseDomain,
}

impl TemplateFunction {
    pub const ALL: [TemplateFunction; 11] = [
        TemplateFunction::Skip,
        TemplateFunction::CloudProvider,
        TemplateFunction::CloudConfigFlag,
        TemplateFunction::OnPremPlatformApiServerInternalIp,
        TemplateFunction::OnPremPlatformIngressIp,
        TemplateFunction::OnPremPlatformShortName,
        TemplateFunction::OnPremPlatformKeepalivedEnableUnicast,
        TemplateFunction::UrlHost,
        TemplateFunction::UrlPort,
        TemplateFunction::ClusterName,
        TemplateFunction::ClusterBaseDomain,
    ];

    /// The name templates call the function by.
    pub fn name(self) -> &'static str {
        match self {
            TemplateFunction::Skip => "skip",
            TemplateFunction::CloudProvider => "cloudProvider",
            TemplateFunction::CloudConfigFlag => "cloudConfigFlag",
            TemplateFunction::OnPremPlatformApiServerInternalIp => {
                "onPremPlatformAPIServerInternalIP"
            }
            TemplateFunction::OnPremPlatformIngressIp => "onPremPlatformIngressIP",
            TemplateFunction::OnPremPlatformShortName => "onPremPlatformShortName",
            TemplateFunction::OnPremPlatformKeepalivedEnableUnicast => {
                "onPremPlatformKeepalivedEnableUnicast"
            }
            TemplateFunction::UrlHost => "urlHost",
            TemplateFunction::UrlPort => "urlPort",
            TemplateFunction::ClusterName => "clusterName",
            TemplateFunction::ClusterBaseDomain => "clusterBaseDomain",
        }
    }

    /// Registers the function in `env`. Context functions read `config`.
    pub fn register(self, env: &mut Environment<'static>, config: &Arc<RenderConfig>) {
        let name = self.name();
        let config = Arc::clone(config);
        match self {
            TemplateFunction::Skip => {
                env.add_function(name, |key: String| skip(&key).map_err(into_template_error))
            }
            TemplateFunction::UrlHost => {
                env.add_function(name, |u: String| url_host(&u).map_err(into_template_error))
            }
            TemplateFunction::UrlPort => {
                env.add_function(name, |u: String| url_port(&u).map_err(into_template_error))
            }
            TemplateFunction::CloudProvider => {
                env.add_function(name, move || cloud_provider(&config))
            }
            TemplateFunction::CloudConfigFlag => {
                env.add_function(name, move || cloud_config_flag(&config))
            }
            TemplateFunction::OnPremPlatformShortName => {
                env.add_function(name, move || on_prem_platform_short_name(&config))
            }
            TemplateFunction::OnPremPlatformKeepalivedEnableUnicast => env
                .add_function(name, move || {
                    on_prem_platform_keepalived_enable_unicast(&config)
                }),
            TemplateFunction::OnPremPlatformApiServerInternalIp => {
                env.add_function(name, move || {
                    on_prem_platform_api_server_internal_ip(&config)
                        .map(optional_value)
                        .map_err(into_template_error)
                })
            }
            TemplateFunction::OnPremPlatformIngressIp => env.add_function(name, move || {
                on_prem_platform_ingress_ip(&config)
                    .map(optional_value)
                    .map_err(into_template_error)
            }),
            TemplateFunction::ClusterName => env.add_function(name, move || {
                cluster_name(&config).map_err(into_template_error)
            }),
            TemplateFunction::ClusterBaseDomain => {
                env.add_function(name, move || cluster_base_domain(&config))
            }
        }
    }
}

/// Registers every function of the library in `env`.
pub fn register_all(env: &mut Environment<'static>, config: &Arc<RenderConfig>) {
    for function in TemplateFunction::ALL {
        function.register(env, config);
    }
}

fn into_template_error(err: FunctionError) -> TemplateError {
    TemplateError::new(ErrorKind::InvalidOperation, err.to_string()).with_source(err)
}

/// A missing value renders as nothing and is falsy, unlike `none`.
fn optional_value(value: Option<String>) -> Value {
    value.map_or(Value::UNDEFINED, Value::from)
}

/// Returns a placeholder that a later substitution stage fills in.
pub fn skip(key: &str) -> Result<String, FunctionError> {
    if !regex_filter(key, SKIP_KEY_PATTERN) {
        return Err(FunctionError::InvalidSkipKey { key: key.to_string() });
    }
    Ok(format!("{{{{.{key}}}}}"))
}

/// Whether the cloud provider runs out of tree for this platform.
pub fn is_cloud_provider_external(
    platform_status: &PlatformStatus,
    feature_gate: Option<&FeatureGate>,
) -> Result<bool, FunctionError> {
    match platform_status.r#type {
        PlatformType::AlibabaCloud | PlatformType::PowerVs => Ok(true),
        PlatformType::Azure
            if platform_status
                .azure
                .as_ref()
                .is_some_and(|azure| azure.cloud_name == "AzureStackCloud") =>
        {
            Ok(true)
        }
        PlatformType::Aws
        | PlatformType::Azure
        | PlatformType::Gcp
        | PlatformType::OpenStack
        | PlatformType::VSphere => is_external_feature_enabled(feature_gate),
        _ => Ok(false),
    }
}

fn is_external_feature_enabled(
    feature_gate: Option<&FeatureGate>,
) -> Result<bool, FunctionError> {
    let Some(feature_gate) = feature_gate else {
        return Ok(false);
    };
    match feature_gate.feature_set.as_str() {
        "" | "Default" | "LatencySensitive" => Ok(false),
        "TechPreviewNoUpgrade" => Ok(true),
        "CustomNoUpgrade" => Ok(feature_gate.custom_no_upgrade.as_ref().is_some_and(
            |custom| {
                let feature = EXTERNAL_CLOUD_PROVIDER_FEATURE.to_string();
                custom.enabled.contains(&feature) && !custom.disabled.contains(&feature)
            },
        )),
        other => Err(FunctionError::UnknownFeatureSet { feature_set: other.to_string() }),
    }
}

/// Predicate failures are logged and treated as "not external".
fn external_provider(config: &RenderConfig, platform_status: &PlatformStatus) -> bool {
    match is_cloud_provider_external(platform_status, config.feature_gate.as_ref()) {
        Ok(external) => external,
        Err(e) => {
            log::error!("{e}");
            false
        }
    }
}

pub fn cloud_provider(config: &RenderConfig) -> String {
    let Some(platform_status) = config.platform_status() else {
        return String::new();
    };
    if external_provider(config, platform_status) {
        return "external".to_string();
    }
    match &platform_status.r#type {
        platform @ (PlatformType::Aws
        | PlatformType::Azure
        | PlatformType::OpenStack
        | PlatformType::VSphere) => platform.as_str().to_lowercase(),
        PlatformType::Gcp => "gce".to_string(),
        _ => String::new(),
    }
}

/// The kubelet cloud config flag, for platforms that read `/etc/kubernetes/cloud.conf`.
pub fn cloud_config_flag(config: &RenderConfig) -> String {
    if config.cloud_provider_config.is_empty() {
        return String::new();
    }
    let default_status = PlatformStatus::default();
    let platform_status = config.platform_status().unwrap_or(&default_status);
    if external_provider(config, platform_status) {
        return String::new();
    }
    match platform_status.r#type {
        PlatformType::Aws
        | PlatformType::Azure
        | PlatformType::Gcp
        | PlatformType::OpenStack
        | PlatformType::VSphere => CLOUD_CONFIG_FLAG.to_string(),
        _ => String::new(),
    }
}

pub fn on_prem_platform_short_name(config: &RenderConfig) -> String {
    let short_name = match config.platform_type() {
        PlatformType::BareMetal => "kni",
        PlatformType::Ovirt => "ovirt",
        PlatformType::OpenStack => "openstack",
        PlatformType::VSphere => "vsphere",
        PlatformType::Kubevirt => "kubevirt",
        _ => "",
    };
    short_name.to_string()
}

pub fn on_prem_platform_keepalived_enable_unicast(config: &RenderConfig) -> String {
    match config.platform_type() {
        PlatformType::BareMetal | PlatformType::Kubevirt => "yes",
        _ => "no",
    }
    .to_string()
}

/// Looks up an on-prem endpoint field. `Ok(None)` means vsphere without a
/// vsphere status, which is an unprovisioned state rather than an error.
fn on_prem_field(
    config: &RenderConfig,
    field: &'static str,
    select: fn(&OnPremPlatformStatus) -> &String,
) -> Result<Option<String>, FunctionError> {
    let Some(platform_status) = config.platform_status() else {
        return Err(FunctionError::InvalidPlatform { field });
    };
    let status = match platform_status.r#type {
        PlatformType::BareMetal => platform_status.baremetal.as_ref(),
        PlatformType::Ovirt => platform_status.ovirt.as_ref(),
        PlatformType::OpenStack => platform_status.openstack.as_ref(),
        PlatformType::Kubevirt => platform_status.kubevirt.as_ref(),
        PlatformType::VSphere => {
            return Ok(platform_status.vsphere.as_ref().map(|s| select(s).clone()))
        }
        _ => return Err(FunctionError::InvalidPlatform { field }),
    };
    status.map(|s| Some(select(s).clone())).ok_or_else(|| {
        FunctionError::MissingPlatformStatus {
            platform: platform_status.r#type.to_string(),
            field,
        }
    })
}

pub fn on_prem_platform_ingress_ip(
    config: &RenderConfig,
) -> Result<Option<String>, FunctionError> {
    on_prem_field(config, "Ingress IP", |status| &status.ingress_ip)
}

pub fn on_prem_platform_api_server_internal_ip(
    config: &RenderConfig,
) -> Result<Option<String>, FunctionError> {
    on_prem_field(config, "API Server Internal IP", |status| &status.api_server_internal_ip)
}

fn parse_url(u: &str) -> Result<Url, FunctionError> {
    Url::parse(u).map_err(|source| FunctionError::InvalidUrl { url: u.to_string(), source })
}

/// Hostname of a URL, without port and without IPv6 brackets.
///
/// The host is returned as written. `Url` lowercases and IDNA-encodes hostnames,
/// which would break substring matching in [`cluster_name`].
pub fn url_host(u: &str) -> Result<String, FunctionError> {
    let parsed = parse_url(u)?;
    let Some(host) = parsed.host() else {
        return Ok(String::new());
    };
    if let Some((written, _)) = split_authority(u).filter(|(written, _)| !written.is_empty()) {
        return Ok(written.to_string());
    }
    Ok(match host {
        Host::Ipv6(addr) => addr.to_string(),
        host => host.to_string(),
    })
}

/// Port of a URL, defaulting to 443 for https and 80 for http.
pub fn url_port(u: &str) -> Result<String, FunctionError> {
    let parsed = parse_url(u)?;

    // `Url` drops ports equal to the scheme default, so look at the input as well.
    if let Some(port) = parsed.port().map(|p| p.to_string()).or_else(|| written_port(u)) {
        return Ok(port);
    }

    match parsed.scheme() {
        "https" => Ok("443".to_string()),
        "http" => Ok("80".to_string()),
        _ => Err(FunctionError::UnknownScheme { url: u.to_string() }),
    }
}

/// Splits the authority of `u` as written into the host (brackets removed) and
/// whatever follows it, normally `:<port>` or nothing.
fn split_authority(u: &str) -> Option<(&str, &str)> {
    let (_, rest) = u.split_once("://")?;
    let authority = rest.split(['/', '?', '#']).next()?;
    let host_port = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    match host_port.strip_prefix('[') {
        Some(bracketed) => bracketed.split_once(']'),
        None => Some(match host_port.find(':') {
            Some(index) => host_port.split_at(index),
            None => (host_port, ""),
        }),
    }
}

/// The port as written in the authority of `u`, if any.
fn written_port(u: &str) -> Option<String> {
    let (_, after_host) = split_authority(u)?;
    let port = after_host.strip_prefix(':')?;
    (!port.is_empty() && port.chars().all(|c| c.is_ascii_digit())).then(|| port.to_string())
}

/// Cluster name inferred from the infrastructure name and the API server hostname.
pub fn cluster_name(config: &RenderConfig) -> Result<String, FunctionError> {
    let status = config.infrastructure_status().cloned().unwrap_or_default();
    let api_hostname = url_host(&status.api_server_url)?;
    Ok(infer_cluster_name(&status.infrastructure_name, &api_hostname)?)
}

pub fn cluster_base_domain(config: &RenderConfig) -> String {
    config.base_domain().to_string()
}
