//! Configuration context for template rendering
//!
//! This module contains the configuration context components:
//! - `types`: The typed context and its nested descriptors
//! - `loader`: Loading a context from JSON or YAML files

pub mod loader;
pub mod types;

pub use types::{
    AzurePlatformStatus, CustomFeatureGates, Dns, DnsSpec, FeatureGate, Infrastructure,
    InfrastructureStatus, OnPremPlatformStatus, PlatformStatus, PlatformType,
    RegionPlatformStatus, RenderConfig,
};
