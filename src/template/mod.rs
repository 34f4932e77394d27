//! Layered template resolution
//!
//! This module contains the core generation components:
//! - `merger`: Merges rendered templates from precedence-ordered directories
//! - `assembler`: Builds the directory layers for a role and name
//! - `generator`: Discovers roles and names and produces the output records

pub mod assembler;
pub mod generator;
pub mod merger;

pub use assembler::{assemble, role_template_dir, ArtifactAssembler, RenderedArtifacts};
pub use generator::{
    fingerprint, generate_configs, generate_configs_for_role, CommonScope, GenerateOptions,
    GeneratedConfig,
};
pub use merger::LayeredMerger;
