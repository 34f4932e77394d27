/// Handles argument parsing and command execution.
pub mod cli;

/// Cluster name inference from infrastructure and API server names.
pub mod cluster_name;

/// Configuration context types and loading.
pub mod config;

/// Shared literals: directory names, defaults, exit codes.
pub mod constants;

/// Defines custom error types.
pub mod error;

/// Extension traits for standard library types.
pub mod ext;

/// A set of helpers for working with the file system.
pub mod ioutils;

/// Runtime platform resolution.
pub mod platform;

/// Template parsing and rendering functionality.
pub mod renderer;

/// Layered template merging and per-role assembly.
pub mod template;

/// Read-only access to template trees.
pub mod tree;
