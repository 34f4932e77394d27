use crate::cluster_name::ClusterNameError;
use crate::renderer::functions::FunctionError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),

    #[error("Failed to read '{path}'. Original error: {source}")]
    ReadError { path: String, source: std::io::Error },

    #[error("Failed to walk template directory. Original error: {0}")]
    WalkError(#[from] walkdir::Error),

    #[error("Failed to parse JSON. Original error: {0}")]
    JsonError(#[from] serde_json::Error),

    #[error("Failed to parse YAML. Original error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    #[error("Unsupported configuration file '{path}'. Expected one of: {expected}.")]
    ConfigFormat { path: String, expected: String },

    /// A path exists where a template directory is required but is something else.
    #[error("Expected template directory, '{path}' is not a directory.")]
    NotADirectory { path: String },

    #[error("Cannot proceed: template directory '{template_dir}' does not exist.")]
    TemplateDoesNotExistsError { template_dir: String },

    #[error("Role '{role}' has no template directory '{path}'.")]
    MissingRoleDirectory { role: String, path: String },

    #[error("Path '{path}' contains invalid Unicode characters.")]
    InvalidPath { path: String },

    #[error("Cannot generate configuration without a platform type.")]
    MissingPlatformType,

    #[error("`_base` platform is not a valid runtime platform.")]
    BasePlatform,

    #[error("Failed to parse template '{path}'. Original error: {source}")]
    TemplateParse { path: String, source: minijinja::Error },

    #[error("Failed to render template '{path}'. Original error: {source}")]
    TemplateRender { path: String, source: minijinja::Error },

    #[error(transparent)]
    FunctionError(#[from] FunctionError),

    #[error(transparent)]
    ClusterNameError(#[from] ClusterNameError),

    #[error("Failed to generate configuration for role '{role}': {source}")]
    RoleGeneration { role: String, source: Box<Error> },
}

/// Convenience type alias for Results with the crate error type.
///
/// # Type Parameters
/// * `T` - The type of the success value
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The error to handle
///
/// # Behavior
/// Prints the error message to stderr and exits with status code 1
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(crate::constants::exit_codes::FAILURE);
}
