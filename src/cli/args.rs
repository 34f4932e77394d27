use crate::constants::verbosity;
use clap::{Parser, Subcommand};
use log::LevelFilter;
use std::path::PathBuf;

/// Top-level CLI for mcrender.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Render the files and units of every role in a template tree.
    Render(RenderArgs),
    /// Infer the cluster name from an infrastructure name and API server URL.
    ClusterName(ClusterNameArgs),
}

/// Arguments for `mcrender render`.
#[derive(Parser, Debug, Clone)]
pub struct RenderArgs {
    /// Template root holding `common` and the role directories.
    #[arg(value_name = "TEMPLATE_DIR")]
    pub template_dir: PathBuf,

    /// Configuration context file (JSON or YAML).
    #[arg(short, long, value_name = "FILE")]
    pub config: PathBuf,

    /// Roles to render (repeatable). Defaults to every role in the tree.
    ///
    /// Roles other than `master` and `worker` are custom pools rendered from the
    /// `worker` templates.
    #[arg(short, long = "role", value_name = "ROLE")]
    pub roles: Vec<String>,

    /// Output file for the generated JSON, `-` for stdout.
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Apply the common templates only to the first name of each role.
    ///
    /// By default the common templates sit under every name of a role. With this
    /// flag only the first name in sorted order (normally `00-<role>`) gets them
    /// and later names are rendered from their own layers alone.
    #[arg(long = "common-first-only")]
    pub common_first_only: bool,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

/// Arguments for `mcrender cluster-name`.
#[derive(Parser, Debug, Clone)]
pub struct ClusterNameArgs {
    /// Infrastructure name, e.g. `sub-my-cluster-nzml9`.
    #[arg(value_name = "INFRA_NAME")]
    pub infrastructure_name: String,

    /// API server URL, e.g. `https://api.sub.my-cluster.example.com:6443`.
    #[arg(value_name = "API_URL")]
    pub api_server_url: String,

    /// Increase logging verbosity (`-v`, `-vv`, `-vvv`).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,
}

impl Commands {
    pub fn verbose(&self) -> u8 {
        match self {
            Commands::Render(args) => args.verbose,
            Commands::ClusterName(args) => args.verbose,
        }
    }
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

/// Map `-v` counts to the appropriate log level.
pub fn get_log_level_from_verbose(verbose_count: u8) -> LevelFilter {
    match verbose_count {
        verbosity::OFF => LevelFilter::Error,
        verbosity::INFO => LevelFilter::Info,
        verbosity::DEBUG => LevelFilter::Debug,
        verbosity::TRACE.. => LevelFilter::Trace,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn maps_verbose_flags_to_log_filters() {
        assert_eq!(get_log_level_from_verbose(verbosity::OFF), LevelFilter::Error);
        assert_eq!(get_log_level_from_verbose(verbosity::INFO), LevelFilter::Info);
        assert_eq!(get_log_level_from_verbose(verbosity::DEBUG), LevelFilter::Debug);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE), LevelFilter::Trace);
        assert_eq!(get_log_level_from_verbose(verbosity::TRACE + 1), LevelFilter::Trace);
    }

    #[test]
    fn parses_minimal_render_args() {
        let cli = Cli::parse_from(["mcrender", "render", "templates", "--config", "ctx.yaml"]);
        let Commands::Render(args) = cli.command else {
            panic!("Expected render command");
        };
        assert_eq!(args.template_dir, PathBuf::from("templates"));
        assert_eq!(args.config, PathBuf::from("ctx.yaml"));
        assert!(args.roles.is_empty());
        assert!(args.output.is_none());
        assert!(!args.common_first_only);
    }

    #[test]
    fn parses_full_render_args() {
        let cli = Cli::parse_from([
            "mcrender",
            "render",
            "templates",
            "-c",
            "ctx.json",
            "--role",
            "master",
            "-r",
            "worker",
            "-o",
            "out.json",
            "--common-first-only",
            "-vv",
        ]);
        let Commands::Render(args) = cli.command else {
            panic!("Expected render command");
        };
        assert_eq!(args.roles, vec!["master", "worker"]);
        assert_eq!(args.output, Some(PathBuf::from("out.json")));
        assert!(args.common_first_only);
        assert_eq!(args.verbose, 2);
    }

    #[test]
    fn render_help_describes_common_layer_default() {
        let mut cli = Cli::command();
        let render = cli.find_subcommand_mut("render").unwrap();
        let help = render.render_long_help().to_string();
        assert!(help.contains("--common-first-only"));
        assert!(help.contains("By default the common templates sit under every name"));
    }

    #[test]
    fn parses_cluster_name_args() {
        let cli = Cli::parse_from([
            "mcrender",
            "cluster-name",
            "foo-bar-abc12",
            "https://api.foo-bar.example.com:6443",
            "-v",
        ]);
        assert_eq!(cli.command.verbose(), 1);
        let Commands::ClusterName(args) = cli.command else {
            panic!("Expected cluster-name command");
        };
        assert_eq!(args.infrastructure_name, "foo-bar-abc12");
    }
}
