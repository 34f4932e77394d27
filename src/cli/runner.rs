use crate::{
    cli::{ClusterNameArgs, Commands, RenderArgs},
    cluster_name::infer_cluster_name,
    config::RenderConfig,
    error::Result,
    ioutils::write_output,
    renderer::functions::url_host,
    template::{generate_configs, CommonScope, GenerateOptions},
    tree::LocalTemplateTree,
};

/// Runs `mcrender render`: loads the context, renders every role and writes JSON.
pub fn run_render(args: &RenderArgs) -> Result<()> {
    let config = RenderConfig::load(&args.config)?;
    let tree = LocalTemplateTree::new(&args.template_dir)?;

    let options = GenerateOptions {
        roles: args.roles.clone(),
        common_scope: if args.common_first_only {
            CommonScope::FirstName
        } else {
            CommonScope::EveryName
        },
    };

    let configs = generate_configs(&tree, &config, &options)?;
    log::info!(
        "Generated {} configurations from {}",
        configs.len(),
        args.template_dir.display()
    );

    let output = serde_json::to_string_pretty(&configs)?;
    write_output(&output, args.output.as_deref())
}

/// Runs `mcrender cluster-name` and prints the inferred name.
pub fn run_cluster_name(args: &ClusterNameArgs) -> Result<()> {
    let api_hostname = url_host(&args.api_server_url)?;
    let name = infer_cluster_name(&args.infrastructure_name, &api_hostname)?;
    write_output(&name, None)
}

/// Main entry point for CLI execution
pub fn run(command: &Commands) -> Result<()> {
    match command {
        Commands::Render(args) => run_render(args),
        Commands::ClusterName(args) => run_cluster_name(args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn render_writes_json_output() {
        let dir = TempDir::new().unwrap();
        let templates = dir.path().join("templates");
        std::fs::create_dir_all(templates.join("worker/00-worker/_base/files")).unwrap();
        std::fs::write(
            templates.join("worker/00-worker/_base/files/hostname"),
            "{{ cloudProvider() }}\n",
        )
        .unwrap();
        let config = dir.path().join("ctx.yaml");
        std::fs::write(&config, "infra:\n  status:\n    platformStatus:\n      type: AWS\n")
            .unwrap();
        let output = dir.path().join("out/generated.json");

        let args = RenderArgs {
            template_dir: templates,
            config,
            roles: vec![],
            output: Some(output.clone()),
            common_first_only: false,
            verbose: 0,
        };
        run_render(&args).unwrap();

        let written: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(output).unwrap()).unwrap();
        assert_eq!(written[0]["role"], "worker");
        assert_eq!(written[0]["name"], "00-worker");
        assert_eq!(written[0]["files"][0], "aws\n");
    }

    #[test]
    fn render_fails_without_platform() {
        let dir = TempDir::new().unwrap();
        std::fs::create_dir_all(dir.path().join("worker/00-worker")).unwrap();
        let config = dir.path().join("ctx.json");
        std::fs::write(&config, "{}").unwrap();

        let args = RenderArgs {
            template_dir: dir.path().to_path_buf(),
            config,
            roles: vec![],
            output: None,
            common_first_only: false,
            verbose: 0,
        };
        assert!(run_render(&args).is_err());
    }
}
