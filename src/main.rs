//! Command-line interface for the repo-api binary.
//!
//! Loads the configuration document, then writes the release, contributor and
//! social files it describes.

use std::{
    env,
    path::{Path, PathBuf},
    process,
};

use clap::Parser;
use repo_api::{Error, GeneratorRegistry, GitHubClient, SiteConfig, discover, io_error, run};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Command line interface for generating the static repository API.
#[derive(Debug, Parser,)]
#[command(name = "repo-api", version, about = "Generate static JSON for repository releases")]
struct Cli
{
    /// Configuration file; defaults to config.yaml, config.yml or
    /// config.json in the current directory.
    #[arg(long = "config", value_name = "PATH", env = "REPO_API_CONFIG")]
    config: Option<PathBuf,>,

    /// Output directory overriding the configured `output`.
    #[arg(long = "output", value_name = "DIR")]
    output: Option<PathBuf,>,
}

/// Entry point that reports errors and sets the appropriate exit status.
#[tokio::main(flavor = "current_thread")]
async fn main()
{
    init_tracing();

    if let Err(error,) = execute(Cli::parse(),).await {
        eprintln!("{}", error.to_display_string());
        process::exit(1,);
    }
}

fn init_tracing()
{
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info",),);
    tracing_subscriber::fmt().with_env_filter(filter,).with_writer(std::io::stderr,).init();
}

/// Executes the CLI using parsed arguments.
///
/// # Errors
///
/// Propagates configuration, fetch and storage errors.
async fn execute(cli: Cli,) -> Result<(), Error,>
{
    let (config, output,) = resolve(&cli,)?;

    let registry = GeneratorRegistry::new(GitHubClient::new()?,);
    let summary = run(&config, &registry, &output,).await?;

    info!(
        "Wrote {} into {} ({} unknown generators skipped)",
        summary.generated,
        output.display(),
        summary.skipped
    );

    Ok((),)
}

fn resolve(cli: &Cli,) -> Result<(SiteConfig, PathBuf,), Error,>
{
    let cwd = env::current_dir().map_err(|source| io_error(Path::new(".",), source,),)?;
    let path = discover(cli.config.as_deref(), &cwd,)?;
    let config = SiteConfig::load(&path,)?;
    let output = cli.output.clone().unwrap_or_else(|| config.output.clone(),);

    Ok((config, output,),)
}

#[cfg(test)]
mod tests
{
    use std::{fs, path::Path};

    use clap::Parser;
    use tempfile::tempdir;

    use super::{Cli, resolve};

    #[test]
    fn cli_accepts_no_arguments()
    {
        let cli = Cli::try_parse_from([env!("CARGO_PKG_NAME")],).expect("failed to parse CLI",);

        assert!(cli.output.is_none());
    }

    #[test]
    fn cli_accepts_config_and_output()
    {
        let cli = Cli::try_parse_from([
            env!("CARGO_PKG_NAME"),
            "--config",
            "site.yaml",
            "--output",
            "public",
        ],)
        .expect("failed to parse CLI",);

        assert_eq!(cli.config.as_deref(), Some(Path::new("site.yaml")));
        assert_eq!(cli.output.as_deref(), Some(Path::new("public")));
    }

    #[test]
    fn resolve_prefers_output_override()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let config_path = temp.path().join("site.yaml",);
        fs::write(&config_path, "output: from-config\napi: []\n",).expect("failed to write config",);

        let cli = Cli {
            config: Some(config_path.clone(),), output: Some(temp.path().join("override",),),
        };
        let (config, output,) = resolve(&cli,).expect("resolve failed",);
        assert_eq!(config.output, Path::new("from-config"));
        assert_eq!(output, temp.path().join("override"));

        let cli = Cli {
            config: Some(config_path,), output: None,
        };
        let (_, output,) = resolve(&cli,).expect("resolve failed",);
        assert_eq!(output, Path::new("from-config"));
    }

    #[test]
    fn resolve_reports_invalid_configuration()
    {
        let temp = tempdir().expect("failed to create tempdir",);
        let config_path = temp.path().join("site.yaml",);
        fs::write(&config_path, "output: out\napi:\n  - type: release\n",).expect("failed to write config",);

        let cli = Cli {
            config: Some(config_path,), output: None,
        };
        let error = resolve(&cli,).expect_err("expected validation error",);

        match error {
            repo_api::Error::Validation {
                message,
            } => assert!(message.contains("repositories is required")),
            other => panic!("unexpected error variant: {other:?}"),
        }
    }
}
