// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Runs every configured entry through the generators it names.
///
/// Entries and generators are processed strictly in order. Unknown generator
/// names are skipped; any other failure aborts the run and leaves the files
/// already written in place.
use std::path::Path;

use indicatif::{ProgressBar, ProgressStyle};
use tracing::{debug, info};

use crate::{
    client::RemoteClient, config::SiteConfig, error::Error, generator::GeneratorRegistry,
};

/// Counts reported once a run completes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq,)]
pub struct RunSummary
{
    /// Generator invocations that completed.
    pub generated: usize,
    /// Generator names that did not resolve.
    pub skipped:   usize,
}

/// Generates the output tree described by `config` under `output`.
///
/// # Errors
///
/// Returns the first error raised by a generator.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use repo_api::{GeneratorRegistry, GitHubClient, SiteConfig, run};
///
/// # async fn example() -> Result<(), repo_api::Error> {
/// let config = SiteConfig::load(Path::new("config.yaml",),)?;
/// let registry = GeneratorRegistry::new(GitHubClient::new()?,);
/// let summary = run(&config, &registry, &config.output,).await?;
/// println!("{} generators ran", summary.generated);
/// # Ok(())
/// # }
/// ```
pub async fn run<C: RemoteClient,>(
    config: &SiteConfig,
    registry: &GeneratorRegistry<C,>,
    output: &Path,
) -> Result<RunSummary, Error,>
{
    let pb = ProgressBar::new_spinner();
    pb.set_style(
        ProgressStyle::with_template("{spinner:.yellow} [{elapsed_precise}] {msg}",)
            .unwrap_or_else(|_| ProgressStyle::default_spinner(),),
    );

    let mut summary = RunSummary::default();

    info!("Generating {} entries into {}", config.api.len(), output.display());
    for (position, entry,) in config.api.iter().enumerate() {
        for name in &entry.generators {
            let Some(generator,) = registry.resolve(name,) else {
                debug!("Skipping unknown generator '{}' in api[{}]", name, position);
                summary.skipped += 1;
                continue;
            };

            pb.set_message(format!("Running {name} generator for api[{position}]..."),);
            info!(
                "Running {} generator for {} repositories",
                name,
                entry.repositories.len()
            );

            if let Err(error,) = generator.generate(entry, output,).await {
                pb.abandon_with_message(format!("Failed in {name} generator for api[{position}]"),);
                return Err(error,);
            }
            summary.generated += 1;
        }
    }

    pb.finish_with_message(format!(
        "Generation complete: {} generators ran, {} skipped",
        summary.generated, summary.skipped
    ),);

    Ok(summary,)
}

#[cfg(test)]
mod tests
{
    use std::fs;

    use serde_json::json;
    use tempfile::tempdir;

    use super::{RunSummary, run};
    use crate::{Error, GeneratorRegistry, SiteConfig, client::testing::StubClient};

    fn latest(tag: &str,) -> serde_json::Value
    {
        json!({"tag_name": tag, "prerelease": false, "published_at": "2024-01-01T00:00:00Z", "assets": []})
    }

    #[tokio::test]
    async fn unknown_segments_are_skipped()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let config = SiteConfig::parse(
            "output: out\napi:\n  - type: bogus+release\n    repositories: [octocat/hello-world]\n",
        )
        .expect("valid configuration",);
        let client = StubClient::default()
            .with("/repos/octocat/hello-world/releases/latest?prerelease=false", latest("v1.0.0",),);
        let registry = GeneratorRegistry::new(client,);

        let summary = run(&config, &registry, dir.path(),).await.expect("run failed",);

        assert_eq!(summary, RunSummary {
            generated: 1, skipped: 1,
        });
        assert!(dir.path().join("release/hello-world/v1.0.0.json",).is_file());
        assert!(!dir.path().join("contributor",).exists());
        assert!(!dir.path().join("social.json",).exists());
    }

    #[tokio::test]
    async fn blank_and_padded_names_are_skipped()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let config = SiteConfig::parse(
            "output: out\napi:\n  - type: ''\n  - type: 'bogus+ release'\n  - type: social\n    x: 1\n",
        )
        .expect("valid configuration",);
        let registry = GeneratorRegistry::new(StubClient::default(),);

        let summary = run(&config, &registry, dir.path(),).await.expect("run failed",);

        assert_eq!(summary, RunSummary {
            generated: 1, skipped: 3,
        });
        assert_eq!(
            fs::read_to_string(dir.path().join("social.json",),).expect("social file",),
            r#"{"x":1}"#
        );
        assert!(!dir.path().join("release",).exists());
    }

    #[tokio::test]
    async fn generators_run_in_entry_order()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let config = SiteConfig::parse(
            r#"
output: out
api:
  - type: contributor+release
    repositories: [octocat/hello-world]
  - type: social
    github: https://github.com/octocat
"#,
        )
        .expect("valid configuration",);
        let client = StubClient::default()
            .with("/repos/octocat/hello-world/releases/latest?prerelease=false", latest("v2.0.0",),)
            .with(
                "/repos/octocat/hello-world/contributors",
                json!([{"login": "octocat", "avatar_url": "a", "html_url": "h", "contributions": 3}]),
            );
        let registry = GeneratorRegistry::new(client,);

        let summary = run(&config, &registry, dir.path(),).await.expect("run failed",);

        assert_eq!(summary.generated, 3);
        assert_eq!(
            fs::read_to_string(dir.path().join("social.json",),).expect("social file",),
            r#"{"github":"https://github.com/octocat"}"#
        );
        assert!(dir.path().join("contributor/hello-world.json",).is_file());
        assert!(dir.path().join("release/hello-world.json",).is_file());
    }

    #[tokio::test]
    async fn first_error_aborts_the_run()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let config = SiteConfig::parse(
            r#"
output: out
api:
  - type: release
    repositories: [octocat/hello-world, octocat/no-releases]
  - type: social
    x: 1
"#,
        )
        .expect("valid configuration",);
        let client = StubClient::default()
            .with("/repos/octocat/hello-world/releases/latest?prerelease=false", latest("v1.0.0",),)
            .with("/repos/octocat/no-releases/releases/latest?prerelease=false", serde_json::Value::Null,);
        let registry = GeneratorRegistry::new(client,);

        let error = run(&config, &registry, dir.path(),).await.expect_err("run must fail",);

        assert!(matches!(error, Error::NotFound { .. }));
        assert!(dir.path().join("release/hello-world/latest.json",).is_file());
        assert!(!dir.path().join("social.json",).exists());
    }

    #[tokio::test]
    async fn empty_configuration_generates_nothing()
    {
        let dir = tempdir().expect("failed to create tempdir",);
        let config = SiteConfig::parse("output: out\n",).expect("valid configuration",);
        let registry = GeneratorRegistry::new(StubClient::default(),);

        let summary = run(&config, &registry, dir.path(),).await.expect("run failed",);

        assert_eq!(summary, RunSummary::default());
    }
}
