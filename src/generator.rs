// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Generators that turn fetched data and static settings into files of the
//! output tree.
//!
//! Output layout, relative to the configured root:
//!
//! - `release/<repo>/<tag>.json`: written once per tag, never replaced.
//! - `release/<repo>/latest.json`: replaced on every run.
//! - `release/<repo>.json`: append-only index of tags.
//! - `contributor/<repo>.json`: replaced on every run.
//! - `social.json`: written from the settings only when absent.

use std::{path::Path, sync::Arc};

use serde_json::Value;
use tracing::{debug, info};

use crate::{
    client::RemoteClient,
    config::ApiEntry,
    contributors::ContributorFetcher,
    error::Error,
    releases::{ReleaseFetcher, ReleaseIndex},
    store::{self, WriteMode},
};

/// Directory holding release files and indexes.
pub const RELEASE_DIR: &str = "release";
/// Directory holding contributor listings.
pub const CONTRIBUTOR_DIR: &str = "contributor";
/// File holding the social settings.
pub const SOCIAL_FILE: &str = "social.json";
/// File holding the most recent release of a repository.
pub const LATEST_FILE: &str = "latest.json";

/// Names accepted in the `type` field of a configuration entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash,)]
pub enum GeneratorKind
{
    Release,
    Contributor,
    Social,
}

impl GeneratorKind
{
    pub const ALL: [Self; 3] = [Self::Release, Self::Contributor, Self::Social];

    pub fn name(self,) -> &'static str
    {
        match self {
            Self::Release => "release",
            Self::Contributor => "contributor",
            Self::Social => "social",
        }
    }

    pub fn from_name(name: &str,) -> Option<Self,>
    {
        Self::ALL.into_iter().find(|kind| kind.name() == name,)
    }
}

/// Release and contributor fetchers sharing one client.
#[derive(Debug,)]
pub struct Fetchers<C,>
{
    pub releases:     ReleaseFetcher<C,>,
    pub contributors: ContributorFetcher<C,>,
}

impl<C: RemoteClient,> Fetchers<C,>
{
    pub fn new(client: C,) -> Self
    {
        let client = Arc::new(client,);
        Self {
            releases:     ReleaseFetcher::new(Arc::clone(&client,),),
            contributors: ContributorFetcher::new(client,),
        }
    }
}

/// Writes the latest release, its immutable tag file and the tag index.
#[derive(Debug,)]
pub struct ReleaseGenerator<C,>
{
    fetchers: Arc<Fetchers<C,>,>,
}

impl<C: RemoteClient,> ReleaseGenerator<C,>
{
    pub fn new(fetchers: Arc<Fetchers<C,>,>,) -> Self
    {
        Self {
            fetchers,
        }
    }

    /// Processes every repository of `entry` in order.
    ///
    /// Only the latest non-prerelease release is fetched. A tag file that
    /// already exists is left untouched even when the remote content for that
    /// tag changed.
    ///
    /// # Errors
    ///
    /// Propagates fetch and storage errors; the first failure stops the loop.
    pub async fn generate(&self, entry: &ApiEntry, output: &Path,) -> Result<(), Error,>
    {
        let release_root = output.join(RELEASE_DIR,);

        for repository in &entry.repositories {
            let release = self.fetchers.releases.latest(repository, false,).await?;
            let name = repository.short_name();

            if !is_single_component(&release.tag,) {
                return Err(Error::decode(
                    repository.as_str(),
                    format!("release tag '{}' cannot be used as a file name", release.tag),
                ),);
            }

            let release_dir = release_root.join(name,);
            store::ensure_dir(&release_dir,)?;

            let tag_path = release_dir.join(format!("{}.json", release.tag),);
            if store::write_json(&tag_path, &release, WriteMode::CreateNew,)? {
                info!("Stored release {} of {}", release.tag, repository);
            }
            store::write_json(&release_dir.join(LATEST_FILE,), &release, WriteMode::Overwrite,)?;

            let index_path = release_root.join(format!("{name}.json"),);
            let mut index: ReleaseIndex = store::read_json(&index_path, ReleaseIndex::default(),)?;
            if index.insert(&release.tag,) {
                debug!("Indexed tag {} for {}", release.tag, repository);
            }
            store::write_json(&index_path, &index, WriteMode::Overwrite,)?;
        }

        Ok((),)
    }
}

/// Writes the ranked contributor list of each repository.
#[derive(Debug,)]
pub struct ContributorGenerator<C,>
{
    fetchers: Arc<Fetchers<C,>,>,
}

impl<C: RemoteClient,> ContributorGenerator<C,>
{
    pub fn new(fetchers: Arc<Fetchers<C,>,>,) -> Self
    {
        Self {
            fetchers,
        }
    }

    /// # Errors
    ///
    /// Propagates fetch and storage errors; the first failure stops the loop.
    pub async fn generate(&self, entry: &ApiEntry, output: &Path,) -> Result<(), Error,>
    {
        let contributor_root = output.join(CONTRIBUTOR_DIR,);
        store::ensure_dir(&contributor_root,)?;

        for repository in &entry.repositories {
            let contributors = self.fetchers.contributors.all(repository,).await?;
            let path = contributor_root.join(format!("{}.json", repository.short_name()),);

            store::write_json(&path, &contributors, WriteMode::Overwrite,)?;
            info!("Stored {} contributors of {}", contributors.len(), repository);
        }

        Ok((),)
    }
}

/// Persists the social settings block.
#[derive(Debug, Clone, Copy, Default,)]
pub struct SocialGenerator;

impl SocialGenerator
{
    /// Writes the entry settings to `social.json` unless the file exists, in
    /// which case its current content is written back unchanged.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Decode`] when the existing file is not JSON and
    /// [`Error::Storage`] on I/O failures.
    pub fn generate(&self, entry: &ApiEntry, output: &Path,) -> Result<(), Error,>
    {
        store::ensure_dir(output,)?;

        let path = output.join(SOCIAL_FILE,);
        let incoming = Value::Object(entry.settings.clone(),);
        let social: Value = store::read_json(&path, incoming.clone(),)?;
        if social != incoming {
            debug!("Keeping existing {}", path.display());
        }

        store::write_json(&path, &social, WriteMode::Overwrite,)?;
        Ok((),)
    }
}

/// One of the generators a configuration entry can name.
#[derive(Debug,)]
pub enum Generator<C,>
{
    Release(ReleaseGenerator<C,>,),
    Contributor(ContributorGenerator<C,>,),
    Social(SocialGenerator,),
}

impl<C: RemoteClient,> Generator<C,>
{
    pub fn kind(&self,) -> GeneratorKind
    {
        match self {
            Self::Release(_,) => GeneratorKind::Release,
            Self::Contributor(_,) => GeneratorKind::Contributor,
            Self::Social(_,) => GeneratorKind::Social,
        }
    }

    /// Produces this generator's files for `entry` under `output`.
    ///
    /// # Errors
    ///
    /// Propagates the errors of the underlying generator.
    pub async fn generate(&self, entry: &ApiEntry, output: &Path,) -> Result<(), Error,>
    {
        match self {
            Self::Release(generator,) => generator.generate(entry, output,).await,
            Self::Contributor(generator,) => generator.generate(entry, output,).await,
            Self::Social(generator,) => generator.generate(entry, output,),
        }
    }
}

/// Fixed lookup table from generator names to generators.
///
/// # Example
///
/// ```no_run
/// use repo_api::{GeneratorKind, GeneratorRegistry, GitHubClient};
///
/// # fn example() -> Result<(), repo_api::Error> {
/// let registry = GeneratorRegistry::new(GitHubClient::new()?,);
/// assert_eq!(registry.resolve("release",).map(|generator| generator.kind()), Some(GeneratorKind::Release));
/// assert!(registry.resolve("bogus",).is_none());
/// # Ok(())
/// # }
/// ```
#[derive(Debug,)]
pub struct GeneratorRegistry<C,>
{
    generators: Vec<Generator<C,>,>,
}

impl<C: RemoteClient,> GeneratorRegistry<C,>
{
    /// Builds the `release`, `contributor` and `social` generators around one
    /// shared fetcher pair.
    pub fn new(client: C,) -> Self
    {
        let fetchers = Arc::new(Fetchers::new(client,),);

        Self {
            generators: vec![
                Generator::Release(ReleaseGenerator::new(Arc::clone(&fetchers,),),),
                Generator::Contributor(ContributorGenerator::new(fetchers,),),
                Generator::Social(SocialGenerator,),
            ],
        }
    }

    /// Returns the generator registered under `name`.
    pub fn resolve(&self, name: &str,) -> Option<&Generator<C,>,>
    {
        self.generators.iter().find(|generator| generator.kind().name() == name,)
    }
}

fn is_single_component(tag: &str,) -> bool
{
    !tag.is_empty() && tag != "." && tag != ".." && !tag.contains(['/', '\\',],)
}
