// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Release metadata fetched from the remote API.
///
/// Remote release objects are reduced to [`ReleaseRecord`] values that keep
/// only the tag, the prerelease flag, the publication timestamp and the asset
/// download links.
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

use crate::{client::RemoteClient, error::Error, repository::RepositoryId};

/// GitHub API release response structure.
#[derive(Debug, Deserialize,)]
struct RemoteRelease
{
    tag_name:     String,
    #[serde(default)]
    prerelease:   bool,
    #[serde(default)]
    published_at: Option<String,>,
    #[serde(default)]
    assets:       Vec<RemoteAsset,>,
}

/// GitHub API release asset.
#[derive(Debug, Deserialize,)]
struct RemoteAsset
{
    name:                 String,
    browser_download_url: String,
}

/// Normalized release as written to `<tag>.json` and `latest.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct ReleaseRecord
{
    /// Tag the release was published under.
    pub tag:          String,
    /// Whether the release is marked as a prerelease.
    pub prerelease:   bool,
    /// Publication timestamp as reported by the remote API.
    pub published_at: Option<String,>,
    /// Downloadable assets in remote order.
    pub assets:       Vec<AssetRecord,>,
}

/// Single downloadable file attached to a release.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct AssetRecord
{
    pub name:         String,
    pub download_url: String,
}

impl From<RemoteRelease,> for ReleaseRecord
{
    fn from(release: RemoteRelease,) -> Self
    {
        Self {
            tag:          release.tag_name,
            prerelease:   release.prerelease,
            published_at: release.published_at,
            assets:       release
                .assets
                .into_iter()
                .map(|asset| AssetRecord {
                    name: asset.name, download_url: asset.browser_download_url,
                },)
                .collect(),
        }
    }
}

/// Append-only list of every tag seen for a repository.
///
/// Tags keep the order in which they were first observed and are never
/// removed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize,)]
#[serde(transparent)]
pub struct ReleaseIndex(Vec<String,>,);

impl ReleaseIndex
{
    /// Appends `tag` unless it is already present. Returns whether the index
    /// changed.
    pub fn insert(&mut self, tag: &str,) -> bool
    {
        if self.contains(tag,) {
            return false;
        }
        self.0.push(tag.to_owned(),);
        true
    }

    pub fn contains(&self, tag: &str,) -> bool
    {
        self.0.iter().any(|known| known == tag,)
    }

    pub fn tags(&self,) -> &[String]
    {
        &self.0
    }
}

/// Route of the latest release endpoint.
pub fn latest_release_route(repository: &RepositoryId, prerelease: bool,) -> String
{
    format!("/repos/{repository}/releases/latest?prerelease={prerelease}")
}

/// Route of the endpoint listing every release.
pub fn all_releases_route(repository: &RepositoryId,) -> String
{
    format!("/repos/{repository}/releases")
}

/// Fetches and normalizes releases through a shared [`RemoteClient`].
#[derive(Debug,)]
pub struct ReleaseFetcher<C,>
{
    client: Arc<C,>,
}

impl<C: RemoteClient,> ReleaseFetcher<C,>
{
    pub fn new(client: Arc<C,>,) -> Self
    {
        Self {
            client,
        }
    }

    /// Fetches the latest release of `repository`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the repository has no release,
    /// [`Error::Decode`] when the payload is not a release object, and
    /// propagates client errors.
    pub async fn latest(
        &self,
        repository: &RepositoryId,
        prerelease: bool,
    ) -> Result<ReleaseRecord, Error,>
    {
        let route = latest_release_route(repository, prerelease,);
        let payload = self.client.get_json(&route,).await?;

        if is_empty_payload(&payload,) {
            return Err(Error::not_found(repository.as_str(), "releases",),);
        }

        let release: RemoteRelease =
            serde_json::from_value(payload,).map_err(|e| Error::decode(&route, e.to_string(),),)?;
        debug!("Latest release of {} is {}", repository, release.tag_name);

        Ok(release.into(),)
    }

    /// Fetches every release of `repository` in remote order.
    ///
    /// # Errors
    ///
    /// Same as [`latest`](Self::latest); an empty list is reported as
    /// [`Error::NotFound`].
    pub async fn all(&self, repository: &RepositoryId,) -> Result<Vec<ReleaseRecord,>, Error,>
    {
        let route = all_releases_route(repository,);
        let payload = self.client.get_json(&route,).await?;

        if is_empty_payload(&payload,) {
            return Err(Error::not_found(repository.as_str(), "releases",),);
        }

        let releases: Vec<RemoteRelease,> =
            serde_json::from_value(payload,).map_err(|e| Error::decode(&route, e.to_string(),),)?;
        info!("Fetched {} releases for {}", releases.len(), repository);

        Ok(releases.into_iter().map(ReleaseRecord::from,).collect(),)
    }
}

/// Null, `{}` and `[]` all mean the remote had nothing to return.
pub(crate) fn is_empty_payload(payload: &Value,) -> bool
{
    match payload {
        Value::Null => true,
        Value::Array(items,) => items.is_empty(),
        Value::Object(fields,) => fields.is_empty(),
        _ => false,
    }
}
