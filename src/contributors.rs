// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Contributor listings for repository pages.
///
/// Fetches contributors from the GitHub API and ranks them by contribution
/// count. The count only drives the ranking and is not part of the emitted
/// records.
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::{
    client::RemoteClient, error::Error, releases::is_empty_payload, repository::RepositoryId,
};

/// GitHub API contributor response structure.
#[derive(Debug, Clone, Deserialize,)]
struct RemoteContributor
{
    pub login:         String,
    pub avatar_url:    String,
    pub html_url:      String,
    #[serde(default)]
    pub contributions: u64,
}

/// Contributor entry written to `contributor/<repo>.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize,)]
pub struct ContributorRecord
{
    pub username: String,
    pub avatar:   String,
    pub link:     String,
}

impl std::fmt::Display for ContributorRecord
{
    fn fmt(&self, f: &mut std::fmt::Formatter<'_,>,) -> std::fmt::Result
    {
        write!(f, "{} ({})", self.username, self.link)
    }
}

/// Route of the contributors endpoint.
pub fn contributors_route(repository: &RepositoryId,) -> String
{
    format!("/repos/{repository}/contributors")
}

/// Orders contributors by descending contribution count and strips the
/// count. Equal counts keep their remote order.
fn rank(mut contributors: Vec<RemoteContributor,>,) -> Vec<ContributorRecord,>
{
    contributors.sort_by(|a, b| b.contributions.cmp(&a.contributions,),);

    contributors
        .into_iter()
        .map(|contributor| ContributorRecord {
            username: contributor.login,
            avatar:   contributor.avatar_url,
            link:     contributor.html_url,
        },)
        .collect()
}

/// Fetches and ranks contributors through a shared [`RemoteClient`].
#[derive(Debug,)]
pub struct ContributorFetcher<C,>
{
    client: Arc<C,>,
}

impl<C: RemoteClient,> ContributorFetcher<C,>
{
    pub fn new(client: Arc<C,>,) -> Self
    {
        Self {
            client,
        }
    }

    /// Fetches all contributors of `repository`, most active first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the remote reports no contributors,
    /// [`Error::Decode`] when the payload is not a contributor list, and
    /// propagates client errors.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use std::sync::Arc;
    ///
    /// use repo_api::{ContributorFetcher, GitHubClient, RepositoryId};
    ///
    /// # async fn example() -> Result<(), repo_api::Error> {
    /// let fetcher = ContributorFetcher::new(Arc::new(GitHubClient::new()?,),);
    /// let repository = RepositoryId::parse("octocat/hello-world",)?;
    /// for contributor in fetcher.all(&repository,).await? {
    ///     println!("{}", contributor);
    /// }
    /// # Ok(())
    /// # }
    /// ```
    pub async fn all(
        &self,
        repository: &RepositoryId,
    ) -> Result<Vec<ContributorRecord,>, Error,>
    {
        debug!("Fetching contributors for {}", repository);

        let route = contributors_route(repository,);
        let payload = self.client.get_json(&route,).await?;

        if is_empty_payload(&payload,) {
            return Err(Error::not_found(repository.as_str(), "contributors",),);
        }

        let contributors: Vec<RemoteContributor,> =
            serde_json::from_value(payload,).map_err(|e| Error::decode(&route, e.to_string(),),)?;

        info!("Found {} contributors for {}", contributors.len(), repository);

        Ok(rank(contributors,),)
    }
}
