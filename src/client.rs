// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// Remote JSON client used by the release and contributor fetchers.
///
/// Each call performs exactly one GET request. There is no retry, no
/// authentication and no per-request timeout configuration.
use std::future::Future;

use octocrab::Octocrab;
use serde_json::Value;
use tracing::debug;

use crate::error::Error;

/// Capability to fetch a JSON document from an API route.
pub trait RemoteClient
{
    /// Requests `route` and returns the decoded JSON body.
    ///
    /// A remote "not found" answer and a successful answer with an empty body
    /// are both reported as [`Value::Null`] so callers can raise an error that
    /// names the repository they were looking for.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] on transport failures and [`Error::Decode`]
    /// when the body is not valid JSON.
    fn get_json(&self, route: &str,) -> impl Future<Output = Result<Value, Error,>,>;
}

/// [`RemoteClient`] backed by the public GitHub REST API.
#[derive(Clone,)]
pub struct GitHubClient
{
    octocrab: Octocrab,
}

impl GitHubClient
{
    /// Builds an unauthenticated client for `api.github.com`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Network`] when the HTTP client cannot be initialized.
    pub fn new() -> Result<Self, Error,>
    {
        let octocrab = Octocrab::builder().build().map_err(|e| Error::Network {
            route:   "https://api.github.com".to_owned(),
            message: format!("failed to initialize GitHub client: {e}"),
        },)?;

        Ok(Self::with_octocrab(octocrab,),)
    }

    /// Wraps an already configured [`Octocrab`] instance.
    pub fn with_octocrab(octocrab: Octocrab,) -> Self
    {
        Self {
            octocrab,
        }
    }
}

impl RemoteClient for GitHubClient
{
    async fn get_json(&self, route: &str,) -> Result<Value, Error,>
    {
        debug!("GET {}", route);

        match self.octocrab.get::<Value, _, (),>(route, None::<&(),>,).await {
            Ok(value,) => Ok(value,),
            Err(octocrab::Error::GitHub {
                source, ..
            },) if source.message.eq_ignore_ascii_case("not found",) => {
                debug!("{} answered not found", route);
                Ok(Value::Null,)
            }
            Err(error,) if is_empty_body(&error,) => {
                debug!("{} answered with an empty body", route);
                Ok(Value::Null,)
            }
            Err(error @ (octocrab::Error::Serde { .. } | octocrab::Error::Json { .. }),) => {
                Err(Error::decode(route, error.to_string(),),)
            }
            Err(error,) => Err(Error::Network {
                route: route.to_owned(), message: error.to_string(),
            },),
        }
    }
}

/// True when decoding failed before the first byte, i.e. the body was empty.
fn is_empty_body(error: &octocrab::Error,) -> bool
{
    let source = match error {
        octocrab::Error::Serde {
            source, ..
        } => source,
        octocrab::Error::Json {
            source, ..
        } => source.inner(),
        _ => return false,
    };

    source.is_eof() && source.line() == 1 && source.column() == 0
}
