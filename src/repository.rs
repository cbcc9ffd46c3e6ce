// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! Repository identifiers in `owner/name` form.
//!
//! Identifiers are validated when the configuration is loaded so that every
//! value reaching the fetchers maps onto a well-formed API route and a safe
//! file name inside the output tree.

use std::{fmt, sync::LazyLock};

use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::Error;

static REPOSITORY_PATTERN: LazyLock<Regex,> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_.-]+/[A-Za-z0-9_.-]+$",).expect("repository pattern is valid",)
},);

/// Repository hosted on the remote platform, identified as `owner/name`.
///
/// # Examples
///
/// ```
/// use repo_api::RepositoryId;
///
/// let repository = RepositoryId::parse("octocat/hello-world",).expect("valid identifier",);
/// assert_eq!(repository.short_name(), "hello-world");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize,)]
#[serde(try_from = "String", into = "String")]
pub struct RepositoryId(String,);

impl RepositoryId
{
    /// Parses and validates an `owner/name` identifier.
    ///
    /// Surrounding whitespace is trimmed. The `.` and `..` names are rejected
    /// because the short name is used as a path component.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] when the value is not a single
    /// `owner/name` pair of ASCII alphanumerics, `-`, `_` or `.`.
    pub fn parse(value: &str,) -> Result<Self, Error,>
    {
        let trimmed = value.trim();
        if !REPOSITORY_PATTERN.is_match(trimmed,) {
            return Err(Error::validation(format!(
                "repository '{trimmed}' must use the owner/name form"
            ),),);
        }

        let candidate = Self(trimmed.to_owned(),);
        if matches!(candidate.short_name(), "." | "..") || matches!(candidate.owner(), "." | "..")
        {
            return Err(Error::validation(format!(
                "repository '{trimmed}' is not a valid path component"
            ),),);
        }

        Ok(candidate,)
    }

    /// Full identifier, e.g. `octocat/hello-world`.
    pub fn as_str(&self,) -> &str
    {
        &self.0
    }

    /// Account that owns the repository.
    pub fn owner(&self,) -> &str
    {
        self.0.split_once('/',).map_or(self.0.as_str(), |(owner, _,)| owner,)
    }

    /// Name used for output files: the part after the last `/`.
    pub fn short_name(&self,) -> &str
    {
        self.0.rsplit('/',).next().unwrap_or(self.0.as_str(),)
    }
}

impl fmt::Display for RepositoryId
{
    fn fmt(&self, f: &mut fmt::Formatter<'_,>,) -> fmt::Result
    {
        f.write_str(&self.0,)
    }
}

impl TryFrom<String,> for RepositoryId
{
    type Error = Error;

    fn try_from(value: String,) -> Result<Self, Self::Error,>
    {
        Self::parse(&value,)
    }
}

impl From<RepositoryId,> for String
{
    fn from(value: RepositoryId,) -> Self
    {
        value.0
    }
}
