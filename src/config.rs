//! Configuration document describing which static API files to generate.
//!
//! The document names an output directory and a list of entries. Each entry
//! selects one or more generators through its `type` field (joined by `+`)
//! and carries the settings those generators consume.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use serde_json::{Map, Value};
use tracing::debug;

use crate::{
    error::{self, Error},
    generator::GeneratorKind,
    repository::RepositoryId,
};

/// File names probed, in order, when no configuration path is given.
pub const CONFIG_CANDIDATES: [&str; 3] = ["config.yaml", "config.yml", "config.json"];

/// Root configuration document.
///
/// # Examples
///
/// ```
/// use repo_api::SiteConfig;
///
/// let yaml = r#"
/// output: public/api
/// api:
///   - type: release+contributor
///     repositories: [octocat/hello-world]
/// "#;
/// let config = SiteConfig::parse(yaml,).expect("valid configuration",);
/// assert_eq!(config.api[0].generators, ["release", "contributor"]);
/// ```
#[derive(Debug, Clone, PartialEq,)]
pub struct SiteConfig
{
    /// Root of the generated output tree.
    pub output: PathBuf,
    /// Entries processed in document order.
    pub api:    Vec<ApiEntry,>,
}

/// One configured entry, with its `type` field already split and removed.
#[derive(Debug, Clone, PartialEq,)]
pub struct ApiEntry
{
    /// Generator names in the order they appear in `type`. Unknown names are
    /// kept and skipped at run time.
    pub generators:   Vec<String,>,
    /// Repositories the release and contributor generators iterate over.
    pub repositories: Vec<RepositoryId,>,
    /// Every field of the entry except `type`, in document order.
    pub settings:     Map<String, Value,>,
}

#[derive(Debug, Deserialize,)]
struct RawConfig
{
    output: PathBuf,
    #[serde(default)]
    api:    Vec<Map<String, Value,>,>,
}

impl SiteConfig
{
    /// Parses and validates a YAML (or JSON) document.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] for malformed documents and
    /// [`Error::Validation`] when an entry violates the rules described on
    /// [`ApiEntry::from_mapping`].
    pub fn parse(contents: &str,) -> Result<Self, Error,>
    {
        let raw: RawConfig = serde_yaml::from_str(contents,)?;

        let api = raw
            .api
            .into_iter()
            .enumerate()
            .map(|(position, mapping,)| ApiEntry::from_mapping(position, mapping,),)
            .collect::<Result<Vec<_,>, _,>>()?;

        Ok(Self {
            output: raw.output,
            api,
        },)
    }

    /// Reads and parses the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] when the file cannot be read, otherwise the same
    /// errors as [`parse`](Self::parse).
    pub fn load(path: &Path,) -> Result<Self, Error,>
    {
        debug!("Loading configuration from {}", path.display());
        let contents = fs::read_to_string(path,).map_err(|source| error::io_error(path, source,),)?;
        Self::parse(&contents,)
    }
}

impl ApiEntry
{
    /// Builds an entry from its raw mapping.
    ///
    /// `type` must be a string. It is split on `+` and every segment is kept
    /// verbatim, so blank or padded names stay unknown and are skipped at run
    /// time. `repositories`, when present, must be a list of `owner/name`
    /// identifiers, and is mandatory for entries naming the `release` or
    /// `contributor` generator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Validation`] naming the entry position.
    pub fn from_mapping(position: usize, mut mapping: Map<String, Value,>,) -> Result<Self, Error,>
    {
        let generators = match mapping.shift_remove("type",) {
            Some(Value::String(kinds,),) => kinds.split('+',).map(str::to_owned,).collect::<Vec<_,>>(),
            Some(_,) => {
                return Err(Error::validation(format!("api[{position}].type must be a string"),),);
            }
            None => return Err(Error::validation(format!("api[{position}].type is required"),),),
        };

        let repositories = match mapping.get("repositories",) {
            Some(value,) => serde_json::from_value::<Vec<RepositoryId,>,>(value.clone(),).map_err(
                |e| Error::validation(format!("api[{position}].repositories: {e}"),),
            )?,
            None => Vec::new(),
        };

        let needs_repositories = generators.iter().any(|name| {
            matches!(
                GeneratorKind::from_name(name),
                Some(GeneratorKind::Release | GeneratorKind::Contributor)
            )
        },);
        if needs_repositories && !mapping.contains_key("repositories",) {
            return Err(Error::validation(format!(
                "api[{position}].repositories is required for release and contributor generators"
            ),),);
        }

        Ok(Self {
            generators,
            repositories,
            settings: mapping,
        },)
    }
}

/// Resolves the configuration path: `explicit` when given, otherwise the
/// first of [`CONFIG_CANDIDATES`] present in `directory`.
///
/// # Errors
///
/// Returns [`Error::Validation`] when no candidate exists.
pub fn discover(explicit: Option<&Path,>, directory: &Path,) -> Result<PathBuf, Error,>
{
    if let Some(path,) = explicit {
        return Ok(path.to_path_buf(),);
    }

    CONFIG_CANDIDATES
        .iter()
        .map(|name| directory.join(name,),)
        .find(|candidate| candidate.is_file(),)
        .ok_or_else(|| {
            Error::validation(format!(
                "no configuration file found in {} (looked for {})",
                directory.display(),
                CONFIG_CANDIDATES.join(", ")
            ),)
        },)
}
