//! Static JSON API for repository releases and contributors.
//!
//! The library fetches release and contributor metadata for a configured list
//! of GitHub repositories and writes it as JSON files suitable for serving
//! from a static site. Configuration entries select generators by name; the
//! [`GeneratorRegistry`] resolves those names and [`run`] drives a whole
//! configuration document.

mod client;
mod config;
mod contributors;
mod driver;
mod error;
mod generator;
mod releases;
mod repository;
pub mod store;

pub use client::{GitHubClient, RemoteClient};
pub use config::{ApiEntry, CONFIG_CANDIDATES, SiteConfig, discover};
pub use contributors::{ContributorFetcher, ContributorRecord, contributors_route};
pub use driver::{RunSummary, run};
pub use error::{Error, io_error, storage_error};
pub use generator::{
    CONTRIBUTOR_DIR, ContributorGenerator, Fetchers, Generator, GeneratorKind, GeneratorRegistry,
    LATEST_FILE, RELEASE_DIR, ReleaseGenerator, SOCIAL_FILE, SocialGenerator,
};
pub use releases::{
    AssetRecord, ReleaseFetcher, ReleaseIndex, ReleaseRecord, all_releases_route,
    latest_release_route,
};
pub use repository::RepositoryId;
