#![allow(non_shorthand_field_patterns)]
#![doc = "Error handling primitives shared across the repo-api crate."]
// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
//
// SPDX-License-Identifier: MIT

//! The derive emitted by [`masterror::Error`] expands pattern matches that
//! trigger the `non_shorthand_field_patterns` lint. The lint is disabled for
//! the module to keep the generated implementations warning-free.

use std::path::{Path, PathBuf};

/// Unified error type returned by the configuration loader, the fetchers, the
/// generators and the CLI.
///
/// None of the variants are recovered from locally: the first error raised
/// while processing any repository aborts the whole run. Files written before
/// the failure stay on disk.
#[derive(Debug, masterror::Error)]
pub enum Error {
    /// Wraps I/O errors that occur while reading configuration files.
    #[error("failed to read configuration from {path:?}: {source}")]
    Io {
        /// Location of the configuration file.
        path:   PathBuf,
        /// Underlying I/O error.
        source: std::io::Error
    },
    /// Wraps YAML decoding errors.
    #[error("failed to parse configuration: {source}")]
    Parse {
        /// Source decoding error from serde_yaml.
        source: serde_yaml::Error
    },
    /// Returned when the configuration violates invariants.
    #[error("invalid configuration: {message}")]
    Validation {
        /// Human readable message describing the validation problem.
        message: String
    },
    /// Wraps serialization errors when encoding generated documents.
    #[error("failed to serialize document: {source}")]
    Serialize {
        /// Underlying serialization error.
        source: serde_json::Error
    },
    /// Transport failure while talking to the remote API.
    #[error("request to {route} failed: {message}")]
    Network {
        /// API route that was requested.
        route:   String,
        /// Description reported by the HTTP client.
        message: String
    },
    /// A remote body or a stored document is not the expected JSON.
    #[error("failed to decode {origin}: {message}")]
    Decode {
        /// API route or file path the payload came from.
        origin:  String,
        /// Description of the decoding failure.
        message: String
    },
    /// The remote API has nothing to report for a repository.
    #[error("no {resource} found for {repository}")]
    NotFound {
        /// Repository in `owner/name` form.
        repository: String,
        /// Kind of resource that was requested.
        resource:   &'static str
    },
    /// Wraps I/O errors that occur while writing the output tree.
    #[error("failed to access output at {path:?}: {source}")]
    Storage {
        /// Location of the file or directory being accessed.
        path:   PathBuf,
        /// Underlying I/O error reported by the operating system.
        source: std::io::Error
    }
}

impl Error {
    /// Constructs a validation error from the provided displayable value.
    ///
    /// # Parameters
    ///
    /// * `message` - Human-readable description of the validation failure.
    pub fn validation<M>(message: M) -> Self
    where
        M: Into<String>
    {
        Self::Validation {
            message: message.into()
        }
    }

    /// Constructs a decode error for the given origin.
    ///
    /// # Parameters
    ///
    /// * `origin` - API route or file path the payload was read from.
    /// * `message` - Description of the decoding failure.
    pub fn decode<O, M>(origin: O, message: M) -> Self
    where
        O: Into<String>,
        M: Into<String>
    {
        Self::Decode {
            origin:  origin.into(),
            message: message.into()
        }
    }

    /// Constructs a not-found error for the repository and resource kind.
    pub fn not_found(repository: &str, resource: &'static str) -> Self {
        Self::NotFound {
            repository: repository.to_owned(),
            resource
        }
    }

    /// Formats the error for diagnostics without the variant name.
    ///
    /// This method is primarily intended for CLI contexts where the variant
    /// name does not add value to end users. The returned string matches the
    /// [`std::fmt::Display`] implementation.
    pub fn to_display_string(&self) -> String {
        format!("{self}")
    }
}

impl From<serde_yaml::Error> for Error {
    fn from(source: serde_yaml::Error) -> Self {
        Self::Parse {
            source
        }
    }
}

impl From<serde_json::Error> for Error {
    fn from(source: serde_json::Error) -> Self {
        Self::Serialize {
            source
        }
    }
}

/// Creates an [`Error::Io`] variant capturing the failing path and source.
///
/// # Parameters
///
/// * `path` - Location of the configuration file that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn io_error(path: &Path, source: std::io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source
    }
}

/// Creates an [`Error::Storage`] variant capturing the failing path and
/// source.
///
/// # Parameters
///
/// * `path` - Location in the output tree that triggered the error.
/// * `source` - I/O error reported by the operating system.
pub fn storage_error(path: &Path, source: std::io::Error) -> Error {
    Error::Storage {
        path: path.to_path_buf(),
        source
    }
}

#[cfg(test)]
mod tests {
    use super::Error;

    #[test]
    fn validation_constructor_populates_message() {
        let error = Error::validation("something went wrong");
        match error {
            Error::Validation {
                ref message
            } => {
                assert_eq!(message, "something went wrong");
            }
            other => panic!("expected validation error, got {other:?}")
        }
    }

    #[test]
    fn to_display_string_matches_display() {
        let error = Error::validation("display me");
        assert_eq!(error.to_string(), error.to_display_string());
    }

    #[test]
    fn io_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/example.yaml");
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "missing");
        let error = super::io_error(path, io_error);

        match error {
            Error::Io {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("expected io error, got {other:?}")
        }
    }

    #[test]
    fn serde_yaml_conversion_maps_to_parse_variant() {
        let error = serde_yaml::from_str::<usize>("not-a-number").unwrap_err();
        let mapped: Error = error.into();
        assert!(matches!(mapped, Error::Parse { .. }));
    }

    #[test]
    fn serde_json_conversion_maps_to_serialize_variant() {
        let invalid = serde_json::from_str::<serde_json::Value>("not-json").unwrap_err();
        let mapped: Error = invalid.into();
        assert!(matches!(mapped, Error::Serialize { .. }));
    }

    #[test]
    fn storage_error_helper_wraps_path_and_source() {
        let path = std::path::Path::new("/tmp/release/latest.json");
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let error = super::storage_error(path, io_error);

        match error {
            Error::Storage {
                path: ref stored_path,
                ref source
            } => {
                assert_eq!(stored_path, path);
                assert_eq!(source.kind(), std::io::ErrorKind::PermissionDenied);
            }
            other => panic!("expected storage error, got {other:?}")
        }
    }

    #[test]
    fn not_found_message_names_repository_and_resource() {
        let error = Error::not_found("octocat/hello-world", "releases");
        assert_eq!(error.to_string(), "no releases found for octocat/hello-world");
    }

    #[test]
    fn decode_message_names_origin() {
        let error = Error::decode("/repos/a/b/releases", "expected an array");
        assert_eq!(
            error.to_string(),
            "failed to decode /repos/a/b/releases: expected an array"
        );
    }
}
