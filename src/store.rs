// SPDX-FileCopyrightText: 2025 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

/// JSON file store for the generated output tree.
///
/// Documents are written as compact JSON. Writes either replace the target or
/// leave an existing file untouched, depending on the [`WriteMode`].
use std::{
    fs,
    io::{ErrorKind, Write},
    path::Path
};

use serde::{Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::error::{Error, storage_error};

/// How [`write_json`] treats a file that already exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Replace any existing content.
    Overwrite,
    /// Keep an existing file and skip the write.
    CreateNew
}

/// Creates `path` and all missing parents.
///
/// # Errors
///
/// Returns [`Error::Storage`] when the directory cannot be created.
pub fn ensure_dir(path: &Path) -> Result<(), Error> {
    fs::create_dir_all(path).map_err(|source| storage_error(path, source))
}

/// Reads a JSON document, falling back to `default` when the file is absent.
///
/// # Errors
///
/// Returns [`Error::Storage`] when the file exists but cannot be read and
/// [`Error::Decode`] when its content does not match `T`.
pub fn read_json<T>(path: &Path, default: T) -> Result<T, Error>
where
    T: DeserializeOwned
{
    let bytes = match fs::read(path) {
        Ok(bytes) => bytes,
        Err(source) if source.kind() == ErrorKind::NotFound => return Ok(default),
        Err(source) => return Err(storage_error(path, source))
    };

    serde_json::from_slice(&bytes)
        .map_err(|e| Error::decode(path.display().to_string(), e.to_string()))
}

/// Serializes `value` into `path`.
///
/// Returns `true` when the file was written and `false` when
/// [`WriteMode::CreateNew`] found an existing file.
///
/// # Errors
///
/// Returns [`Error::Serialize`] when encoding fails and [`Error::Storage`]
/// when the file cannot be opened or written.
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
///
/// use repo_api::store::{WriteMode, write_json};
///
/// # fn example() -> Result<(), repo_api::Error> {
/// let written = write_json(Path::new("public/release/demo.json"), &["v1.0.0"], WriteMode::Overwrite)?;
/// assert!(written);
/// # Ok(())
/// # }
/// ```
pub fn write_json<T>(path: &Path, value: &T, mode: WriteMode) -> Result<bool, Error>
where
    T: Serialize + ?Sized
{
    let bytes = serde_json::to_vec(value)?;

    let mut options = fs::OpenOptions::new();
    options.write(true);
    match mode {
        WriteMode::Overwrite => options.create(true).truncate(true),
        WriteMode::CreateNew => options.create_new(true)
    };

    let mut file = match options.open(path) {
        Ok(file) => file,
        Err(source) if mode == WriteMode::CreateNew && source.kind() == ErrorKind::AlreadyExists => {
            debug!("keeping existing {}", path.display());
            return Ok(false);
        }
        Err(source) => return Err(storage_error(path, source))
    };

    file.write_all(&bytes)
        .map_err(|source| storage_error(path, source))?;

    Ok(true)
}
