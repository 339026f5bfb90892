//! Resource retrieval.
//!
//! A [`ResourceSource`] turns a resource name such as `patients.csv` into its
//! UTF-8 text. Sources never cache: every `fetch` reads again.

use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::error::{IngestError, Result};

/// Maximum resource size accepted by [`DirectorySource`] (500 MB default).
pub const MAX_RESOURCE_SIZE: u64 = 500 * 1024 * 1024;

/// Default data directory, relative to the working directory.
pub const DEFAULT_DATA_DIR: &str = "data";

/// Retrieves the raw text of a named tabular resource.
pub trait ResourceSource {
    fn fetch(&self, name: &str) -> Result<String>;
}

/// Settings for reading resources from disk.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub data_dir: PathBuf,
    pub max_file_size: u64,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from(DEFAULT_DATA_DIR),
            max_file_size: MAX_RESOURCE_SIZE,
        }
    }
}

impl LoadOptions {
    #[must_use]
    pub fn with_data_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.data_dir = dir.into();
        self
    }

    #[must_use]
    pub fn with_max_file_size(mut self, max_file_size: u64) -> Self {
        self.max_file_size = max_file_size;
        self
    }
}

/// Resources stored as files under a data directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    options: LoadOptions,
}

impl DirectorySource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self::with_options(LoadOptions::default().with_data_dir(data_dir))
    }

    pub fn with_options(options: LoadOptions) -> Self {
        Self { options }
    }

    pub fn data_dir(&self) -> &Path {
        &self.options.data_dir
    }

    /// Resolves a resource name to a path inside the data directory.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let relative = Path::new(name);
        let is_contained = !name.trim().is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !is_contained {
            return Err(IngestError::InvalidName {
                name: name.to_string(),
            });
        }
        Ok(self.options.data_dir.join(relative))
    }
}

impl ResourceSource for DirectorySource {
    fn fetch(&self, name: &str) -> Result<String> {
        let path = self.resolve(name)?;
        check_file_size_with_limit(name, &path, self.options.max_file_size)?;
        let bytes = std::fs::read(&path).map_err(|e| io_error(name, &path, e))?;
        tracing::debug!(resource = name, bytes = bytes.len(), "fetched resource");
        decode_text(name, bytes)
    }
}

/// Resources held in memory, keyed by name.
#[derive(Debug, Clone, Default)]
pub struct MemorySource {
    resources: BTreeMap<String, String>,
}

impl MemorySource {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: impl Into<String>, text: impl Into<String>) -> Self {
        self.insert(name, text);
        self
    }

    pub fn insert(&mut self, name: impl Into<String>, text: impl Into<String>) {
        self.resources.insert(name.into(), text.into());
    }
}

impl ResourceSource for MemorySource {
    fn fetch(&self, name: &str) -> Result<String> {
        self.resources
            .get(name)
            .cloned()
            .ok_or_else(|| IngestError::NotFound {
                name: name.to_string(),
                path: PathBuf::from(name),
            })
    }
}

/// Check a resource's size against a limit before reading it.
pub fn check_file_size_with_limit(name: &str, path: &Path, max_size: u64) -> Result<()> {
    let metadata = std::fs::metadata(path).map_err(|e| io_error(name, path, e))?;

    if metadata.len() > max_size {
        return Err(IngestError::TooLarge {
            name: name.to_string(),
            size: metadata.len(),
            max_size,
        });
    }

    Ok(())
}

/// Decode raw bytes as UTF-8, rejecting UTF-16 byte-order marks.
fn decode_text(name: &str, bytes: Vec<u8>) -> Result<String> {
    if bytes.starts_with(&[0xFF, 0xFE]) {
        return Err(IngestError::UnsupportedEncoding {
            name: name.to_string(),
            encoding: "UTF-16 LE",
        });
    }
    if bytes.starts_with(&[0xFE, 0xFF]) {
        return Err(IngestError::UnsupportedEncoding {
            name: name.to_string(),
            encoding: "UTF-16 BE",
        });
    }
    String::from_utf8(bytes).map_err(|_| IngestError::UnsupportedEncoding {
        name: name.to_string(),
        encoding: "non-UTF-8",
    })
}

fn io_error(name: &str, path: &Path, error: std::io::Error) -> IngestError {
    if error.kind() == std::io::ErrorKind::NotFound {
        IngestError::NotFound {
            name: name.to_string(),
            path: path.to_path_buf(),
        }
    } else {
        IngestError::Read {
            name: name.to_string(),
            source: error,
        }
    }
}
