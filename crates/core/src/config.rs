//! Core runtime configuration.
//!
//! Configuration is resolved once at process startup and passed into the [`crate::Session`].
//! Command handling never reads environment variables itself, which keeps replayed command
//! files deterministic and lets tests run without touching the process environment.

use crate::constants::DEFAULT_MAX_LOAD_DEPTH;
use crate::{TriageError, TriageResult};
use std::path::{Path, PathBuf};

/// Core configuration resolved at startup.
#[derive(Clone, Debug)]
pub struct TriageConfig {
    data_dir: PathBuf,
    max_load_depth: usize,
}

impl Default for TriageConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            max_load_depth: DEFAULT_MAX_LOAD_DEPTH,
        }
    }
}

impl TriageConfig {
    /// Create a new `TriageConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`TriageError::InvalidInput`] if `max_load_depth` is 0, which would make every
    /// `load` command fail.
    pub fn new(data_dir: PathBuf, max_load_depth: usize) -> TriageResult<Self> {
        if max_load_depth == 0 {
            return Err(TriageError::InvalidInput(
                "max_load_depth must be at least 1".into(),
            ));
        }

        Ok(Self {
            data_dir,
            max_load_depth,
        })
    }

    /// Build a configuration from raw environment values (`None` when unset).
    pub fn from_env_values(
        data_dir: Option<String>,
        max_load_depth: Option<String>,
    ) -> TriageResult<Self> {
        Self::new(
            data_dir_from_env_value(data_dir),
            max_load_depth_from_env_value(max_load_depth)?,
        )
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn max_load_depth(&self) -> usize {
        self.max_load_depth
    }

    /// Resolve a file name given to `save` or `load`.
    ///
    /// Absolute paths are used as they are; relative ones are taken from the data directory.
    pub fn resolve_path(&self, file_name: &str) -> PathBuf {
        let path = Path::new(file_name);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Parse the data directory from an optional value; unset or blank means the working directory.
pub fn data_dir_from_env_value(value: Option<String>) -> PathBuf {
    non_blank(value)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("."))
}

/// Parse the load nesting limit from an optional value.
///
/// If `value` is `None` or empty/whitespace, returns [`DEFAULT_MAX_LOAD_DEPTH`].
pub fn max_load_depth_from_env_value(value: Option<String>) -> TriageResult<usize> {
    match non_blank(value) {
        None => Ok(DEFAULT_MAX_LOAD_DEPTH),
        Some(raw) => raw.parse::<usize>().map_err(|_| {
            TriageError::InvalidInput(format!("max load depth must be a whole number, got '{raw}'"))
        }),
    }
}
