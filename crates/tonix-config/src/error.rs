//! Preset and configuration errors.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Everything that can go wrong loading, validating or saving a preset.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A preset file could not be read.
    #[error("cannot read preset '{path}': {source}")]
    ReadFile {
        /// File that was being read.
        path: PathBuf,
        /// I/O cause.
        #[source]
        source: std::io::Error,
    },

    /// A preset file could not be written.
    #[error("cannot write preset '{path}': {source}")]
    WriteFile {
        /// File that was being written.
        path: PathBuf,
        /// I/O cause.
        #[source]
        source: std::io::Error,
    },

    /// A preset directory could not be created.
    #[error("cannot create preset directory '{path}': {source}")]
    CreateDir {
        /// Directory that was being created.
        path: PathBuf,
        /// I/O cause.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid preset TOML.
    #[error("malformed preset: {0}")]
    TomlParse(#[from] toml::de::Error),

    /// The preset could not be rendered as TOML.
    #[error("cannot serialize preset: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    /// No factory preset, file, or preset directory entry by that name.
    #[error("preset not found: {0}")]
    PresetNotFound(String),

    /// A value is out of range, or a name is not a known type, brightness
    /// or compatibility.
    #[error("invalid {param}: {reason}")]
    InvalidParameter {
        /// Parameter string id (`process`, `type`, `compatibility`, ...).
        param: String,
        /// What is wrong with the value.
        reason: String,
    },
}

impl ConfigError {
    pub(crate) fn read_file(path: &Path, source: std::io::Error) -> Self {
        Self::ReadFile {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn write_file(path: &Path, source: std::io::Error) -> Self {
        Self::WriteFile {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn create_dir(path: &Path, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.to_path_buf(),
            source,
        }
    }

    pub(crate) fn invalid_param(param: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            param: param.into(),
            reason: reason.into(),
        }
    }

    /// Whether the error came from the filesystem rather than the preset's
    /// contents.
    pub fn is_io(&self) -> bool {
        matches!(
            self,
            Self::ReadFile { .. } | Self::WriteFile { .. } | Self::CreateDir { .. }
        )
    }
}
