use shared::{ConfigError, DatasetError};
use std::path::Path;

#[derive(Debug, thiserror::Error)]
pub enum BackendError {
    #[error("failed to read '{path}': {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("failed to write '{path}': {source}")]
    Write {
        path: String,
        source: std::io::Error,
    },
    #[error("invalid data in '{path}': {source}")]
    Dataset {
        path: String,
        source: DatasetError,
    },
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("failed to watch data file: {0}")]
    Watch(#[from] notify::Error),
}

impl BackendError {
    pub fn read(path: &Path, source: std::io::Error) -> Self {
        Self::Read {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn write(path: &Path, source: std::io::Error) -> Self {
        Self::Write {
            path: path.display().to_string(),
            source,
        }
    }

    pub fn dataset(path: &Path, source: DatasetError) -> Self {
        Self::Dataset {
            path: path.display().to_string(),
            source,
        }
    }
}
