use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("cannot parse feature names/ids from file {}", .0.display())]
    EmptyIdentifierSet(PathBuf),

    #[error("cannot determine file type for file {}", .0.display())]
    UnknownFileType(PathBuf),

    #[error("invalid feature pattern {feature:?}: {source}")]
    InvalidFeature {
        feature: String,
        #[source]
        source: regex::Error,
    },

    #[error("cannot read file {}: {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write filtered output: {0}")]
    Write(#[source] std::io::Error),
}

impl Error {
    pub(crate) fn read(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }
}
