use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum VerifyError {
    #[error("input file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    #[error("no parameters_verification CSV found (searched {} directories)", .searched.len())]
    DiscoveryFailed { searched: Vec<PathBuf> },

    #[error("failed to load {}: {source}", .path.display())]
    Load {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{} has no header row", .0.display())]
    EmptyHeader(PathBuf),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, VerifyError>;
