use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DataError {
    #[error("No listings loaded")]
    NoData,

    #[error("Failed to load {}: {cause:#}", path.display())]
    Load {
        path: PathBuf,
        cause: anyhow::Error,
    },

    #[error("Failed to export to {}: {cause:#}", path.display())]
    Export {
        path: PathBuf,
        cause: anyhow::Error,
    },
}

pub type Result<T> = std::result::Result<T, DataError>;
