use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InvError {
    #[error("Item not found: {0}")]
    ItemNotFound(String),

    #[error("Alias already in use by another item: {0}")]
    AliasTaken(String),

    #[error("Invalid alias (marker followed by letters, digits or _): {0}")]
    InvalidAlias(String),

    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    #[error("Please review the pictures from the last cleaning and remove {0}")]
    GarbagePending(PathBuf),

    #[error("Could not save inventory: {0}")]
    SaveFailed(String),

    #[error("Picture error: {0}")]
    Picture(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),
}

pub type Result<T> = std::result::Result<T, InvError>;
