use std::io;
use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConvertError {
    #[error("{}: failed to read file", path.display())]
    Read { path: PathBuf, source: io::Error },
    #[error("{}: invalid JSON file", path.display())]
    InvalidJson { path: PathBuf, source: serde_json::Error },
    #[error("{}: JSON file is not from sysdig-cli-scanner: {detail}", path.display())]
    Schema { path: PathBuf, detail: String },
    #[error("{}: failed to write output", path.display())]
    Write { path: PathBuf, source: io::Error },
    #[error("{message}")]
    Other { message: String },
}
