use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ProvisionError {
    #[error("download failed for {url}: {reason}")]
    Network { url: String, reason: String },

    #[error("download failed for {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    #[error("filesystem error at {}: {source}", path.display())]
    Filesystem {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("extraction failed: {0}")]
    Extraction(String),

    #[error("archive has no top-level folder {expected:?} after extraction")]
    MissingTopLevel { expected: String },

    #[error("invalid exclusion list: {0}")]
    ExclusionList(String),
}

impl ProvisionError {
    pub fn fs(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }
}
