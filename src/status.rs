use std::path::Path;

use sha2::{Digest, Sha256};

use crate::config::ProvisionConfig;
use crate::error::ProvisionError;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveStatus {
    pub size: u64,
    pub sha256: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Status {
    pub archive: Option<ArchiveStatus>,
    /// Total bytes under `java/`, if it exists.
    pub runtime_size: Option<u64>,
}

pub fn collect(config: &ProvisionConfig) -> Result<Status, ProvisionError> {
    let archive_path = config.archive_path();
    let archive = if archive_path.is_file() {
        let size = std::fs::metadata(&archive_path)
            .map_err(|e| ProvisionError::fs(&archive_path, e))?
            .len();
        Some(ArchiveStatus {
            size,
            sha256: hash_file(&archive_path)?,
        })
    } else {
        None
    };

    let target = config.target_dir();
    let runtime_size = target.is_dir().then(|| dir_size(&target));

    Ok(Status {
        archive,
        runtime_size,
    })
}

pub fn hash_file(path: &Path) -> Result<String, ProvisionError> {
    let mut file = std::fs::File::open(path).map_err(|e| ProvisionError::fs(path, e))?;
    let mut hasher = Sha256::new();
    std::io::copy(&mut file, &mut hasher).map_err(|e| ProvisionError::fs(path, e))?;
    Ok(format!("{:x}", hasher.finalize()))
}

pub fn dir_size(path: &Path) -> u64 {
    let mut size = 0;
    if let Ok(entries) = std::fs::read_dir(path) {
        for entry in entries.flatten() {
            let p = entry.path();
            if p.is_dir() {
                size += dir_size(&p);
            } else if let Ok(meta) = p.metadata() {
                size += meta.len();
            }
        }
    }
    size
}
