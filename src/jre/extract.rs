use std::path::Path;

use crate::config::ProvisionConfig;
use crate::error::ProvisionError;

pub const SCRATCH_PREFIX: &str = ".jre-extract-";

/// Unpacks the archive and moves its `jre1.<v>.0_<u>` folder to the target directory.
///
/// Extraction happens in a scratch directory inside the work directory, so an
/// interrupted unpack never leaves anything under the target name and the
/// scratch directory is removed on every exit path.
pub fn extract_release(config: &ProvisionConfig) -> Result<(), ProvisionError> {
    let archive = config.archive_path();
    let target = config.target_dir();
    let folder = config.release.folder_name();

    // Vendor folder left in the work dir by an interrupted unpack.
    let stale = config.staging_dir();
    if stale.exists() {
        tracing::info!("removing stale {}", stale.display());
        std::fs::remove_dir_all(&stale).map_err(|e| ProvisionError::fs(&stale, e))?;
    }

    let scratch = tempfile::Builder::new()
        .prefix(SCRATCH_PREFIX)
        .tempdir_in(&config.work_dir)
        .map_err(|e| ProvisionError::fs(&config.work_dir, e))?;

    tracing::info!("extracting {}", archive.display());
    extract_tar_gz(&archive, scratch.path())?;

    let extracted = scratch.path().join(&folder);
    if !extracted.is_dir() {
        return Err(ProvisionError::MissingTopLevel { expected: folder });
    }

    let extra = extra_entries(scratch.path(), &folder)?;
    if !extra.is_empty() {
        tracing::warn!(
            "archive has entries outside {folder}, discarding: {}",
            extra.join(", ")
        );
    }

    std::fs::rename(&extracted, &target).map_err(|e| ProvisionError::fs(&target, e))?;
    tracing::info!("renamed {folder} to {}", target.display());

    Ok(())
}

// Top-level names in `dir` other than `folder`, sorted.
fn extra_entries(dir: &Path, folder: &str) -> Result<Vec<String>, ProvisionError> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir).map_err(|e| ProvisionError::fs(dir, e))? {
        let entry = entry.map_err(|e| ProvisionError::fs(dir, e))?;
        let name = entry.file_name().to_string_lossy().to_string();
        if name != folder {
            names.push(name);
        }
    }
    names.sort();
    Ok(names)
}

fn extract_tar_gz(archive: &Path, dest: &Path) -> Result<(), ProvisionError> {
    let file = std::fs::File::open(archive).map_err(|e| ProvisionError::fs(archive, e))?;
    let decoder = flate2::read::GzDecoder::new(file);
    let mut tar = tar::Archive::new(decoder);
    tar.unpack(dest)
        .map_err(|e| ProvisionError::Extraction(format!("{}: {e}", archive.display())))
}
