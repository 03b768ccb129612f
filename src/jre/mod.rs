pub mod download;
pub mod extract;
pub mod prune;

use std::path::{Path, PathBuf};

use crate::config::ProvisionConfig;
use crate::error::ProvisionError;

use download::Fetch;

/// Which steps a run actually performed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProvisionReport {
    pub target: PathBuf,
    pub downloaded: bool,
    pub extracted: bool,
    pub pruned: usize,
}

/// Download, extract and prune, each step skipped when its output already exists.
///
/// An existing `java/` counts as fully provisioned: extraction and pruning are
/// both skipped without looking inside it. A fresh download discards any
/// `java/` left from before, so the new archive is always what gets unpacked.
pub async fn ensure_jre(
    config: &ProvisionConfig,
    fetcher: &dyn Fetch,
) -> Result<ProvisionReport, ProvisionError> {
    std::fs::create_dir_all(&config.work_dir)
        .map_err(|e| ProvisionError::fs(&config.work_dir, e))?;
    sweep_scratch(&config.work_dir)?;

    let target = config.target_dir();
    let downloaded = download::ensure_archive(config, fetcher).await?;

    if downloaded && target.exists() {
        tracing::info!("removing old {}", target.display());
        std::fs::remove_dir_all(&target).map_err(|e| ProvisionError::fs(&target, e))?;
    }

    if target.exists() {
        tracing::info!(
            "using existing runtime at {}, skipping extraction",
            target.display()
        );
        return Ok(ProvisionReport {
            target,
            downloaded,
            extracted: false,
            pruned: 0,
        });
    }

    extract::extract_release(config)?;
    let pruned = prune::prune(&target, &config.exclusions)?;
    tracing::info!("removed {pruned} excluded paths");

    Ok(ProvisionReport {
        target,
        downloaded,
        extracted: true,
        pruned,
    })
}

/// Removes download and extraction scratch left by runs that were killed
/// before their temporaries could be dropped.
fn sweep_scratch(work_dir: &Path) -> Result<(), ProvisionError> {
    let entries = std::fs::read_dir(work_dir).map_err(|e| ProvisionError::fs(work_dir, e))?;
    for entry in entries {
        let entry = entry.map_err(|e| ProvisionError::fs(work_dir, e))?;
        let name = entry.file_name();
        let name = name.to_string_lossy();
        let path = entry.path();

        let is_partial =
            name.starts_with(download::PARTIAL_PREFIX) && name.ends_with(download::PARTIAL_SUFFIX);
        let is_scratch = name.starts_with(extract::SCRATCH_PREFIX);
        if !is_partial && !is_scratch {
            continue;
        }

        tracing::info!("removing leftover {}", path.display());
        let result = if path.is_dir() {
            std::fs::remove_dir_all(&path)
        } else {
            std::fs::remove_file(&path)
        };
        result.map_err(|e| ProvisionError::fs(&path, e))?;
    }
    Ok(())
}
