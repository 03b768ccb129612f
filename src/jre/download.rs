use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use futures_util::StreamExt;
use indicatif::{ProgressBar, ProgressStyle};
use reqwest::header::COOKIE;
use reqwest::Client;
use tokio::io::AsyncWriteExt;

use crate::config::{ProvisionConfig, CONSENT_COOKIE};
use crate::error::ProvisionError;

pub const PARTIAL_PREFIX: &str = ".jre-download-";
pub const PARTIAL_SUFFIX: &str = ".part";

/// Transfers the body at `url` into the file at `dest`, returning bytes written.
#[async_trait]
pub trait Fetch: Send + Sync {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, ProvisionError>;
}

/// Vendor download client. Every request carries the license consent cookie.
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    pub fn new(timeout: Duration) -> Result<Self, ProvisionError> {
        let client = Client::builder()
            .user_agent(concat!("jre-provision/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()
            .map_err(|e| ProvisionError::Network {
                url: String::new(),
                reason: format!("cannot build HTTP client: {e}"),
            })?;
        Ok(Self { client })
    }
}

#[async_trait]
impl Fetch for HttpFetcher {
    async fn fetch(&self, url: &str, dest: &Path) -> Result<u64, ProvisionError> {
        let network = |e: reqwest::Error| ProvisionError::Network {
            url: url.to_string(),
            reason: e.to_string(),
        };

        let response = self
            .client
            .get(url)
            .header(COOKIE, CONSENT_COOKIE)
            .send()
            .await
            .map_err(network)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ProvisionError::HttpStatus {
                url: url.to_string(),
                status: status.as_u16(),
            });
        }

        let pb = progress_bar(response.content_length());

        let mut file = tokio::fs::File::create(dest)
            .await
            .map_err(|e| ProvisionError::fs(dest, e))?;
        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk.map_err(network)?;
            file.write_all(&chunk)
                .await
                .map_err(|e| ProvisionError::fs(dest, e))?;
            written += chunk.len() as u64;
            pb.inc(chunk.len() as u64);
        }
        file.flush().await.map_err(|e| ProvisionError::fs(dest, e))?;
        drop(file);

        pb.finish_with_message("Download complete");
        Ok(written)
    }
}

fn progress_bar(total: Option<u64>) -> ProgressBar {
    let pb = match total {
        Some(len) => {
            let pb = ProgressBar::new(len);
            if let Ok(style) = ProgressStyle::default_bar()
                .template("{msg} [{bar:40.cyan/blue}] {bytes}/{total_bytes} ({eta})")
            {
                pb.set_style(style.progress_chars("=> "));
            }
            pb
        }
        None => ProgressBar::new_spinner(),
    };
    pb.set_message("Downloading JRE");
    pb
}

/// Makes sure the archive exists, downloading it when absent.
///
/// An existing archive is trusted as-is; nothing checks its contents. The
/// body goes to a temporary file beside the archive and is renamed into
/// place only after the transfer completes. Returns `true` when a download
/// happened.
pub async fn ensure_archive(
    config: &ProvisionConfig,
    fetcher: &dyn Fetch,
) -> Result<bool, ProvisionError> {
    let archive = config.archive_path();
    if archive.exists() {
        tracing::info!("archive {} already present, skipping download", archive.display());
        return Ok(false);
    }

    let url = config.download_url();
    tracing::info!("downloading {}", config.release.file_name());
    tracing::debug!("GET {url}");

    let partial = tempfile::Builder::new()
        .prefix(PARTIAL_PREFIX)
        .suffix(PARTIAL_SUFFIX)
        .tempfile_in(&config.work_dir)
        .map_err(|e| ProvisionError::fs(&config.work_dir, e))?
        .into_temp_path();

    let bytes = fetcher.fetch(&url, &partial).await?;

    partial
        .persist(&archive)
        .map_err(|e| ProvisionError::fs(&archive, e.error))?;

    tracing::info!("saved {bytes} bytes to {}", archive.display());
    Ok(true)
}
