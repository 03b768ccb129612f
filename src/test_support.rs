//! Helpers shared by the pipeline tests.

use std::path::Path;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use flate2::write::GzEncoder;
use flate2::Compression;

use crate::error::ProvisionError;
use crate::exclusions::ExclusionList;
use crate::jre::download::Fetch;

/// Build a gzipped tarball with every `files` entry placed under `folder/`.
pub fn build_archive(folder: &str, files: &[&str]) -> Vec<u8> {
    let encoder = GzEncoder::new(Vec::new(), Compression::default());
    let mut tar = tar::Builder::new(encoder);

    for rel in files {
        let body = format!("contents of {rel}");
        let mut header = tar::Header::new_gnu();
        header.set_size(body.len() as u64);
        header.set_mode(0o644);
        header.set_cksum();
        tar.append_data(&mut header, format!("{folder}/{rel}"), body.as_bytes())
            .unwrap();
    }

    let encoder = tar.into_inner().unwrap();
    encoder.finish().unwrap()
}

/// Files a trimmed runtime must keep.
pub const KEPT_FILES: &[&str] = &["bin/java.exe", "bin/javaw.exe", "lib/rt.jar", "release"];

/// An archive shaped like the vendor JRE: kept files plus everything the
/// built-in list removes. `bin/dtplugin` and `bin/plugin2` are directories.
pub fn vendor_like_archive(folder: &str) -> Vec<u8> {
    let list = ExclusionList::builtin();
    let mut files: Vec<String> = KEPT_FILES.iter().map(|s| s.to_string()).collect();
    for rel in list.paths() {
        if rel == "bin/dtplugin" || rel == "bin/plugin2" {
            files.push(format!("{rel}/npdeployJava1.dll"));
        } else {
            files.push(rel.to_string());
        }
    }
    let refs: Vec<&str> = files.iter().map(String::as_str).collect();
    build_archive(folder, &refs)
}

/// Serves a fixed body and counts how often it was asked.
pub struct FakeFetcher {
    body: Vec<u8>,
    calls: AtomicUsize,
}

impl FakeFetcher {
    pub fn new(body: Vec<u8>) -> Self {
        Self {
            body,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Fetch for FakeFetcher {
    async fn fetch(&self, _url: &str, dest: &Path) -> Result<u64, ProvisionError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        std::fs::write(dest, &self.body).map_err(|e| ProvisionError::fs(dest, e))?;
        Ok(self.body.len() as u64)
    }
}

/// Always fails the way an unreachable server would.
pub struct UnreachableFetcher;

#[async_trait]
impl Fetch for UnreachableFetcher {
    async fn fetch(&self, url: &str, _dest: &Path) -> Result<u64, ProvisionError> {
        Err(ProvisionError::Network {
            url: url.to_string(),
            reason: "connection refused".into(),
        })
    }
}
