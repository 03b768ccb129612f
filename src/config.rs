use std::path::PathBuf;
use std::time::Duration;

use crate::exclusions::ExclusionList;

pub const DEFAULT_BASE_URL: &str = "http://download.oracle.com/otn-pub/java/jdk";

/// License-acceptance token the vendor server requires on every download.
pub const CONSENT_COOKIE: &str =
    "gpw_e24=http%3A%2F%2Fwww.oracle.com%2F; oraclelicense=accept-securebackup-cookie";

pub const ARCHIVE_NAME: &str = "jre.tgz";
pub const TARGET_DIR_NAME: &str = "java";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    WindowsI586,
    WindowsX64,
}

impl Platform {
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "windows-i586" => Some(Self::WindowsI586),
            "windows-x64" => Some(Self::WindowsX64),
            _ => None,
        }
    }

    pub fn archive_suffix(&self) -> &'static str {
        match self {
            Self::WindowsI586 => "windows-i586",
            Self::WindowsX64 => "windows-x64",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Release {
    pub version: u32,
    pub update: u32,
    pub build: u32,
    pub platform: Platform,
}

impl Default for Release {
    fn default() -> Self {
        Self {
            version: 7,
            update: 60,
            build: 19,
            platform: Platform::WindowsI586,
        }
    }
}

impl Release {
    /// e.g. `jre-7u60-windows-i586.tar.gz`
    pub fn file_name(&self) -> String {
        format!(
            "jre-{}u{}-{}.tar.gz",
            self.version,
            self.update,
            self.platform.archive_suffix()
        )
    }

    /// Top-level folder inside the vendor archive, e.g. `jre1.7.0_60`.
    pub fn folder_name(&self) -> String {
        format!("jre1.{}.0_{}", self.version, self.update)
    }

    pub fn path_segment(&self) -> String {
        format!("{}u{}-b{}", self.version, self.update, self.build)
    }

    pub fn download_url(&self, base: &str) -> String {
        format!(
            "{}/{}/{}",
            base.trim_end_matches('/'),
            self.path_segment(),
            self.file_name()
        )
    }
}

#[derive(Debug, Clone)]
pub struct ProvisionConfig {
    pub work_dir: PathBuf,
    pub release: Release,
    pub base_url: String,
    pub timeout: Duration,
    pub exclusions: ExclusionList,
}

impl ProvisionConfig {
    pub fn new(work_dir: impl Into<PathBuf>) -> Self {
        Self {
            work_dir: work_dir.into(),
            release: Release::default(),
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(300),
            exclusions: ExclusionList::builtin(),
        }
    }

    pub fn archive_path(&self) -> PathBuf {
        self.work_dir.join(ARCHIVE_NAME)
    }

    pub fn target_dir(&self) -> PathBuf {
        self.work_dir.join(TARGET_DIR_NAME)
    }

    pub fn staging_dir(&self) -> PathBuf {
        self.work_dir.join(self.release.folder_name())
    }

    pub fn download_url(&self) -> String {
        self.release.download_url(&self.base_url)
    }
}
