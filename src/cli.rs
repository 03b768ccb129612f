use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "jre-provision", about = "Fetch, unpack and trim a bundled Java runtime")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Download, extract and prune the runtime into <dir>/java
    Provision {
        #[command(flatten)]
        release: ReleaseArgs,

        /// Directory holding jre.tgz and java/
        #[arg(long, default_value = ".")]
        dir: PathBuf,

        /// Request timeout for the download, in seconds
        #[arg(long, default_value_t = 300)]
        timeout_secs: u64,

        /// Replace the built-in exclusion list with this file
        #[arg(long)]
        exclusions: Option<PathBuf>,
    },

    /// Print the archive name, folder and URL for a release
    Resolve {
        #[command(flatten)]
        release: ReleaseArgs,
    },

    /// Show what is already present in <dir>
    Status {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },

    /// Remove jre.tgz and java/ from <dir>
    Clean {
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
}

#[derive(Args, Debug, Clone)]
pub struct ReleaseArgs {
    /// Java major version
    #[arg(long, default_value_t = 7)]
    pub java_version: u32,

    /// Update number
    #[arg(long, default_value_t = 60)]
    pub update: u32,

    /// Build number
    #[arg(long, default_value_t = 19)]
    pub build: u32,

    /// Archive platform: windows-i586 or windows-x64
    #[arg(long, default_value = "windows-i586")]
    pub platform: String,

    /// Vendor download base URL
    #[arg(long, default_value = crate::config::DEFAULT_BASE_URL)]
    pub base_url: String,
}
