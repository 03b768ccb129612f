mod cli;
mod config;
mod error;
mod exclusions;
mod jre;
mod status;
#[cfg(test)]
mod test_support;

use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use indicatif::HumanBytes;

use cli::{Cli, Command, ReleaseArgs};
use config::{Platform, ProvisionConfig, Release};
use exclusions::ExclusionList;
use jre::download::HttpFetcher;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("jre_provision=info")),
        )
        .with_target(false)
        .without_time()
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Provision {
            release,
            dir,
            timeout_secs,
            exclusions,
        } => {
            let mut config = ProvisionConfig::new(dir);
            config.release = release_from_args(&release)?;
            config.base_url = release.base_url.clone();
            config.timeout = Duration::from_secs(timeout_secs);
            if let Some(path) = exclusions {
                config.exclusions = ExclusionList::from_file(&path)
                    .with_context(|| format!("loading exclusion list {}", path.display()))?;
            }

            run_provision(config).await?;
        }
        Command::Resolve { release } => {
            run_resolve(&release)?;
        }
        Command::Status { dir } => {
            run_status(&ProvisionConfig::new(dir))?;
        }
        Command::Clean { dir } => {
            run_clean(&ProvisionConfig::new(dir))?;
        }
    }

    Ok(())
}

fn release_from_args(args: &ReleaseArgs) -> Result<Release> {
    let platform = Platform::from_str(&args.platform).context(format!(
        "invalid platform: {}. Use: windows-i586, windows-x64",
        args.platform
    ))?;
    Ok(Release {
        version: args.java_version,
        update: args.update,
        build: args.build,
        platform,
    })
}

async fn run_provision(config: ProvisionConfig) -> Result<()> {
    if config.exclusions.is_empty() {
        tracing::warn!("exclusion list is empty, nothing will be pruned");
    }

    let fetcher = HttpFetcher::new(config.timeout)?;
    let report = jre::ensure_jre(&config, &fetcher)
        .await
        .with_context(|| format!("provisioning runtime in {}", config.work_dir.display()))?;

    let size = status::dir_size(&report.target);
    eprintln!("\n  Runtime:    {}", report.target.display());
    eprintln!("  Size:       {}", HumanBytes(size));
    eprintln!("  Downloaded: {}", yes_no(report.downloaded));
    eprintln!("  Extracted:  {}", yes_no(report.extracted));
    eprintln!("  Pruned:     {} paths\n", report.pruned);

    Ok(())
}

fn run_resolve(args: &ReleaseArgs) -> Result<()> {
    let release = release_from_args(args)?;
    println!("file:   {}", release.file_name());
    println!("folder: {}", release.folder_name());
    println!("url:    {}", release.download_url(&args.base_url));

    let list = ExclusionList::builtin();
    println!("exclusions: {} paths", list.len());
    for group in list.groups() {
        println!("  [{}] {}", group.name, group.paths.len());
    }
    Ok(())
}

fn run_status(config: &ProvisionConfig) -> Result<()> {
    let status = status::collect(config).context("reading provisioning state")?;

    match &status.archive {
        Some(archive) => {
            eprintln!("Archive: {} ({})", config.archive_path().display(), HumanBytes(archive.size));
            eprintln!("SHA-256: {}", archive.sha256);
        }
        None => eprintln!("Archive: not downloaded"),
    }

    match status.runtime_size {
        Some(size) => eprintln!("Runtime: {} ({})", config.target_dir().display(), HumanBytes(size)),
        None => eprintln!("Runtime: not extracted"),
    }
    Ok(())
}

fn run_clean(config: &ProvisionConfig) -> Result<()> {
    let mut freed = 0;
    let mut removed = false;

    let archive = config.archive_path();
    if archive.is_file() {
        freed += std::fs::metadata(&archive)?.len();
        std::fs::remove_file(&archive)
            .with_context(|| format!("removing {}", archive.display()))?;
        removed = true;
    }

    let target = config.target_dir();
    if target.is_dir() {
        freed += status::dir_size(&target);
        std::fs::remove_dir_all(&target)
            .with_context(|| format!("removing {}", target.display()))?;
        removed = true;
    }

    if !removed {
        eprintln!("Nothing to clean");
    } else {
        eprintln!("Cleaned {}", HumanBytes(freed));
    }
    Ok(())
}

fn yes_no(flag: bool) -> &'static str {
    if flag {
        "yes"
    } else {
        "skipped"
    }
}
