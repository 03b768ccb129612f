use std::path::Path;

use crate::error::ProvisionError;
use crate::exclusions::ExclusionList;

/// Deletes every listed path under `root`, returning how many were removed.
///
/// Strict: a listed path that does not exist aborts with a filesystem error.
pub fn prune(root: &Path, list: &ExclusionList) -> Result<usize, ProvisionError> {
    let mut removed = 0;
    for rel in list.paths() {
        let path = root.join(rel);
        tracing::info!("removing {}", path.display());
        remove_path(&path)?;
        removed += 1;
    }
    Ok(removed)
}

fn remove_path(path: &Path) -> Result<(), ProvisionError> {
    let meta = std::fs::symlink_metadata(path).map_err(|e| ProvisionError::fs(path, e))?;
    let result = if meta.is_dir() {
        std::fs::remove_dir_all(path)
    } else {
        std::fs::remove_file(path)
    };
    result.map_err(|e| ProvisionError::fs(path, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn touch(root: &Path, rel: &str) {
        let path = root.join(rel);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, b"x").unwrap();
    }

    #[test]
    fn removes_files_and_directories() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "bin/glass.dll");
        touch(dir.path(), "bin/dtplugin/deploy.dll");
        touch(dir.path(), "bin/java.exe");
        let list = ExclusionList::parse("[x]\nbin/glass.dll\nbin/dtplugin\n").unwrap();

        let removed = prune(dir.path(), &list).unwrap();

        assert_eq!(removed, 2);
        assert!(!dir.path().join("bin/glass.dll").exists());
        assert!(!dir.path().join("bin/dtplugin").exists());
        assert!(dir.path().join("bin/java.exe").exists());
    }

    #[test]
    fn missing_entry_is_an_error() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "bin/glass.dll");
        let list = ExclusionList::parse("[x]\nbin/glass.dll\nbin/absent.dll\n").unwrap();

        let err = prune(dir.path(), &list).unwrap_err();

        match err {
            ProvisionError::Filesystem { path, source } => {
                assert_eq!(path, dir.path().join("bin/absent.dll"));
                assert_eq!(source.kind(), std::io::ErrorKind::NotFound);
            }
            other => panic!("unexpected error: {other}"),
        }
        // Entries before the failure are already gone.
        assert!(!dir.path().join("bin/glass.dll").exists());
    }

    #[test]
    fn second_prune_fails() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "lib/jfxrt.jar");
        let list = ExclusionList::parse("lib/jfxrt.jar\n").unwrap();

        prune(dir.path(), &list).unwrap();
        assert!(prune(dir.path(), &list).is_err());
    }

    #[test]
    fn empty_list_removes_nothing() {
        let dir = tempdir().unwrap();
        touch(dir.path(), "bin/java.exe");
        let list = ExclusionList::parse("").unwrap();

        assert_eq!(prune(dir.path(), &list).unwrap(), 0);
        assert!(dir.path().join("bin/java.exe").exists());
    }
}
