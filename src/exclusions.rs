use std::path::{Component, Path};

use crate::error::ProvisionError;

const BUILTIN: &str = include_str!("exclusions.list");

/// Group name used for entries that appear before any `[group]` header.
const DEFAULT_GROUP: &str = "default";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionGroup {
    pub name: String,
    pub paths: Vec<String>,
}

/// Ordered, grouped list of runtime-relative paths to delete after extraction.
///
/// The text format is one path per line, `#` comments, blank lines ignored,
/// and `[name]` headers starting a new group. Order carries no meaning beyond
/// readability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExclusionList {
    groups: Vec<ExclusionGroup>,
}

impl ExclusionList {
    pub fn builtin() -> Self {
        Self::parse(BUILTIN).expect("embedded exclusion list is invalid")
    }

    pub fn from_file(path: &Path) -> Result<Self, ProvisionError> {
        let text = std::fs::read_to_string(path).map_err(|e| ProvisionError::fs(path, e))?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, ProvisionError> {
        let mut groups: Vec<ExclusionGroup> = Vec::new();

        for (idx, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if let Some(header) = line.strip_prefix('[') {
                let name = header.strip_suffix(']').map(str::trim).ok_or_else(|| {
                    ProvisionError::ExclusionList(format!("line {}: unterminated group header", idx + 1))
                })?;
                if name.is_empty() {
                    return Err(ProvisionError::ExclusionList(format!(
                        "line {}: empty group name",
                        idx + 1
                    )));
                }
                groups.push(ExclusionGroup {
                    name: name.to_string(),
                    paths: Vec::new(),
                });
                continue;
            }

            validate_entry(line).map_err(|reason| {
                ProvisionError::ExclusionList(format!("line {}: {line:?} {reason}", idx + 1))
            })?;

            if groups.is_empty() {
                groups.push(ExclusionGroup {
                    name: DEFAULT_GROUP.to_string(),
                    paths: Vec::new(),
                });
            }
            if let Some(group) = groups.last_mut() {
                group.paths.push(line.to_string());
            }
        }

        Ok(Self { groups })
    }

    pub fn groups(&self) -> &[ExclusionGroup] {
        &self.groups
    }

    /// All paths across groups, in file order.
    pub fn paths(&self) -> impl Iterator<Item = &str> {
        self.groups
            .iter()
            .flat_map(|g| g.paths.iter().map(String::as_str))
    }

    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.paths.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// Entries must stay inside the runtime directory.
fn validate_entry(entry: &str) -> Result<(), &'static str> {
    let path = Path::new(entry);
    for component in path.components() {
        match component {
            Component::Normal(_) | Component::CurDir => {}
            Component::ParentDir => return Err("must not contain '..'"),
            Component::RootDir | Component::Prefix(_) => return Err("must be relative"),
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_has_three_groups_in_order() {
        let list = ExclusionList::builtin();
        let names: Vec<&str> = list.groups().iter().map(|g| g.name.as_str()).collect();
        assert_eq!(names, ["optional-windows", "javafx-basics", "javafx-windows"]);
    }

    #[test]
    fn builtin_group_sizes() {
        let list = ExclusionList::builtin();
        let sizes: Vec<usize> = list.groups().iter().map(|g| g.paths.len()).collect();
        assert_eq!(sizes, [16, 4, 11]);
        assert_eq!(list.len(), 31);
    }

    #[test]
    fn builtin_combined_order_starts_and_ends_as_expected() {
        let list = ExclusionList::builtin();
        let paths: Vec<&str> = list.paths().collect();
        assert_eq!(paths.first(), Some(&"bin/dtplugin"));
        assert_eq!(paths.last(), Some(&"bin/libxslt.dll"));
        assert!(paths.contains(&"lib/security/javafx.policy"));
    }

    #[test]
    fn parse_skips_comments_and_blank_lines() {
        let list = ExclusionList::parse("# header\n\n[a]\n  x.txt  \n# mid\ny/z\n").unwrap();
        assert_eq!(list.paths().collect::<Vec<_>>(), ["x.txt", "y/z"]);
    }

    #[test]
    fn parse_puts_leading_entries_in_default_group() {
        let list = ExclusionList::parse("lone.txt\n[b]\nother\n").unwrap();
        assert_eq!(list.groups()[0].name, "default");
        assert_eq!(list.groups()[1].name, "b");
    }

    #[test]
    fn parse_rejects_escaping_paths() {
        assert!(ExclusionList::parse("../outside").is_err());
        assert!(ExclusionList::parse("/etc/passwd").is_err());
        assert!(ExclusionList::parse("bin/../../x").is_err());
    }

    #[test]
    fn parse_rejects_bad_headers() {
        assert!(ExclusionList::parse("[open\n").is_err());
        assert!(ExclusionList::parse("[]\n").is_err());
    }

    #[test]
    fn empty_text_is_empty_list() {
        let list = ExclusionList::parse("# nothing\n").unwrap();
        assert!(list.is_empty());
    }

    #[test]
    fn from_file_reads_list() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("custom.list");
        std::fs::write(&file, "[mine]\nbin/a.exe\n").unwrap();
        let list = ExclusionList::from_file(&file).unwrap();
        assert_eq!(list.paths().collect::<Vec<_>>(), ["bin/a.exe"]);
    }

    #[test]
    fn from_file_missing_is_filesystem_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = ExclusionList::from_file(&dir.path().join("nope.list")).unwrap_err();
        assert!(matches!(err, ProvisionError::Filesystem { .. }));
    }
}
