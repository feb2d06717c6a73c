use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::site::SiteConfig;

/// Discovers markdown pages under the docs source directory.
pub struct PageScanner {
    source_dir: PathBuf,
}

impl PageScanner {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            source_dir: path.as_ref().to_path_buf(),
        }
    }

    /// All markdown files under the source dir, as source-relative paths.
    pub fn markdown_pages(&self) -> Vec<PathBuf> {
        let mut pages: Vec<PathBuf> = Vec::new();

        for entry in WalkDir::new(&self.source_dir)
            .into_iter()
            .filter_map(|e| e.ok())
            .filter(|e| {
                e.path().is_file() && e.path().extension().map(|ext| ext == "md").unwrap_or(false)
            })
        {
            if let Ok(relative) = entry.path().strip_prefix(&self.source_dir) {
                pages.push(relative.to_path_buf());
            }
        }

        pages.sort();
        pages
    }
}

/// Pages not reachable from any sidebar group.
///
/// The root README.md/index.md is the home page by convention and is never
/// reported. This is a lint for `docpress check`, not a validation failure.
pub fn orphan_pages(config: &SiteConfig, pages: &[PathBuf]) -> Vec<PathBuf> {
    let mut referenced: BTreeSet<PathBuf> = BTreeSet::new();
    referenced.insert(PathBuf::from("README.md"));
    referenced.insert(PathBuf::from("index.md"));

    for (key, groups) in &config.theme.sidebar {
        let section = Path::new(key.trim_start_matches('/'));
        for group in groups {
            for child in &group.children {
                if child.is_empty() {
                    referenced.insert(section.join("README.md"));
                    referenced.insert(section.join("index.md"));
                } else {
                    referenced.insert(section.join(format!("{}.md", child)));
                }
            }
        }
    }

    pages
        .iter()
        .filter(|p| !referenced.contains(*p))
        .cloned()
        .collect()
}
