//! Content page discovery for sitenav.
//!
//! Walks a documentation source directory and produces one [`ContentPage`]
//! per markdown file: its site path (`/tutorial/method.md`) and its title.
//! These `(path, title)` pairs are what the navigation model checks links
//! against and what bare sidebar references take their text from.
//!
//! Hidden entries (such as `.vuepress/`) and anything matched by
//! `.gitignore` are skipped.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//!
//! let pages = sitenav_content::scan_pages(Path::new("docs"))?;
//! for page in &pages {
//!     println!("{} -> {}", page.path, page.title);
//! }
//! # Ok::<(), sitenav_content::ScanError>(())
//! ```

mod title;

use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use rayon::prelude::*;

use title::TitleExtractor;

/// A markdown page found in the source directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContentPage {
    /// Site path of the source file, with leading slash and `/` separators
    /// (e.g., `/reference/function/powerly.md`).
    pub path: String,
    /// Page title.
    pub title: String,
    /// Absolute path of the source file.
    pub source: PathBuf,
}

/// Error returned when scanning fails.
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// Source directory does not exist.
    #[error("Source directory not found: {}", .0.display())]
    SourceNotFound(PathBuf),
    /// A markdown file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        /// File that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

/// Scan `source_dir` for markdown pages.
///
/// Pages are returned sorted by path so repeated scans are stable.
///
/// # Errors
///
/// Returns [`ScanError::SourceNotFound`] if the directory is missing and
/// [`ScanError::Read`] if a markdown file cannot be read.
pub fn scan_pages(source_dir: &Path) -> Result<Vec<ContentPage>, ScanError> {
    if !source_dir.is_dir() {
        return Err(ScanError::SourceNotFound(source_dir.to_path_buf()));
    }

    let files: Vec<PathBuf> = WalkBuilder::new(source_dir)
        .follow_links(true)
        .hidden(true)
        .git_ignore(true)
        .git_exclude(true)
        .build()
        .filter_map(|entry| {
            entry
                .inspect_err(|e| tracing::warn!(error = %e, "Skipping unreadable entry"))
                .ok()
        })
        .filter(|entry| entry.file_type().is_some_and(|t| t.is_file()))
        .map(ignore::DirEntry::into_path)
        .filter(|path| path.extension().is_some_and(|e| e == "md"))
        .collect();

    let extractor = TitleExtractor::new();
    let mut pages = files
        .par_iter()
        .map(|file| {
            let content = std::fs::read_to_string(file).map_err(|source| ScanError::Read {
                path: file.clone(),
                source,
            })?;
            let rel = file.strip_prefix(source_dir).unwrap_or(file);
            Ok(ContentPage {
                path: site_path(rel),
                title: extractor.extract(rel, &content),
                source: file.clone(),
            })
        })
        .collect::<Result<Vec<_>, ScanError>>()?;

    pages.sort_by(|a, b| a.path.cmp(&b.path));
    tracing::debug!(page_count = pages.len(), source_dir = %source_dir.display(), "Content scan completed");

    Ok(pages)
}

/// Convert a path relative to the source directory into a site path.
///
/// - `index.md` -> `/index.md`
/// - `reference\function\powerly.md` -> `/reference/function/powerly.md`
fn site_path(rel_path: &Path) -> String {
    let mut path = String::new();
    for component in rel_path.components() {
        path.push('/');
        path.push_str(&component.as_os_str().to_string_lossy());
    }
    path
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    fn write(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn paths_and_titles(pages: &[ContentPage]) -> Vec<(&str, &str)> {
        pages
            .iter()
            .map(|p| (p.path.as_str(), p.title.as_str()))
            .collect()
    }

    #[test]
    fn test_scan_missing_dir_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = scan_pages(&dir.path().join("docs")).unwrap_err();
        assert!(matches!(err, ScanError::SourceNotFound(_)));
    }

    #[test]
    fn test_scan_empty_dir_returns_nothing() {
        let dir = tempfile::tempdir().unwrap();
        assert!(scan_pages(dir.path()).unwrap().is_empty());
    }

    #[test]
    fn test_scan_nested_structure_sorted() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "index.md", "# powerly\n");
        write(dir.path(), "tutorial/method.md", "---\ntitle: Method\n---\n");
        write(dir.path(), "tutorial/index.md", "# Tutorials\n");
        write(dir.path(), "reference/function/powerly.md", "");

        let pages = scan_pages(dir.path()).unwrap();

        assert_eq!(
            paths_and_titles(&pages),
            vec![
                ("/index.md", "powerly"),
                ("/reference/function/powerly.md", "Powerly"),
                ("/tutorial/index.md", "Tutorials"),
                ("/tutorial/method.md", "Method"),
            ]
        );
    }

    #[test]
    fn test_scan_skips_hidden_and_non_markdown() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), ".vuepress/notes.md", "# Hidden\n");
        write(dir.path(), "images/logo.png", "");
        write(dir.path(), "developer/index.md", "# Developer\n");

        let pages = scan_pages(dir.path()).unwrap();

        assert_eq!(
            paths_and_titles(&pages),
            vec![("/developer/index.md", "Developer")]
        );
    }

    #[test]
    fn test_scan_records_source_path() {
        let dir = tempfile::tempdir().unwrap();
        write(dir.path(), "publication/index.md", "# Publications\n");

        let pages = scan_pages(dir.path()).unwrap();

        assert_eq!(pages[0].source, dir.path().join("publication/index.md"));
    }

    #[test]
    fn test_site_path_uses_forward_slashes() {
        let rel: PathBuf = ["reference", "method", "summary.md"].iter().collect();
        assert_eq!(site_path(&rel), "/reference/method/summary.md");
    }
}
