//! Page title extraction.
//!
//! Title priority: front-matter `title`, then the first `# H1` heading,
//! then the file stem converted to title case.

use std::path::Path;

use regex::Regex;
use serde::Deserialize;
use sitenav_core::titlecase_from_slug;

/// The only front-matter key sitenav reads.
#[derive(Debug, Default, Deserialize)]
struct FrontMatter {
    #[serde(default)]
    title: Option<String>,
}

/// Extracts titles from markdown sources.
pub(crate) struct TitleExtractor {
    h1_regex: Regex,
}

impl TitleExtractor {
    pub(crate) fn new() -> Self {
        Self {
            h1_regex: Regex::new(r"(?m)^#\s+(.+)$").expect("H1 pattern is valid"),
        }
    }

    /// Title for a markdown file with the given content.
    pub(crate) fn extract(&self, file_path: &Path, content: &str) -> String {
        let (front_matter, body) = split_front_matter(content);

        front_matter
            .and_then(|yaml| front_matter_title(file_path, yaml))
            .or_else(|| self.first_heading(body))
            .unwrap_or_else(|| derive_title_from_filename(file_path))
    }

    fn first_heading(&self, body: &str) -> Option<String> {
        let caps = self.h1_regex.captures(body)?;
        let title = caps[1].trim();
        (!title.is_empty()).then(|| title.to_owned())
    }
}

/// Split `---`-delimited YAML front matter from the markdown body.
///
/// Returns `(None, content)` when the file has no (or unterminated) front matter.
fn split_front_matter(content: &str) -> (Option<&str>, &str) {
    let Some(rest) = content
        .strip_prefix("---\n")
        .or_else(|| content.strip_prefix("---\r\n"))
    else {
        return (None, content);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end() == "---" {
            return (Some(&rest[..offset]), &rest[offset + line.len()..]);
        }
        offset += line.len();
    }

    (None, content)
}

fn front_matter_title(file_path: &Path, yaml: &str) -> Option<String> {
    if yaml.trim().is_empty() {
        return None;
    }
    match serde_yaml::from_str::<FrontMatter>(yaml) {
        Ok(fm) => fm
            .title
            .map(|t| t.trim().to_owned())
            .filter(|t| !t.is_empty()),
        Err(e) => {
            tracing::warn!(path = %file_path.display(), error = %e, "Failed to parse front matter");
            None
        }
    }
}

/// Generate title from a file path's filename.
///
/// `index.md` and `README.md` take the name of their directory.
fn derive_title_from_filename(file_path: &Path) -> String {
    let stem = file_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let slug = if stem == "index" || stem == "readme" {
        file_path
            .parent()
            .and_then(Path::file_name)
            .map(|s| s.to_string_lossy().to_lowercase())
            .unwrap_or_default()
    } else {
        stem
    };

    match titlecase_from_slug(&slug) {
        t if t.is_empty() => "Home".to_owned(),
        t => t,
    }
}
