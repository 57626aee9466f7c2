//! Route normalization.
//!
//! Navigation config names markdown sources (`/reference/function/powerly.md`)
//! while renderers ask about output URLs (`/reference/function/powerly.html`,
//! or clean `/reference/function/powerly`). [`Route`] reduces all of them to
//! one comparison key so the two sides can be matched.
//!
//! Key invariants:
//! - Always decoded (no percent-encoding), no query string or fragment
//! - Always starts and ends with exactly one `/`
//! - `.md` / `.html` extensions removed
//! - A final `index` or `README` segment collapses to its directory

use std::borrow::Cow;
use std::fmt;
use std::hash::{Hash, Hasher};

use percent_encoding::percent_decode_str;

/// Page file extensions stripped from the last segment.
const PAGE_EXTENSIONS: [&str; 2] = [".md", ".html"];

/// Normalized site route.
///
/// Equality and hashing use [`Route::key`] only, so `/tutorial`,
/// `/tutorial/` and `/tutorial/index.md` are the same route.
#[derive(Clone, Debug)]
pub struct Route {
    /// Decoded path as given, query and fragment removed.
    path: String,
    /// Comparison key (`/reference/function/powerly/`).
    key: String,
    /// Render form (`/reference/function/powerly.html`, `/tutorial/`).
    href: String,
    /// Written as a page file (`.md`/`.html`) rather than a directory.
    names_page: bool,
}

impl Route {
    /// Parse and normalize a site path.
    ///
    /// Never fails: any string yields a route. An empty string is the root.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let without_suffix = raw.trim().split(['?', '#']).next().unwrap_or_default();
        let decoded = percent_decode_str(without_suffix)
            .decode_utf8()
            .map_or_else(|_| Cow::Borrowed(without_suffix), |s| s);

        let path = if decoded.starts_with('/') {
            decoded.into_owned()
        } else {
            format!("/{decoded}")
        };

        let mut segments: Vec<&str> = path.split('/').filter(|s| !s.is_empty()).collect();
        let ends_with_slash = path.ends_with('/');

        let mut page_stem = None;
        if let Some(&last) = segments.last()
            && let Some(stem) = PAGE_EXTENSIONS.iter().find_map(|ext| last.strip_suffix(ext))
        {
            if stem.eq_ignore_ascii_case("index") || stem.eq_ignore_ascii_case("readme") {
                segments.pop();
            } else {
                page_stem = Some(stem);
            }
        }

        let names_page = page_stem.is_some();
        if let Some(stem) = page_stem {
            segments.pop();
            segments.push(stem);
        }

        let joined = segments.join("/");
        let key = if joined.is_empty() {
            "/".to_owned()
        } else {
            format!("/{joined}/")
        };

        let href = if names_page {
            format!("/{joined}.html")
        } else if joined.is_empty()
            || ends_with_slash
            || PAGE_EXTENSIONS.iter().any(|ext| path.ends_with(ext))
        {
            key.clone()
        } else {
            format!("/{joined}")
        };

        Self {
            path,
            key,
            href,
            names_page,
        }
    }

    /// Decoded path as given, without query or fragment.
    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Comparison key, always with a single trailing slash.
    #[must_use]
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Link target for rendered markup.
    #[must_use]
    pub fn href(&self) -> &str {
        &self.href
    }

    /// True for the site root.
    #[must_use]
    pub fn is_root(&self) -> bool {
        self.key == "/"
    }

    /// True when the route was written as a page file rather than a directory.
    ///
    /// `/tutorial/method.md` names a page; `/tutorial/`, `/tutorial` and
    /// `/tutorial/index.md` name a section.
    #[must_use]
    pub fn names_page(&self) -> bool {
        self.names_page
    }

    /// True when `other` lies at or under this route.
    ///
    /// Works on keys, so `/reference/` covers `/reference/function/powerly/`
    /// but not `/referenceX/`.
    #[must_use]
    pub fn covers(&self, other: &Route) -> bool {
        other.key.starts_with(&self.key)
    }

    /// Last path segment of the key, empty for the root.
    #[must_use]
    pub fn slug(&self) -> &str {
        self.key
            .trim_end_matches('/')
            .rsplit('/')
            .next()
            .unwrap_or_default()
    }
}

impl PartialEq for Route {
    fn eq(&self, other: &Self) -> bool {
        self.key == other.key
    }
}

impl Eq for Route {}

impl Hash for Route {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key.hash(state);
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// True for `http://`, `https://`, `mailto:` and protocol-relative links.
#[must_use]
pub fn is_external(link: &str) -> bool {
    link.starts_with("http://")
        || link.starts_with("https://")
        || link.starts_with("mailto:")
        || link.starts_with("//")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_trailing_slash_equivalence() {
        assert_eq!(Route::parse("/tutorial"), Route::parse("/tutorial/"));
        assert_eq!(Route::parse("/tutorial").key(), "/tutorial/");
    }

    #[test]
    fn test_markdown_and_html_share_key() {
        let md = Route::parse("/reference/function/generate-model.md");
        let html = Route::parse("/reference/function/generate-model.html");
        let clean = Route::parse("/reference/function/generate-model");
        assert_eq!(md, html);
        assert_eq!(md, clean);
        assert_eq!(md.key(), "/reference/function/generate-model/");
    }

    #[test]
    fn test_index_collapses_to_directory() {
        assert_eq!(Route::parse("/tutorial/index.md").key(), "/tutorial/");
        assert_eq!(Route::parse("/tutorial/index.html").key(), "/tutorial/");
        assert_eq!(Route::parse("/developer/README.md").key(), "/developer/");
        assert_eq!(Route::parse("/index.md").key(), "/");
    }

    #[test]
    fn test_root_forms() {
        for raw in ["", "/", "//", "/index.html"] {
            let route = Route::parse(raw);
            assert!(route.is_root(), "{raw:?} should be root");
            assert_eq!(route.href(), "/");
        }
    }

    #[test]
    fn test_href_rewrites_markdown() {
        assert_eq!(
            Route::parse("/reference/function/powerly.md").href(),
            "/reference/function/powerly.html"
        );
        assert_eq!(Route::parse("/reference/index.md").href(), "/reference/");
        assert_eq!(Route::parse("/tutorial/").href(), "/tutorial/");
        assert_eq!(Route::parse("/tutorial").href(), "/tutorial");
    }

    #[test]
    fn test_query_and_fragment_stripped() {
        let route = Route::parse("/tutorial/method.html?x=1#step-2");
        assert_eq!(route.key(), "/tutorial/method/");
        assert_eq!(route.path(), "/tutorial/method.html");
    }

    #[test]
    fn test_percent_decoding() {
        assert_eq!(Route::parse("/guide/caf%C3%A9.html").key(), "/guide/café/");
    }

    #[test]
    fn test_invalid_utf8_escape_kept_verbatim() {
        assert_eq!(Route::parse("/guide/%FF.html").key(), "/guide/%FF/");
    }

    #[test]
    fn test_missing_leading_slash_added() {
        assert_eq!(Route::parse("tutorial/method.md").key(), "/tutorial/method/");
    }

    #[test]
    fn test_names_page() {
        assert!(Route::parse("/tutorial/method.md").names_page());
        assert!(!Route::parse("/tutorial/").names_page());
        assert!(!Route::parse("/tutorial").names_page());
        assert!(!Route::parse("/tutorial/index.md").names_page());
    }

    #[test]
    fn test_covers_respects_segment_boundary() {
        let reference = Route::parse("/reference/");
        assert!(reference.covers(&Route::parse("/reference/function/powerly")));
        assert!(reference.covers(&Route::parse("/reference")));
        assert!(!reference.covers(&Route::parse("/referenceX")));
    }

    #[test]
    fn test_slug() {
        assert_eq!(Route::parse("/reference/method/plot-method.md").slug(), "plot-method");
        assert_eq!(Route::parse("/publications/").slug(), "publications");
        assert_eq!(Route::parse("/").slug(), "");
    }

    #[test]
    fn test_is_external() {
        assert!(is_external("https://CRAN.R-project.org/package=powerly"));
        assert!(is_external("http://example.com"));
        assert!(!is_external("/tutorial/"));
        assert!(!is_external("tutorial/method.md"));
    }
}
