//! Active-state matching.
//!
//! A [`PathMatcher`] decides whether the current route is covered by a
//! navigation entry. Plain targets compare normalized [`Route`] keys, so
//! trailing slashes and `.md`/`.html` spellings never matter. Regex
//! patterns (`activeMatch`) run against the current path as given.
//!
//! Patterns compile when the navigation is loaded; matching itself cannot
//! fail.

use regex::Regex;

use crate::route::Route;

/// How a plain target is compared with the current route.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MatchMode {
    /// Current route equals the target.
    Exact,
    /// Current route lies at or under the target.
    Prefix,
}

/// Compiled active-state rule for one navigation entry.
#[derive(Clone, Debug)]
pub enum PathMatcher {
    /// Current route equals the route.
    Exact(Route),
    /// Current route lies at or under the route.
    Prefix(Route),
    /// Regex finds a match anywhere in the current path.
    Pattern(Regex),
    /// Never active (external links).
    Never,
}

impl PathMatcher {
    /// Build a plain matcher for `target` in the given mode.
    #[must_use]
    pub fn plain(target: Route, mode: MatchMode) -> Self {
        match mode {
            MatchMode::Exact => Self::Exact(target),
            MatchMode::Prefix => Self::Prefix(target),
        }
    }

    /// Compile an `activeMatch` regex.
    ///
    /// # Errors
    ///
    /// Returns the regex error if `pattern` is not a valid regular expression.
    pub fn pattern(pattern: &str) -> Result<Self, regex::Error> {
        Regex::new(pattern).map(Self::Pattern)
    }

    /// Default matcher for an internal link target.
    ///
    /// Section links (`/tutorial/`) stay active across the whole section.
    /// Page links and the site root only match themselves.
    #[must_use]
    pub fn for_link(target: Route) -> Self {
        if target.names_page() || target.is_root() {
            Self::Exact(target)
        } else {
            Self::Prefix(target)
        }
    }

    /// Check the current route against this matcher.
    #[must_use]
    pub fn is_match(&self, current: &Route) -> bool {
        match self {
            Self::Exact(target) => target == current,
            Self::Prefix(target) => target.covers(current),
            Self::Pattern(regex) => regex.is_match(current.path()),
            Self::Never => false,
        }
    }
}

/// Check a current path against a plain pattern string.
///
/// Both sides are normalized first, so `matches("/tutorial", "/tutorial/",
/// MatchMode::Prefix)` holds.
#[must_use]
pub fn matches(current_path: &str, pattern: &str, mode: MatchMode) -> bool {
    PathMatcher::plain(Route::parse(pattern), mode).is_match(&Route::parse(current_path))
}
