//! Content page titles keyed by route.
//!
//! The content loader supplies one `(path, title)` pair per page. Links in
//! the navigation are checked against this index, and bare sidebar
//! references take their text from it.

use std::collections::HashMap;

use crate::route::Route;

/// Titles of every content page, keyed by normalized route.
#[derive(Clone, Debug, Default)]
pub struct PageIndex {
    titles: HashMap<Route, String>,
}

impl PageIndex {
    /// Create an empty index.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a page. A later insert for the same route replaces the title.
    pub fn insert(&mut self, path: &str, title: impl Into<String>) {
        self.titles.insert(Route::parse(path), title.into());
    }

    /// Title of the page at `route`.
    #[must_use]
    pub fn title(&self, route: &Route) -> Option<&str> {
        self.titles.get(route).map(String::as_str)
    }

    /// Whether a page exists at `route`.
    #[must_use]
    pub fn contains(&self, route: &Route) -> bool {
        self.titles.contains_key(route)
    }

    /// Iterate over all routes in unspecified order.
    pub fn routes(&self) -> impl Iterator<Item = &Route> {
        self.titles.keys()
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.titles.len()
    }

    /// True if no pages are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.titles.is_empty()
    }
}

impl<P: AsRef<str>, T: Into<String>> FromIterator<(P, T)> for PageIndex {
    fn from_iter<I: IntoIterator<Item = (P, T)>>(iter: I) -> Self {
        let mut index = Self::new();
        for (path, title) in iter {
            index.insert(path.as_ref(), title);
        }
        index
    }
}

/// Convert a slug (kebab-case or `snake_case`) to title case.
///
/// Replaces `-` and `_` with spaces, then capitalizes the first letter of each word.
///
/// ```
/// use sitenav_core::titlecase_from_slug;
///
/// assert_eq!(titlecase_from_slug("generate-model"), "Generate Model");
/// assert_eq!(titlecase_from_slug("plot_validation"), "Plot Validation");
/// ```
#[must_use]
pub fn titlecase_from_slug(slug: &str) -> String {
    let mut result = String::with_capacity(slug.len());
    for word in slug.split(['-', '_', ' ']).filter(|w| !w.is_empty()) {
        if !result.is_empty() {
            result.push(' ');
        }
        let mut chars = word.chars();
        if let Some(first) = chars.next() {
            result.extend(first.to_uppercase());
            result.push_str(chars.as_str());
        }
    }
    result
}
