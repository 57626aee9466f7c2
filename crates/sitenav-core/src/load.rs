//! Building the navigation model from configuration.
//!
//! [`NavigationBuilder`] turns raw `sitenav.toml` declarations into the
//! typed [`Navbar`] and [`SidebarMap`], checking every entry on the way:
//!
//! - tree shape (empty text, groups without children, link and children on
//!   the same navbar entry, bad sidebar keys)
//! - `activeMatch` patterns compile
//! - internal links point at existing pages (when a [`PageIndex`] is given)
//!
//! All problems are collected before failing so an author sees them at once.
//! Links to missing pages are fatal under [`Strictness::Deny`] and warnings
//! under [`Strictness::Warn`]. Duplicate internal links within the navbar or
//! within one sidebar section are always warnings.

use std::collections::HashMap;

use sitenav_config::{Config, NavbarItemConfig, SidebarEntryConfig, SidebarMapConfig};

use crate::error::{LoadError, LoadWarning, NavigationError};
use crate::matcher::PathMatcher;
use crate::navbar::{LinkTarget, NavGroup, NavLink, NavNode, Navbar};
use crate::pages::{PageIndex, titlecase_from_slug};
use crate::route::{Route, is_external};
use crate::sidebar::{SidebarEntry, SidebarGroup, SidebarMap, SidebarPage, SidebarSection};
use crate::{SiteBase, SiteNavigation};

/// Policy for links to pages that do not exist.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Strictness {
    /// Missing pages fail the load.
    #[default]
    Deny,
    /// Missing pages are reported as warnings.
    Warn,
}

impl Strictness {
    /// Map the `navigation.strict` config flag.
    #[must_use]
    pub fn from_strict(strict: bool) -> Self {
        if strict { Self::Deny } else { Self::Warn }
    }
}

/// Successfully loaded navigation plus non-fatal findings.
#[derive(Debug)]
pub struct LoadedNavigation {
    /// The validated navigation.
    pub navigation: SiteNavigation,
    /// Lint findings and, under [`Strictness::Warn`], missing pages.
    pub warnings: Vec<LoadWarning>,
}

/// Builds a [`SiteNavigation`] from configuration.
pub struct NavigationBuilder<'a> {
    navbar: &'a [NavbarItemConfig],
    sidebar: &'a SidebarMapConfig,
    base: SiteBase,
    pages: Option<&'a PageIndex>,
    strictness: Strictness,
    repo: Option<NavLink>,
}

impl<'a> NavigationBuilder<'a> {
    /// Builder over raw declarations, root base, strict, no page checks.
    #[must_use]
    pub fn new(navbar: &'a [NavbarItemConfig], sidebar: &'a SidebarMapConfig) -> Self {
        Self {
            navbar,
            sidebar,
            base: SiteBase::root(),
            pages: None,
            strictness: Strictness::Deny,
            repo: None,
        }
    }

    /// Builder taking menus, base and strictness from a loaded [`Config`].
    #[must_use]
    pub fn from_config(config: &'a Config) -> Self {
        let builder = Self::new(&config.navbar, &config.sidebar)
            .base(SiteBase::new(&config.site.base))
            .strictness(Strictness::from_strict(config.navigation.strict));
        match &config.site.repo {
            Some(repo) => builder.repo(repo, config.site.repo_label.as_deref()),
            None => builder,
        }
    }

    /// Set the public base path.
    #[must_use]
    pub fn base(mut self, base: SiteBase) -> Self {
        self.base = base;
        self
    }

    /// Check links against, and take titles from, these pages.
    ///
    /// Without a page index no link is reported as missing and bare sidebar
    /// references get a title derived from their slug.
    #[must_use]
    pub fn pages(mut self, pages: &'a PageIndex) -> Self {
        self.pages = Some(pages);
        self
    }

    /// Append a source repository link after the configured navbar.
    ///
    /// `repo` is a URL or a GitHub `owner/name`. Without a `label`, one is
    /// derived from the host (`GitHub`, `GitLab`, `Gitee`, `Bitbucket`, or
    /// `Source`). The link is never active.
    #[must_use]
    pub fn repo(mut self, repo: &str, label: Option<&str>) -> Self {
        self.repo = Some(repo_link(repo, label));
        self
    }

    /// Set the policy for links to missing pages.
    #[must_use]
    pub fn strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Validate the declarations and build the navigation.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] listing every fatal problem found.
    pub fn build(self) -> Result<LoadedNavigation, LoadError> {
        let mut loader = Loader {
            pages: self.pages,
            strictness: self.strictness,
            problems: Vec::new(),
            warnings: Vec::new(),
            seen: HashMap::new(),
        };

        let mut items: Vec<NavNode> = self
            .navbar
            .iter()
            .enumerate()
            .filter_map(|(i, item)| loader.navbar_node(item, &format!("navbar[{i}]")))
            .collect();
        items.extend(self.repo.map(NavNode::Link));
        let navbar = Navbar::new(items);

        let sidebar = loader.sidebar_map(self.sidebar);

        if !loader.problems.is_empty() {
            return Err(LoadError {
                problems: loader.problems,
                warnings: loader.warnings,
            });
        }

        for warning in &loader.warnings {
            tracing::warn!(location = %warning.location, "{}", warning.message);
        }
        tracing::info!(
            navbar_items = navbar.items().len(),
            sidebar_sections = sidebar.sections().len(),
            warnings = loader.warnings.len(),
            "Navigation loaded"
        );

        Ok(LoadedNavigation {
            navigation: SiteNavigation::new(navbar, sidebar, self.base),
            warnings: loader.warnings,
        })
    }
}

fn repo_link(repo: &str, label: Option<&str>) -> NavLink {
    let repo = repo.trim();
    let url = if is_external(repo) {
        repo.to_owned()
    } else {
        format!("https://github.com/{}", repo.trim_matches('/'))
    };
    let label = label.map_or_else(|| repo_host_label(&url).to_owned(), str::to_owned);
    NavLink::external(label, url)
}

fn repo_host_label(url: &str) -> &'static str {
    let url = url.to_ascii_lowercase();
    [
        ("github.com", "GitHub"),
        ("gitlab.com", "GitLab"),
        ("gitee.com", "Gitee"),
        ("bitbucket.org", "Bitbucket"),
    ]
    .into_iter()
    .find_map(|(host, label)| url.contains(host).then_some(label))
    .unwrap_or("Source")
}

/// Accumulates problems while converting declarations.
struct Loader<'a> {
    pages: Option<&'a PageIndex>,
    strictness: Strictness,
    problems: Vec<NavigationError>,
    warnings: Vec<LoadWarning>,
    /// Internal link keys seen in the current scope, with first location.
    seen: HashMap<String, String>,
}

impl Loader<'_> {
    fn shape(&mut self, location: &str, message: impl Into<String>) {
        self.problems.push(NavigationError::ConfigShape {
            location: location.to_owned(),
            message: message.into(),
        });
    }

    fn warn(&mut self, location: &str, message: impl Into<String>) {
        self.warnings.push(LoadWarning {
            location: location.to_owned(),
            message: message.into(),
        });
    }

    fn require_text(&mut self, location: &str, text: &str) {
        if text.trim().is_empty() {
            self.shape(location, "entry text cannot be empty");
        }
    }

    /// Parse a link, checking that internal targets exist and are unique.
    fn link_target(&mut self, location: &str, link: &str) -> Option<LinkTarget> {
        let link = link.trim();
        if link.is_empty() {
            self.shape(location, "link cannot be empty");
            return None;
        }
        if is_external(link) {
            return Some(LinkTarget::External(link.to_owned()));
        }

        let route = Route::parse(link);
        self.check_exists(location, &route, link);
        self.check_unique(location, &route, link);
        Some(LinkTarget::Internal(route))
    }

    fn check_exists(&mut self, location: &str, route: &Route, written: &str) {
        let Some(pages) = self.pages else {
            return;
        };
        if pages.contains(route) {
            return;
        }
        let err = NavigationError::DanglingReference {
            location: location.to_owned(),
            target: written.to_owned(),
        };
        match self.strictness {
            Strictness::Deny => self.problems.push(err),
            Strictness::Warn => self.warnings.push(LoadWarning::from(&err)),
        }
    }

    fn check_unique(&mut self, location: &str, route: &Route, written: &str) {
        if let Some(first) = self.seen.get(route.key()) {
            let message = format!("duplicate link to {written} (first at {first})");
            self.warn(location, message);
        } else {
            self.seen
                .insert(route.key().to_owned(), location.to_owned());
        }
    }

    fn compile(&mut self, location: &str, pattern: &str) -> Option<PathMatcher> {
        match PathMatcher::pattern(pattern) {
            Ok(matcher) => Some(matcher),
            Err(source) => {
                self.problems.push(NavigationError::PatternCompile {
                    location: location.to_owned(),
                    pattern: pattern.to_owned(),
                    source,
                });
                None
            }
        }
    }

    /// Title for an internal page: from the index, else from the slug.
    fn page_title(&self, route: &Route) -> String {
        if let Some(title) = self.pages.and_then(|p| p.title(route)) {
            return title.to_owned();
        }
        match titlecase_from_slug(route.slug()) {
            t if t.is_empty() => "Home".to_owned(),
            t => t,
        }
    }

    fn navbar_node(&mut self, item: &NavbarItemConfig, location: &str) -> Option<NavNode> {
        self.require_text(location, &item.text);

        match (&item.link, &item.children) {
            (Some(_), Some(_)) => {
                self.shape(location, "navbar entry cannot have both a link and children");
                None
            }
            (None, None) => {
                self.shape(location, "navbar entry needs a link or children");
                None
            }
            (None, Some(children)) => {
                if children.is_empty() {
                    self.shape(location, "navbar group must have at least one child");
                }
                let active_match = item
                    .active_match
                    .as_deref()
                    .and_then(|p| self.compile(location, p));
                let children = children
                    .iter()
                    .enumerate()
                    .filter_map(|(i, child)| {
                        self.navbar_node(child, &format!("{location}.children[{i}]"))
                    })
                    .collect();
                Some(NavNode::Group(NavGroup {
                    text: item.text.clone(),
                    active_match,
                    children,
                }))
            }
            (Some(link), None) => {
                let target = self.link_target(location, link)?;
                let active = match (&item.active_match, &target) {
                    (Some(pattern), _) => self.compile(location, pattern)?,
                    (None, LinkTarget::Internal(route)) => PathMatcher::for_link(route.clone()),
                    (None, LinkTarget::External(_)) => PathMatcher::Never,
                };
                Some(NavNode::Link(NavLink {
                    text: item.text.clone(),
                    target,
                    active,
                }))
            }
        }
    }

    fn sidebar_map(&mut self, config: &SidebarMapConfig) -> SidebarMap {
        let mut prefixes: HashMap<String, &str> = HashMap::new();
        let mut sections = Vec::with_capacity(config.len());

        for (key, entries) in config {
            let location = format!("sidebar[{key:?}]");
            if !key.starts_with('/') {
                self.shape(&location, "sidebar key must be a site path starting with '/'");
                continue;
            }

            let prefix = Route::parse(key);
            if let Some(other) = prefixes.get(prefix.key()) {
                let message = format!("duplicate sidebar prefix, same route as {other:?}");
                self.shape(&location, message);
                continue;
            }
            prefixes.insert(prefix.key().to_owned(), key);

            self.seen.clear();
            let entries = entries
                .iter()
                .enumerate()
                .filter_map(|(i, entry)| self.sidebar_entry(entry, &format!("{location}[{i}]")))
                .collect();
            sections.push(SidebarSection { prefix, entries });
        }

        SidebarMap::new(sections)
    }

    fn sidebar_entry(&mut self, entry: &SidebarEntryConfig, location: &str) -> Option<SidebarEntry> {
        let item = match entry {
            SidebarEntryConfig::Path(path) => {
                let link = self.link_target(location, path)?;
                let Some(route) = link.route() else {
                    self.shape(location, "bare external link needs explicit text");
                    return None;
                };
                let text = self.page_title(route);
                return Some(SidebarEntry::Page(SidebarPage { text, link }));
            }
            SidebarEntryConfig::Item(item) => item,
        };

        let link = match item.link.as_deref() {
            Some(link) => Some(self.link_target(location, link)?),
            None => None,
        };

        let text = match (&item.text, &link) {
            (Some(text), _) => {
                self.require_text(location, text);
                Some(text.clone())
            }
            (None, Some(LinkTarget::Internal(route))) => Some(self.page_title(route)),
            (None, _) => None,
        };

        match &item.children {
            Some(children) => {
                if children.is_empty() {
                    if item.collapsible {
                        self.shape(location, "collapsible group must have at least one child");
                    } else {
                        self.warn(location, "group has no children");
                    }
                }
                let Some(text) = text else {
                    self.shape(location, "sidebar group needs text or an internal link");
                    return None;
                };
                let children = children
                    .iter()
                    .enumerate()
                    .filter_map(|(i, child)| {
                        self.sidebar_entry(child, &format!("{location}.children[{i}]"))
                    })
                    .collect();
                Some(SidebarEntry::Group(SidebarGroup {
                    text,
                    link,
                    collapsible: item.collapsible,
                    children,
                }))
            }
            None => {
                if item.collapsible {
                    self.shape(location, "collapsible group must have at least one child");
                }
                let Some(link) = link else {
                    self.shape(location, "sidebar entry needs a link or children");
                    return None;
                };
                let Some(text) = text else {
                    self.shape(location, "external sidebar link needs explicit text");
                    return None;
                };
                Some(SidebarEntry::Page(SidebarPage { text, link }))
            }
        }
    }
}
