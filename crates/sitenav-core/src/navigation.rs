//! Site navigation facade.

use serde::Serialize;
use sitenav_config::Config;

use crate::load::NavigationBuilder;
use crate::navbar::{Navbar, NavbarItem};
use crate::route::Route;
use crate::sidebar::{SidebarItem, SidebarMap};

/// Public path prefix the site is served under.
///
/// Incoming paths have it stripped before matching; rendered internal
/// links get it prepended.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SiteBase {
    /// `""` for a site served at the root, otherwise e.g. `/powerly`.
    prefix: String,
}

impl SiteBase {
    /// Site served at `/`.
    #[must_use]
    pub fn root() -> Self {
        Self::default()
    }

    /// Base from a configured value such as `/powerly/`.
    #[must_use]
    pub fn new(base: &str) -> Self {
        let trimmed = base.trim().trim_matches('/');
        if trimmed.is_empty() {
            Self::root()
        } else {
            Self {
                prefix: format!("/{trimmed}"),
            }
        }
    }

    /// Remove the base from an incoming path.
    ///
    /// `None` for paths outside the base.
    #[must_use]
    pub fn strip<'a>(&self, path: &'a str) -> Option<&'a str> {
        if self.prefix.is_empty() {
            return Some(path);
        }
        match path.strip_prefix(self.prefix.as_str()) {
            Some("") => Some("/"),
            Some(rest) if rest.starts_with(['/', '?', '#']) => Some(rest),
            _ => None,
        }
    }

    /// Rendered link for an internal route.
    #[must_use]
    pub fn href(&self, route: &Route) -> String {
        format!("{}{}", self.prefix, route.href())
    }
}

/// Loaded, validated navigation for a whole site.
///
/// Immutable after construction and safe to share across threads.
#[derive(Clone, Debug, Default)]
pub struct SiteNavigation {
    base: SiteBase,
    navbar: Navbar,
    sidebar: SidebarMap,
}

impl SiteNavigation {
    /// Assemble navigation from already validated parts.
    #[must_use]
    pub fn new(navbar: Navbar, sidebar: SidebarMap, base: SiteBase) -> Self {
        Self {
            base,
            navbar,
            sidebar,
        }
    }

    /// Builder over a loaded configuration.
    #[must_use]
    pub fn builder(config: &Config) -> NavigationBuilder<'_> {
        NavigationBuilder::from_config(config)
    }

    /// Navbar tree.
    #[must_use]
    pub fn navbar(&self) -> &Navbar {
        &self.navbar
    }

    /// Sidebar outlines.
    #[must_use]
    pub fn sidebar(&self) -> &SidebarMap {
        &self.sidebar
    }

    /// Public base path.
    #[must_use]
    pub fn base(&self) -> &SiteBase {
        &self.base
    }

    /// Resolve navbar and sidebar state for one page.
    ///
    /// `current_path` is the rendered path as requested, base included
    /// (`/powerly/tutorial/method.html`). A path outside the base gets the
    /// navbar with nothing active and no sidebar.
    #[must_use]
    pub fn resolve(&self, current_path: &str) -> ResolvedNavigation {
        let Some(stripped) = self.base.strip(current_path) else {
            tracing::debug!(path = current_path, "Path outside site base");
            return ResolvedNavigation {
                route: Route::parse(current_path).key().to_owned(),
                navbar: self.navbar.resolve_inactive(&self.base),
                sidebar: Vec::new(),
                sidebar_prefix: None,
            };
        };
        let route = Route::parse(stripped);
        let section = self.sidebar.lookup(&route);

        ResolvedNavigation {
            navbar: self.navbar.resolve(&route, &self.base),
            sidebar: section
                .map(|s| s.resolve(&route, &self.base))
                .unwrap_or_default(),
            sidebar_prefix: section.map(|s| s.prefix.key().to_owned()),
            route: route.key().to_owned(),
        }
    }
}

/// Navigation state for one page, ready for a template or JSON.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResolvedNavigation {
    /// Normalized route the state was computed for.
    pub route: String,
    /// Navbar with active flags.
    pub navbar: Vec<NavbarItem>,
    /// Sidebar of the most specific covering section, or empty.
    pub sidebar: Vec<SidebarItem>,
    /// Prefix of the selected sidebar section.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sidebar_prefix: Option<String>,
}
