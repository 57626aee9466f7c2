//! Navbar tree and its per-route resolution.
//!
//! The navbar is a recursive sum type: a [`NavNode`] is either a link or a
//! group of further nodes. Resolving it for a route walks the tree once,
//! depth-first, and produces a [`NavbarItem`] tree with active flags set.
//! A group is active when its own `activeMatch` matches or when any of its
//! descendants is active.
//!
//! # Example
//!
//! ```
//! use sitenav_core::navbar::{NavGroup, NavLink, NavNode, Navbar};
//! use sitenav_core::{Route, SiteBase};
//!
//! let navbar = Navbar::new(vec![
//!     NavNode::Link(NavLink::internal("Tutorials", Route::parse("/tutorial/"))),
//!     NavNode::Group(NavGroup::new(
//!         "Reference",
//!         vec![NavNode::Link(NavLink::internal(
//!             "powerly",
//!             Route::parse("/reference/function/powerly.md"),
//!         ))],
//!     )),
//! ]);
//!
//! let items = navbar.resolve(&Route::parse("/reference/function/powerly.html"), &SiteBase::root());
//! assert!(!items[0].active);
//! assert!(items[1].active);
//! assert_eq!(items[1].children[0].link.as_deref(), Some("/reference/function/powerly.html"));
//! ```

use serde::Serialize;

use crate::matcher::PathMatcher;
use crate::route::Route;
use crate::SiteBase;

/// Where a link points.
#[derive(Clone, Debug)]
pub enum LinkTarget {
    /// Page or section of this site.
    Internal(Route),
    /// Absolute URL outside the site.
    External(String),
}

impl LinkTarget {
    /// Rendered link, with the site base applied to internal routes.
    #[must_use]
    pub fn href(&self, base: &SiteBase) -> String {
        match self {
            Self::Internal(route) => base.href(route),
            Self::External(url) => url.clone(),
        }
    }

    /// The internal route, if any.
    #[must_use]
    pub fn route(&self) -> Option<&Route> {
        match self {
            Self::Internal(route) => Some(route),
            Self::External(_) => None,
        }
    }
}

/// Leaf navbar entry.
#[derive(Clone, Debug)]
pub struct NavLink {
    /// Display label.
    pub text: String,
    /// Destination.
    pub target: LinkTarget,
    /// Active-state rule.
    pub active: PathMatcher,
}

impl NavLink {
    /// Internal link with the default active rule for its target.
    #[must_use]
    pub fn internal(text: impl Into<String>, route: Route) -> Self {
        Self {
            text: text.into(),
            active: PathMatcher::for_link(route.clone()),
            target: LinkTarget::Internal(route),
        }
    }

    /// External link. Never active unless a pattern is attached.
    #[must_use]
    pub fn external(text: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            target: LinkTarget::External(url.into()),
            active: PathMatcher::Never,
        }
    }

    /// Replace the active rule with an `activeMatch` pattern.
    #[must_use]
    pub fn with_active(mut self, active: PathMatcher) -> Self {
        self.active = active;
        self
    }
}

/// Submenu.
#[derive(Clone, Debug)]
pub struct NavGroup {
    /// Display label.
    pub text: String,
    /// Optional pattern that marks the group active on its own.
    pub active_match: Option<PathMatcher>,
    /// Entries in display order.
    pub children: Vec<NavNode>,
}

impl NavGroup {
    /// Group without its own active pattern.
    #[must_use]
    pub fn new(text: impl Into<String>, children: Vec<NavNode>) -> Self {
        Self {
            text: text.into(),
            active_match: None,
            children,
        }
    }
}

/// Navbar tree node.
#[derive(Clone, Debug)]
pub enum NavNode {
    /// Leaf link.
    Link(NavLink),
    /// Nested submenu.
    Group(NavGroup),
}

impl NavNode {
    /// Display label.
    #[must_use]
    pub fn text(&self) -> &str {
        match self {
            Self::Link(link) => &link.text,
            Self::Group(group) => &group.text,
        }
    }
}

/// Top navigation, in display order.
#[derive(Clone, Debug, Default)]
pub struct Navbar {
    items: Vec<NavNode>,
}

impl Navbar {
    /// Create a navbar from top-level nodes.
    #[must_use]
    pub fn new(items: Vec<NavNode>) -> Self {
        Self { items }
    }

    /// Top-level nodes.
    #[must_use]
    pub fn items(&self) -> &[NavNode] {
        &self.items
    }

    /// Resolve active state for `current`.
    ///
    /// Sibling order is preserved at every depth.
    #[must_use]
    pub fn resolve(&self, current: &Route, base: &SiteBase) -> Vec<NavbarItem> {
        self.resolve_for(Some(current), base)
    }

    /// Render the navbar with no entry active, for pages outside the site.
    #[must_use]
    pub fn resolve_inactive(&self, base: &SiteBase) -> Vec<NavbarItem> {
        self.resolve_for(None, base)
    }

    fn resolve_for(&self, current: Option<&Route>, base: &SiteBase) -> Vec<NavbarItem> {
        self.items
            .iter()
            .map(|node| resolve_node(node, current, base))
            .collect()
    }
}

/// Render-ready navbar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NavbarItem {
    /// Display label.
    pub text: String,
    /// Link target (absent for groups).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Link leaves the site.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub external: bool,
    /// Entry should be highlighted for the current route.
    pub active: bool,
    /// Child entries (groups only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<NavbarItem>,
}

fn resolve_node(node: &NavNode, current: Option<&Route>, base: &SiteBase) -> NavbarItem {
    match node {
        NavNode::Link(link) => NavbarItem {
            text: link.text.clone(),
            link: Some(link.target.href(base)),
            external: matches!(link.target, LinkTarget::External(_)),
            active: current.is_some_and(|c| link.active.is_match(c)),
            children: Vec::new(),
        },
        NavNode::Group(group) => {
            let children: Vec<NavbarItem> = group
                .children
                .iter()
                .map(|child| resolve_node(child, current, base))
                .collect();
            let active = children.iter().any(|c| c.active)
                || group
                    .active_match
                    .as_ref()
                    .zip(current)
                    .is_some_and(|(m, c)| m.is_match(c));
            NavbarItem {
                text: group.text.clone(),
                link: None,
                external: false,
                active,
                children,
            }
        }
    }
}
