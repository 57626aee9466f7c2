//! Sidebar outlines selected by route prefix.
//!
//! A [`SidebarMap`] holds one outline per section prefix (`/tutorial/`,
//! `/reference/`). For a given route the most specific section wins: the
//! map is kept sorted by prefix length, longest first, and the first
//! section that covers the route is used. Routes outside every section get
//! an empty sidebar.
//!
//! Entry text is fixed at load time. Bare page references have already
//! been given their page title by the time a [`SidebarEntry`] exists.

use serde::Serialize;

use crate::navbar::LinkTarget;
use crate::route::Route;
use crate::SiteBase;

/// Sidebar leaf.
#[derive(Clone, Debug)]
pub struct SidebarPage {
    /// Display label.
    pub text: String,
    /// Destination.
    pub link: LinkTarget,
}

/// Sidebar group with nested entries.
#[derive(Clone, Debug)]
pub struct SidebarGroup {
    /// Display label.
    pub text: String,
    /// Optional page the group header links to.
    pub link: Option<LinkTarget>,
    /// Group can be collapsed by the reader.
    pub collapsible: bool,
    /// Entries in display order.
    pub children: Vec<SidebarEntry>,
}

/// Sidebar tree node.
#[derive(Clone, Debug)]
pub enum SidebarEntry {
    /// Leaf link.
    Page(SidebarPage),
    /// Nested group.
    Group(SidebarGroup),
}

/// One section's outline.
#[derive(Clone, Debug)]
pub struct SidebarSection {
    /// Route prefix the outline applies to.
    pub prefix: Route,
    /// Entries in display order.
    pub entries: Vec<SidebarEntry>,
}

/// Sidebar outlines keyed by route prefix.
#[derive(Clone, Debug, Default)]
pub struct SidebarMap {
    /// Sorted by prefix key length, longest first.
    sections: Vec<SidebarSection>,
}

impl SidebarMap {
    /// Create a map from sections in any order.
    ///
    /// When two sections share a prefix the one listed first is kept
    /// reachable; the builder rejects such duplicates before they get here.
    #[must_use]
    pub fn new(mut sections: Vec<SidebarSection>) -> Self {
        // Stable sort keeps declaration order among equal-length keys.
        sections.sort_by(|a, b| b.prefix.key().len().cmp(&a.prefix.key().len()));
        Self { sections }
    }

    /// Sections, longest prefix first.
    #[must_use]
    pub fn sections(&self) -> &[SidebarSection] {
        &self.sections
    }

    /// Most specific section covering `current`.
    #[must_use]
    pub fn lookup(&self, current: &Route) -> Option<&SidebarSection> {
        let section = self.sections.iter().find(|s| s.prefix.covers(current));
        tracing::debug!(
            route = %current.key(),
            prefix = section.map(|s| s.prefix.key()),
            "Sidebar lookup"
        );
        section
    }

    /// Resolve the sidebar for `current`. Empty when no section covers it.
    #[must_use]
    pub fn resolve(&self, current: &Route, base: &SiteBase) -> Vec<SidebarItem> {
        self.lookup(current)
            .map(|section| section.resolve(current, base))
            .unwrap_or_default()
    }
}

impl SidebarSection {
    /// Resolve this outline for `current`, preserving order and nesting.
    #[must_use]
    pub fn resolve(&self, current: &Route, base: &SiteBase) -> Vec<SidebarItem> {
        self.entries
            .iter()
            .map(|entry| resolve_entry(entry, current, base))
            .collect()
    }
}

/// Render-ready sidebar entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SidebarItem {
    /// Display label.
    pub text: String,
    /// Link target.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,
    /// Entry is, or contains, the current page.
    pub active: bool,
    /// Group can be collapsed by the reader.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub collapsible: bool,
    /// Group starts collapsed: collapsible and not containing the current page.
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub collapsed: bool,
    /// Child entries (groups only).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub children: Vec<SidebarItem>,
}

fn is_current(link: &LinkTarget, current: &Route) -> bool {
    link.route().is_some_and(|route| route == current)
}

fn resolve_entry(entry: &SidebarEntry, current: &Route, base: &SiteBase) -> SidebarItem {
    match entry {
        SidebarEntry::Page(page) => SidebarItem {
            text: page.text.clone(),
            link: Some(page.link.href(base)),
            active: is_current(&page.link, current),
            collapsible: false,
            collapsed: false,
            children: Vec::new(),
        },
        SidebarEntry::Group(group) => {
            let children: Vec<SidebarItem> = group
                .children
                .iter()
                .map(|child| resolve_entry(child, current, base))
                .collect();
            let active = children.iter().any(|c| c.active)
                || group.link.as_ref().is_some_and(|l| is_current(l, current));
            SidebarItem {
                text: group.text.clone(),
                link: group.link.as_ref().map(|l| l.href(base)),
                active,
                collapsible: group.collapsible,
                collapsed: group.collapsible && !active,
                children,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    fn page(text: &str, path: &str) -> SidebarEntry {
        SidebarEntry::Page(SidebarPage {
            text: text.to_owned(),
            link: LinkTarget::Internal(Route::parse(path)),
        })
    }

    fn section(prefix: &str, entries: Vec<SidebarEntry>) -> SidebarSection {
        SidebarSection {
            prefix: Route::parse(prefix),
            entries,
        }
    }

    fn reference_outline() -> Vec<SidebarEntry> {
        vec![
            page("Reference", "/reference/index.md"),
            SidebarEntry::Group(SidebarGroup {
                text: "Functions".to_owned(),
                link: None,
                collapsible: false,
                children: vec![
                    page("generate_model", "/reference/function/generate-model.md"),
                    page("powerly", "/reference/function/powerly.md"),
                ],
            }),
            SidebarEntry::Group(SidebarGroup {
                text: "Methods".to_owned(),
                link: None,
                collapsible: true,
                children: vec![
                    page("plot.Method", "/reference/method/plot-method.md"),
                    page("summary", "/reference/method/summary.md"),
                ],
            }),
        ]
    }

    fn resolve(map: &SidebarMap, path: &str) -> Vec<SidebarItem> {
        map.resolve(&Route::parse(path), &SiteBase::root())
    }

    #[test]
    fn test_longest_prefix_wins() {
        let map = SidebarMap::new(vec![
            section("/reference/", vec![page("Reference", "/reference/index.md")]),
            section(
                "/reference/function/",
                vec![page("powerly", "/reference/function/powerly.md")],
            ),
        ]);

        let current = Route::parse("/reference/function/powerly");
        let selected = map.lookup(&current).unwrap();
        assert_eq!(selected.prefix.key(), "/reference/function/");

        let items = resolve(&map, "/reference/method/summary.html");
        assert_eq!(items[0].text, "Reference");
    }

    #[test]
    fn test_unknown_route_yields_empty_sidebar() {
        let map = SidebarMap::new(vec![section(
            "/developer/",
            vec![page("Developer", "/developer/index.md")],
        )]);

        assert!(map.lookup(&Route::parse("/unknown/page")).is_none());
        assert!(resolve(&map, "/unknown/page").is_empty());
    }

    #[test]
    fn test_prefix_respects_segment_boundary() {
        let map = SidebarMap::new(vec![section(
            "/reference/",
            vec![page("Reference", "/reference/index.md")],
        )]);
        assert!(resolve(&map, "/referenceX").is_empty());
    }

    #[test]
    fn test_section_root_route_selects_section() {
        let map = SidebarMap::new(vec![section(
            "/tutorial/",
            vec![page("Tutorials", "/tutorial/index.md")],
        )]);
        let items = resolve(&map, "/tutorial");
        assert_eq!(items.len(), 1);
        assert!(items[0].active);
    }

    #[test]
    fn test_nested_outline_order_and_active() {
        let map = SidebarMap::new(vec![section("/reference/", reference_outline())]);

        let items = resolve(&map, "/reference/function/powerly.html");

        let texts: Vec<_> = items.iter().map(|i| i.text.as_str()).collect();
        assert_eq!(texts, vec!["Reference", "Functions", "Methods"]);
        assert!(!items[0].active);
        assert!(items[1].active);
        assert!(!items[1].children[0].active);
        assert!(items[1].children[1].active);
        assert!(!items[2].active);
    }

    #[test]
    fn test_collapsible_group_collapsed_unless_active() {
        let map = SidebarMap::new(vec![section("/reference/", reference_outline())]);

        let away = resolve(&map, "/reference/");
        assert!(away[2].collapsible);
        assert!(away[2].collapsed);
        assert!(!away[1].collapsed);

        let inside = resolve(&map, "/reference/method/summary.html");
        assert!(inside[2].active);
        assert!(!inside[2].collapsed);
    }

    #[test]
    fn test_group_link_marks_group_active() {
        let map = SidebarMap::new(vec![section(
            "/reference/",
            vec![SidebarEntry::Group(SidebarGroup {
                text: "Methods".to_owned(),
                link: Some(LinkTarget::Internal(Route::parse("/reference/method/index.md"))),
                collapsible: true,
                children: vec![page("summary", "/reference/method/summary.md")],
            })],
        )]);

        let items = resolve(&map, "/reference/method/");
        assert!(items[0].active);
        assert!(!items[0].collapsed);
        assert_eq!(items[0].link.as_deref(), Some("/reference/method/"));
    }

    #[test]
    fn test_sections_sorted_longest_first() {
        let map = SidebarMap::new(vec![
            section("/", Vec::new()),
            section("/reference/function/", Vec::new()),
            section("/reference/", Vec::new()),
        ]);
        let keys: Vec<_> = map.sections().iter().map(|s| s.prefix.key()).collect();
        assert_eq!(keys, vec!["/reference/function/", "/reference/", "/"]);
    }

    #[test]
    fn test_root_section_is_fallback() {
        let map = SidebarMap::new(vec![
            section("/", vec![page("Home", "/index.md")]),
            section("/tutorial/", vec![page("Tutorials", "/tutorial/index.md")]),
        ]);
        assert_eq!(resolve(&map, "/publication/")[0].text, "Home");
        assert_eq!(resolve(&map, "/tutorial/method.html")[0].text, "Tutorials");
    }

    #[test]
    fn test_serialization_shape() {
        let map = SidebarMap::new(vec![section("/reference/", reference_outline())]);
        let json = serde_json::to_value(resolve(&map, "/reference/")).unwrap();

        assert_eq!(json[0]["link"], "/reference/");
        assert!(json[0].get("children").is_none());
        assert!(json[1].get("link").is_none());
        assert!(json[1].get("collapsible").is_none());
        assert_eq!(json[2]["collapsible"], true);
        assert_eq!(json[2]["collapsed"], true);
        assert_eq!(
            json[2]["children"][0]["link"],
            "/reference/method/plot-method.html"
        );
    }
}
