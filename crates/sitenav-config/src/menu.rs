//! Raw navbar and sidebar declarations as written in `sitenav.toml`.
//!
//! These types mirror the file one-to-one and carry no invariants beyond
//! what serde enforces. Shape checks (empty collapsible groups, invalid
//! `active_match` patterns, dangling links) happen when `sitenav-core`
//! builds its navigation model from them.
//!
//! ```toml
//! [[navbar]]
//! text = "Tutorials"
//! link = "/tutorial/"
//!
//! [[navbar]]
//! text = "Reference"
//!
//! [[navbar.children]]
//! text = "powerly"
//! link = "/reference/function/powerly.md"
//! active_match = "function/powerly.*$"
//!
//! [sidebar]
//! "/tutorial/" = ["/tutorial/index.md", "/tutorial/method.md"]
//! "/reference/" = [
//!     { text = "Reference", link = "/reference/index.md" },
//!     { text = "Methods", collapsible = true, children = ["/reference/method/summary.md"] },
//! ]
//! ```

use std::collections::BTreeMap;

use serde::Deserialize;

/// One navbar entry: a link when `children` is absent, a submenu otherwise.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NavbarItemConfig {
    /// Display label.
    pub text: String,
    /// Destination: site path (`/tutorial/`) or absolute URL.
    #[serde(default)]
    pub link: Option<String>,
    /// Regex overriding active-state detection.
    #[serde(default, alias = "activeMatch")]
    pub active_match: Option<String>,
    /// Nested entries. `Some(vec![])` is kept distinct from absent.
    #[serde(default)]
    pub children: Option<Vec<NavbarItemConfig>>,
}

/// One sidebar entry: either a bare page path or an explicit table.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum SidebarEntryConfig {
    /// Bare page reference; text comes from the page title.
    Path(String),
    /// Explicit leaf or group.
    Item(SidebarItemConfig),
}

/// Explicit sidebar entry.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SidebarItemConfig {
    /// Display label. Falls back to the linked page title when absent.
    #[serde(default)]
    pub text: Option<String>,
    /// Page this entry (or group header) links to.
    #[serde(default)]
    pub link: Option<String>,
    /// Whether the group can be collapsed by the reader.
    #[serde(default)]
    pub collapsible: bool,
    /// Nested entries. Present means group.
    #[serde(default)]
    pub children: Option<Vec<SidebarEntryConfig>>,
}

/// Sidebar outlines keyed by route prefix (`"/reference/"`).
pub type SidebarMapConfig = BTreeMap<String, Vec<SidebarEntryConfig>>;
