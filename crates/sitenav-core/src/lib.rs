//! Navbar and sidebar resolution for documentation sites.
//!
//! Navigation is declared once in `sitenav.toml` and loaded into an
//! immutable [`SiteNavigation`]. All validation happens while loading:
//! malformed entries, invalid `activeMatch` patterns and links to missing
//! pages are reported together in a [`LoadError`]. After that, resolving
//! the navigation for a page is a pure lookup that cannot fail.
//!
//! ```
//! use sitenav_config::Config;
//! use sitenav_core::SiteNavigation;
//!
//! let config = Config::from_toml_str(
//!     r#"
//! [[navbar]]
//! text = "Tutorials"
//! link = "/tutorial/"
//!
//! [sidebar]
//! "/tutorial/" = [{ text = "Method", link = "/tutorial/method.md" }]
//! "#,
//!     std::path::Path::new("."),
//! )
//! .unwrap();
//!
//! let loaded = SiteNavigation::builder(&config).build().unwrap();
//! let state = loaded.navigation.resolve("/tutorial/method.html");
//!
//! assert!(state.navbar[0].active);
//! assert!(state.sidebar[0].active);
//! ```

pub mod navbar;
pub mod sidebar;

mod error;
mod load;
mod matcher;
mod navigation;
mod pages;
mod route;

pub use error::{LoadError, LoadWarning, NavigationError};
pub use load::{LoadedNavigation, NavigationBuilder, Strictness};
pub use matcher::{MatchMode, PathMatcher, matches};
pub use navigation::{ResolvedNavigation, SiteBase, SiteNavigation};
pub use pages::{PageIndex, titlecase_from_slug};
pub use route::{Route, is_external};
