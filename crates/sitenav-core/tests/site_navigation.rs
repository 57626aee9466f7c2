//! End-to-end resolution over a complete site configuration.

use std::path::Path;

use pretty_assertions::assert_eq;
use rayon::prelude::*;
use sitenav_config::Config;
use sitenav_core::{
    NavigationError, PageIndex, ResolvedNavigation, SiteNavigation, Strictness,
};

const SITE: &str = include_str!("fixtures/powerly.toml");

fn config() -> Config {
    Config::from_toml_str(SITE, Path::new("/site")).unwrap()
}

const PAGES: [(&str, &str); 13] = [
    ("/index.md", "Home"),
    ("/tutorial/index.md", "Tutorials"),
    ("/tutorial/method.md", "Method"),
    ("/reference/index.md", "Reference"),
    ("/reference/function/generate-model.md", "generate_model"),
    ("/reference/function/powerly.md", "powerly"),
    ("/reference/function/validate.md", "validate"),
    ("/reference/method/plot-method.md", "plot.Method"),
    ("/reference/method/plot-validation.md", "plot.Validation"),
    ("/reference/method/summary.md", "summary"),
    ("/publication/index.md", "Publications"),
    ("/publications/index.md", "Publications"),
    ("/developer/index.md", "Developer"),
];

fn pages() -> PageIndex {
    PAGES.into_iter().collect()
}

fn navigation() -> SiteNavigation {
    let config = config();
    let index = pages();
    let loaded = SiteNavigation::builder(&config)
        .pages(&index)
        .build()
        .unwrap();
    assert!(loaded.warnings.is_empty(), "{:?}", loaded.warnings);
    loaded.navigation
}

fn active_navbar(state: &ResolvedNavigation) -> Vec<&str> {
    fn walk<'a>(items: &'a [sitenav_core::navbar::NavbarItem], out: &mut Vec<&'a str>) {
        for item in items {
            if item.active {
                out.push(&item.text);
            }
            walk(&item.children, out);
        }
    }
    let mut out = Vec::new();
    walk(&state.navbar, &mut out);
    out
}

#[test]
fn test_function_page_activates_reference_branch() {
    let state = navigation().resolve("/reference/function/generate-model.html");

    assert_eq!(
        active_navbar(&state),
        vec!["Reference", "Functions", "generate_model"]
    );
    assert!(!state.navbar[0].active);
}

#[test]
fn test_unknown_path_has_empty_sidebar() {
    let state = navigation().resolve("/unknown/page");

    assert!(state.sidebar.is_empty());
    assert_eq!(state.sidebar_prefix, None);
    assert!(active_navbar(&state).is_empty());
}

#[test]
fn test_tutorial_pages_keep_tutorials_active() {
    let nav = navigation();
    for path in ["/tutorial", "/tutorial/", "/tutorial/index.html", "/tutorial/method.html"] {
        let state = nav.resolve(path);
        assert_eq!(active_navbar(&state), vec!["Tutorials"], "{path}");
        assert_eq!(state.sidebar_prefix.as_deref(), Some("/tutorial/"), "{path}");
    }
}

#[test]
fn test_sidebar_titles_from_pages() {
    let state = navigation().resolve("/tutorial/method.html");

    let texts: Vec<_> = state.sidebar.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, vec!["Tutorials", "Method"]);
    assert!(!state.sidebar[0].active);
    assert!(state.sidebar[1].active);
}

#[test]
fn test_reference_sidebar_collapse_state() {
    let nav = navigation();

    let index = nav.resolve("/reference/");
    let texts: Vec<_> = index.sidebar.iter().map(|i| i.text.as_str()).collect();
    assert_eq!(texts, vec!["Reference", "Functions", "Methods"]);
    assert!(index.sidebar[0].active);
    assert!(!index.sidebar[1].collapsed);
    assert!(index.sidebar[2].collapsed);

    let summary = nav.resolve("/reference/method/summary.html");
    assert!(summary.sidebar[2].active);
    assert!(!summary.sidebar[2].collapsed);
    assert!(summary.sidebar[2].children[2].active);
    assert!(active_navbar(&summary).is_empty());
}

#[test]
fn test_external_links_never_active() {
    let state = navigation().resolve("/package=powerly");

    let cran = &state.navbar[5];
    assert_eq!(cran.text, "CRAN");
    assert!(cran.external);
    assert!(!cran.active);
}

#[test]
fn test_repo_link_closes_navbar() {
    let state = navigation().resolve("/");

    assert_eq!(state.navbar.len(), 7);
    let repo = state.navbar.last().unwrap();
    assert_eq!(repo.text, "GitHub");
    assert_eq!(
        repo.link.as_deref(),
        Some("https://github.com/mihaiconstantin/powerly")
    );
    assert!(repo.external);
    assert!(!repo.active);
}

#[test]
fn test_navbar_and_sidebar_sections_are_independent() {
    // Navbar points at /publication/, sidebar outlines /publications/.
    let state = navigation().resolve("/publications/");

    assert!(!state.navbar[2].active);
    assert_eq!(state.sidebar_prefix.as_deref(), Some("/publications/"));
    assert!(state.sidebar[0].active);
}

#[test]
fn test_missing_page_fails_strict_load() {
    let config = config();
    let index: PageIndex = PAGES
        .into_iter()
        .filter(|(path, _)| *path != "/publication/index.md")
        .collect();

    let err = SiteNavigation::builder(&config)
        .pages(&index)
        .build()
        .unwrap_err();

    assert_eq!(err.problems.len(), 1);
    assert!(matches!(
        &err.problems[0],
        NavigationError::DanglingReference { location, target }
            if location == "navbar[2]" && target == "/publication/"
    ));
}

#[test]
fn test_missing_page_warns_when_lenient() {
    let config = config();
    let index: PageIndex = [("/tutorial/index.md", "Tutorials")].into_iter().collect();

    let loaded = SiteNavigation::builder(&config)
        .pages(&index)
        .strictness(Strictness::Warn)
        .build()
        .unwrap();

    assert!(!loaded.warnings.is_empty());
    assert!(loaded.warnings.iter().all(|w| w.message.starts_with("link to missing page")));

    // Entries survive with slug-derived titles.
    let state = loaded.navigation.resolve("/tutorial/method.html");
    assert_eq!(state.sidebar[1].text, "Method");
    assert!(state.sidebar[1].active);
}

#[test]
fn test_served_under_base() {
    let toml = SITE.replacen("base = \"/\"", "base = \"/powerly/\"", 1);
    let config = Config::from_toml_str(&toml, Path::new("/site")).unwrap();
    let loaded = SiteNavigation::builder(&config).build().unwrap();

    let state = loaded
        .navigation
        .resolve("/powerly/reference/function/powerly.html");

    assert_eq!(active_navbar(&state), vec!["Reference", "Functions", "powerly"]);
    assert_eq!(
        state.sidebar[1].children[1].link.as_deref(),
        Some("/powerly/reference/function/powerly.html")
    );
    assert_eq!(
        state.navbar[5].link.as_deref(),
        Some("https://CRAN.R-project.org/package=powerly")
    );

    let outside = loaded.navigation.resolve("/tutorial/");
    assert!(active_navbar(&outside).is_empty());
    assert!(outside.sidebar.is_empty());
    assert_eq!(outside.sidebar_prefix, None);
}

#[test]
fn test_parallel_resolution_matches_sequential() {
    let nav = navigation();
    let index = pages();
    let paths: Vec<String> = index.routes().map(|r| r.href().to_owned()).collect();

    let sequential: Vec<_> = paths.iter().map(|p| nav.resolve(p)).collect();
    let parallel: Vec<_> = paths.par_iter().map(|p| nav.resolve(p)).collect();

    assert_eq!(sequential, parallel);
}
