//! `sitenav.toml` loading.
//!
//! One file declares the whole site navigation:
//!
//! - `[site]`: title, description, public `base`, optional `repo` link
//! - `[docs]`: markdown `source_dir`, relative to the file
//! - `[navigation]`: `strict` handling of links to missing pages
//! - `[[navbar]]` and `[sidebar]`: the menus, see [`NavbarItemConfig`] and
//!   [`SidebarEntryConfig`]
//!
//! `[site]` strings accept `${VAR}` and `${VAR:-default}`. Menus are taken
//! literally.

mod expand;
mod menu;

use std::path::{Path, PathBuf};

use serde::Deserialize;

pub use menu::{NavbarItemConfig, SidebarEntryConfig, SidebarItemConfig, SidebarMapConfig};

/// Command-line overrides, applied after the file is read.
#[derive(Debug, Default)]
pub struct CliSettings {
    /// `--source-dir`.
    pub source_dir: Option<PathBuf>,
    /// `--strict` / `--no-strict`.
    pub strict: Option<bool>,
}

const CONFIG_FILENAME: &str = "sitenav.toml";

/// Application configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Site identity and public base path.
    pub site: SiteConfig,
    /// Documentation configuration (paths are relative strings from TOML).
    docs: DocsConfigRaw,
    /// Load-time validation policy.
    pub navigation: NavigationConfig,
    /// Top navigation entries in display order.
    pub navbar: Vec<NavbarItemConfig>,
    /// Sidebar outlines keyed by route prefix.
    pub sidebar: SidebarMapConfig,

    /// Resolved docs configuration (set after loading).
    #[serde(skip)]
    pub docs_resolved: DocsConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self::default_with_base(Path::new("."))
    }
}

/// Site identity.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// Site title.
    pub title: String,
    /// Short site description.
    pub description: String,
    /// Public path prefix the site is served under. Starts and ends with `/`.
    pub base: String,
    /// Source repository shown as the last navbar link: a URL, or
    /// `owner/name` for a GitHub repository.
    pub repo: Option<String>,
    /// Label for the repository link. Derived from the host when absent.
    #[serde(alias = "repoLabel")]
    pub repo_label: Option<String>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: String::new(),
            description: String::new(),
            base: "/".to_owned(),
            repo: None,
            repo_label: None,
        }
    }
}

/// Raw docs configuration as parsed from TOML (paths as strings).
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct DocsConfigRaw {
    source_dir: Option<String>,
}

/// Resolved documentation configuration with absolute paths.
#[derive(Debug, Default)]
pub struct DocsConfig {
    /// Source directory for markdown files.
    pub source_dir: PathBuf,
}

/// Load-time validation policy.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// Fail the build on links to pages that do not exist.
    /// When `false`, such links are reported as warnings.
    pub strict: bool,
}

impl Default for NavigationConfig {
    fn default() -> Self {
        Self { strict: true }
    }
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
    /// Environment variable error during expansion.
    #[error("Environment variable error in {field}: {message}")]
    EnvVar {
        /// Config field path (e.g., "`site.base`").
        field: String,
        /// Error message (e.g., "${`DOCS_BASE`} not set").
        message: String,
    },
}

impl Config {
    /// Load `config_path`, or the nearest `sitenav.toml` up from the current
    /// directory, then apply `cli_settings` on top.
    ///
    /// With no file anywhere, an empty navigation over `./docs` is returned.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist or parsing fails.
    pub fn load(
        config_path: Option<&Path>,
        cli_settings: Option<&CliSettings>,
    ) -> Result<Self, ConfigError> {
        let mut config = if let Some(path) = config_path {
            if !path.exists() {
                return Err(ConfigError::NotFound(path.to_path_buf()));
            }
            Self::load_from_file(path)?
        } else if let Some(discovered) = Self::discover_config() {
            Self::load_from_file(&discovered)?
        } else {
            Self::default_with_cwd()
        };

        if let Some(settings) = cli_settings {
            config.apply_cli_settings(settings);
        }

        Ok(config)
    }

    /// Parse configuration from a TOML string.
    ///
    /// Relative paths resolve against `base_dir`. Used by [`Config::load`] and
    /// by callers that embed the configuration.
    ///
    /// # Errors
    ///
    /// Returns error if parsing, expansion or validation fails.
    pub fn from_toml_str(content: &str, base_dir: &Path) -> Result<Self, ConfigError> {
        let mut config: Self = toml::from_str(content)?;
        config.expand_env_vars()?;
        config.resolve_paths(base_dir);
        config.validate()?;
        Ok(config)
    }

    fn apply_cli_settings(&mut self, settings: &CliSettings) {
        if let Some(source_dir) = &settings.source_dir {
            self.docs_resolved.source_dir.clone_from(source_dir);
        }
        if let Some(strict) = settings.strict {
            self.navigation.strict = strict;
        }
    }

    /// Nearest `sitenav.toml` in the current directory or an ancestor.
    fn discover_config() -> Option<PathBuf> {
        let cwd = std::env::current_dir().ok()?;
        cwd.ancestors()
            .map(|dir| dir.join(CONFIG_FILENAME))
            .find(|candidate| candidate.is_file())
    }

    fn default_with_cwd() -> Self {
        let cwd = std::env::current_dir().unwrap_or_default();
        Self::default_with_base(&cwd)
    }

    fn default_with_base(base: &Path) -> Self {
        Self {
            site: SiteConfig::default(),
            docs: DocsConfigRaw::default(),
            navigation: NavigationConfig::default(),
            navbar: Vec::new(),
            sidebar: SidebarMapConfig::new(),
            docs_resolved: DocsConfig {
                source_dir: base.join("docs"),
            },
            config_path: None,
        }
    }

    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let config_dir = path.parent().unwrap_or(Path::new("."));
        let mut config = Self::from_toml_str(&content, config_dir)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate configuration values.
    ///
    /// Only scalar settings are checked here. Navbar and sidebar trees are
    /// validated when the navigation model is built from them.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if any validation fails.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.validate_site()
    }

    /// Validate site configuration.
    fn validate_site(&self) -> Result<(), ConfigError> {
        let base = &self.site.base;
        if !base.starts_with('/') || !base.ends_with('/') {
            return Err(ConfigError::Validation(format!(
                "site.base must start and end with '/', got {base:?}"
            )));
        }
        if base.contains("//") {
            return Err(ConfigError::Validation(format!(
                "site.base cannot contain empty segments, got {base:?}"
            )));
        }
        if self.site.repo.as_deref().is_some_and(|r| r.trim().is_empty()) {
            return Err(ConfigError::Validation(
                "site.repo cannot be empty".to_owned(),
            ));
        }
        Ok(())
    }

    fn expand_env_vars(&mut self) -> Result<(), ConfigError> {
        self.site.title = expand::expand_env(&self.site.title, "site.title")?;
        self.site.description = expand::expand_env(&self.site.description, "site.description")?;
        self.site.base = expand::expand_env(&self.site.base, "site.base")?;
        if let Some(ref repo) = self.site.repo {
            self.site.repo = Some(expand::expand_env(repo, "site.repo")?);
        }

        if let Some(ref dir) = self.docs.source_dir {
            self.docs.source_dir = Some(expand::expand_env(dir, "docs.source_dir")?);
        }

        Ok(())
    }

    /// Resolve relative paths to absolute paths based on config directory.
    fn resolve_paths(&mut self, config_dir: &Path) {
        self.docs_resolved = DocsConfig {
            source_dir: config_dir.join(self.docs.source_dir.as_deref().unwrap_or("docs")),
        };
    }
}
