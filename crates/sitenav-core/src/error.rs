//! Load-time navigation errors and warnings.
//!
//! Every problem is found while the navigation is built from configuration.
//! Resolving a route afterwards cannot fail.

use std::fmt;

/// A problem that stops the navigation from loading.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// Malformed tree, such as a collapsible group without children.
    #[error("{location}: {message}")]
    ConfigShape {
        /// Entry path (e.g., `navbar[1].children[0]`).
        location: String,
        /// What is wrong with the entry.
        message: String,
    },
    /// Link to a path with no content page.
    #[error("{location}: link to missing page {target}")]
    DanglingReference {
        /// Entry path.
        location: String,
        /// Link as written in the configuration.
        target: String,
    },
    /// `activeMatch` is not a valid regular expression.
    #[error("{location}: invalid activeMatch pattern {pattern:?}: {source}")]
    PatternCompile {
        /// Entry path.
        location: String,
        /// Pattern as written in the configuration.
        pattern: String,
        /// Compiler error.
        #[source]
        source: regex::Error,
    },
}

impl NavigationError {
    /// Entry path the problem was found at.
    #[must_use]
    pub fn location(&self) -> &str {
        match self {
            Self::ConfigShape { location, .. }
            | Self::DanglingReference { location, .. }
            | Self::PatternCompile { location, .. } => location,
        }
    }
}

/// A finding that does not stop the navigation from loading.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LoadWarning {
    /// Entry path.
    pub location: String,
    /// Human-readable description.
    pub message: String,
}

impl fmt::Display for LoadWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.location, self.message)
    }
}

impl From<&NavigationError> for LoadWarning {
    fn from(err: &NavigationError) -> Self {
        let message = match err {
            NavigationError::ConfigShape { message, .. } => message.clone(),
            NavigationError::DanglingReference { target, .. } => {
                format!("link to missing page {target}")
            }
            NavigationError::PatternCompile { pattern, source, .. } => {
                format!("invalid activeMatch pattern {pattern:?}: {source}")
            }
        };
        Self {
            location: err.location().to_owned(),
            message,
        }
    }
}

/// Every problem found while loading, reported together.
#[derive(Debug, thiserror::Error)]
#[error("{}", render_problems(.problems))]
pub struct LoadError {
    /// Fatal problems, in configuration order.
    pub problems: Vec<NavigationError>,
    /// Non-fatal findings collected alongside.
    pub warnings: Vec<LoadWarning>,
}

fn render_problems(problems: &[NavigationError]) -> String {
    let mut out = format!("Navigation has {} problem(s):", problems.len());
    for problem in problems {
        out.push_str("\n  - ");
        out.push_str(&problem.to_string());
    }
    out
}
