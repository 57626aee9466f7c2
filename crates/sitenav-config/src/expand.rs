//! Environment variable expansion for `[site]` strings.
//!
//! Only the braced forms are recognized:
//! - `${VAR}` - value of VAR, error if unset
//! - `${VAR:-default}` - value of VAR, or `default` if unset

use crate::ConfigError;

/// Expand `${VAR}` references in a configuration value.
///
/// A `$` not followed by `{` is kept as written (`$n nodes`), whether or not
/// the value also holds braced references.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let escaped = escape_bare_dollars(value);
    shellexpand::env_with_context(&escaped, |var| -> Result<Option<String>, UnsetVar> {
        std::env::var(var).map(Some).map_err(|_| UnsetVar {
            name: var.to_owned(),
        })
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{}}} not set", e.cause.name),
    })
}

/// Double every `$` not opening a `${` so shellexpand emits it literally.
fn escape_bare_dollars(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 4);
    let mut chars = value.chars().peekable();
    while let Some(c) = chars.next() {
        out.push(c);
        if c == '$' && chars.peek() != Some(&'{') {
            out.push('$');
        }
    }
    out
}

/// Lookup failure for a referenced variable.
struct UnsetVar {
    name: String,
}
