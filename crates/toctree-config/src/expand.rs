//! Environment variable expansion for configuration strings.

use crate::ConfigError;

/// Substitute `${NAME}` and `${NAME:-fallback}` in a config value.
///
/// `field` names the config key in the error for an unset variable. Values
/// without `${` are returned as-is, so a plain `$NAME` stays literal.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    let expanded = shellexpand::env_with_context(value, lookup).map_err(|err| {
        ConfigError::EnvVar {
            field: field.to_owned(),
            message: format!("${{{}}} not set", err.cause.0),
        }
    })?;
    Ok(expanded.into_owned())
}

/// Unset variable name.
struct Unset(String);

fn lookup(name: &str) -> Result<Option<String>, Unset> {
    std::env::var(name)
        .map(Some)
        .map_err(|_| Unset(name.to_owned()))
}
