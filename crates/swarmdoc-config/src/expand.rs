//! `${VAR}` and `${VAR:-default}` expansion for config string fields.
//!
//! A bare `$VAR` is left as written, so URLs containing `$` survive.

use std::borrow::Cow;

use crate::ConfigError;

/// An unset variable referenced without a default.
struct MissingVar(String);

fn lookup(name: &str) -> Result<Option<String>, MissingVar> {
    std::env::var(name)
        .map(Some)
        .map_err(|_| MissingVar(name.to_owned()))
}

/// Expand `${...}` references in the value of config field `field`.
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, lookup)
        .map(Cow::into_owned)
        .map_err(|err| {
            let MissingVar(name) = err.cause;
            ConfigError::EnvVar {
                field: field.to_owned(),
                message: format!("${{{name}}} not set"),
            }
        })
}
