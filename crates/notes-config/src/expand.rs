//! Environment variable expansion for configuration strings.
//!
//! Supports:
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use crate::ConfigError;

/// Expand environment variable references in a string.
///
/// Returns the original string unchanged if no `${}` patterns are present.
/// Bare `$VAR` syntax is not expanded (only `${VAR}` with braces).
pub(crate) fn expand_env(value: &str, field: &str) -> Result<String, ConfigError> {
    if !value.contains("${") {
        return Ok(value.to_owned());
    }

    shellexpand::env_with_context(value, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(std::borrow::Cow::into_owned)
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_simple_var() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("NOTES_TEST_SIMPLE", "/srv/notes");
        }
        let result = expand_env("${NOTES_TEST_SIMPLE}", "content.root_dir").unwrap();
        assert_eq!(result, "/srv/notes");
        unsafe {
            std::env::remove_var("NOTES_TEST_SIMPLE");
        }
    }

    #[test]
    fn test_expand_with_default_uses_default() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("NOTES_TEST_UNSET");
        }
        let result = expand_env("${NOTES_TEST_UNSET:-content}", "content.root_dir").unwrap();
        assert_eq!(result, "content");
    }

    #[test]
    fn test_expand_embedded_var() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::set_var("NOTES_TEST_SECTION", "garden");
        }
        let result = expand_env("/${NOTES_TEST_SECTION}/notes", "routes.prefix").unwrap();
        assert_eq!(result, "/garden/notes");
        unsafe {
            std::env::remove_var("NOTES_TEST_SECTION");
        }
    }

    #[test]
    fn test_expand_missing_var_error() {
        // SAFETY: each test uses its own variable name
        unsafe {
            std::env::remove_var("NOTES_TEST_MISSING");
        }
        let err = expand_env("${NOTES_TEST_MISSING}", "content.root_dir").unwrap_err();

        assert!(matches!(err, ConfigError::EnvVar { .. }));
        assert!(err.to_string().contains("NOTES_TEST_MISSING"));
        assert!(err.to_string().contains("content.root_dir"));
    }

    #[test]
    fn test_literal_and_bare_dollar_unchanged() {
        assert_eq!(expand_env("content", "f").unwrap(), "content");
        assert_eq!(expand_env("$HOME/notes", "f").unwrap(), "$HOME/notes");
    }
}
