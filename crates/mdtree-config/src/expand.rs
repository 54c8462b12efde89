//! Home directory and environment variable expansion for path settings.
//!
//! Supports:
//! - `~` and `~/...` - expands to the current user's home directory
//! - `${VAR}` - expands to the value of VAR, errors if unset
//! - `${VAR:-default}` - expands to VAR if set, otherwise uses default

use std::path::PathBuf;

use crate::ConfigError;

/// Expand `~` and `${VAR}` references in a path setting.
///
/// `field` names the setting in error messages.
pub(crate) fn expand_path(value: &str, field: &str) -> Result<PathBuf, ConfigError> {
    // Fast path: nothing to expand
    if !value.contains("${") && !value.starts_with('~') {
        return Ok(PathBuf::from(value));
    }

    shellexpand::full_with_context(value, home_dir, |var| -> Result<Option<String>, LookupError> {
        match std::env::var(var) {
            Ok(val) => Ok(Some(val)),
            Err(_) => Err(LookupError {
                var_name: var.to_owned(),
            }),
        }
    })
    .map(|cow| PathBuf::from(cow.into_owned()))
    .map_err(|e| ConfigError::EnvVar {
        field: field.to_owned(),
        message: format!("${{{0}}} not set", e.cause.var_name),
    })
}

/// Expand a leading `~` only. Used for paths that come from documents.
pub fn expand_home(value: &str) -> PathBuf {
    PathBuf::from(shellexpand::tilde(value).into_owned())
}

fn home_dir() -> Option<String> {
    std::env::var("HOME")
        .or_else(|_| std::env::var("USERPROFILE"))
        .ok()
}

/// Error returned when environment variable lookup fails.
struct LookupError {
    var_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_expand_plain_path_unchanged() {
        let path = expand_path("static/assets", "assets.dir").unwrap();
        assert_eq!(path, PathBuf::from("static/assets"));
    }

    #[test]
    fn test_expand_env_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::set_var("MDTREE_TEST_ASSETS", "/opt/mdtree");
        }
        let path = expand_path("${MDTREE_TEST_ASSETS}/static", "assets.dir").unwrap();
        assert_eq!(path, PathBuf::from("/opt/mdtree/static"));
        unsafe {
            std::env::remove_var("MDTREE_TEST_ASSETS");
        }
    }

    #[test]
    fn test_expand_env_var_default() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDTREE_TEST_UNSET");
        }
        let path = expand_path("${MDTREE_TEST_UNSET:-/fallback}", "render.base_dir").unwrap();
        assert_eq!(path, PathBuf::from("/fallback"));
    }

    #[test]
    fn test_expand_missing_env_var() {
        // SAFETY: test runs single-threaded per test function
        unsafe {
            std::env::remove_var("MDTREE_TEST_MISSING");
        }
        let err = expand_path("${MDTREE_TEST_MISSING}", "assets.dir").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("assets.dir"), "Error: {msg}");
        assert!(msg.contains("MDTREE_TEST_MISSING"), "Error: {msg}");
    }

    #[test]
    fn test_expand_home_without_tilde() {
        assert_eq!(expand_home("images/a.png"), PathBuf::from("images/a.png"));
    }

    #[test]
    fn test_expand_home_with_tilde() {
        let expanded = expand_home("~/pics");
        assert!(expanded.ends_with("pics"));
        if let Ok(home) = std::env::var("HOME") {
            assert_eq!(expanded, PathBuf::from(home).join("pics"));
        }
    }
}
