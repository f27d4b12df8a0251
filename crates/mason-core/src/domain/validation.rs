//! Property validators.
//!
//! Each validator matches the [`crate::domain::properties::Validator`]
//! signature so it can slot directly into an `OptionSpec`. Validators
//! return the human-readable reason on rejection; they never coerce.

use std::str::FromStr;

use crate::domain::error::DomainError;
use crate::domain::value_objects::Platform;

/// Java package name: letters and periods only, no leading/trailing or
/// doubled separator.
pub fn package(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".into());
    }
    if !value.chars().all(|c| c.is_ascii_alphabetic() || c == '.') {
        return Err("only letters and periods are allowed".into());
    }
    if value.starts_with('.') || value.ends_with('.') || value.contains("..") {
        return Err("periods must separate non-empty segments".into());
    }
    Ok(())
}

/// Maven group id: reverse-domain style, slightly looser than `package`.
pub fn group_id(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".into());
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
    {
        return Err("only letters, digits, '.', '-' and '_' are allowed".into());
    }
    if value.starts_with('.') || value.ends_with('.') || value.contains("..") {
        return Err("periods must separate non-empty segments".into());
    }
    Ok(())
}

/// Maven artifact id: lowercase, digits, '.', '-'.
pub fn artifact_id(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".into());
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '.' | '-'))
    {
        return Err("only lowercase letters, digits, '.' and '-' are allowed".into());
    }
    if !value.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
        return Err("must start with a letter".into());
    }
    Ok(())
}

/// Maven version string: no whitespace, sane charset.
pub fn version(value: &str) -> Result<(), String> {
    if value.is_empty() {
        return Err("must not be empty".into());
    }
    if value.chars().any(char::is_whitespace) {
        return Err("must not contain whitespace".into());
    }
    Ok(())
}

/// Target platform tag: anything [`Platform::from_str`] accepts.
pub fn aem_version(value: &str) -> Result<(), String> {
    Platform::from_str(value).map(|_| ()).map_err(|e| match e {
        DomainError::UnknownPlatform(v) => format!("'{v}' is not a known platform"),
        other => other.to_string(),
    })
}

/// Human-facing title: only demands non-blank.
pub fn app_title(value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err("must not be blank".into());
    }
    Ok(())
}

/// Project-relative module path, e.g. `core` or `it.tests`.
pub fn module_path(value: &str) -> Result<(), DomainError> {
    let reject = |reason: &str| {
        Err(DomainError::InvalidModulePath {
            path: value.to_string(),
            reason: reason.to_string(),
        })
    };
    if value.is_empty() {
        return reject("must not be empty");
    }
    if value.contains('/') || value.contains('\\') {
        return reject("must not contain path separators");
    }
    if value.starts_with('.') {
        return reject("must not start with '.'");
    }
    if !value
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_'))
    {
        return reject("only letters, digits, '.', '-' and '_' are allowed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn package_rejects_digits() {
        assert!(package("com123").is_err());
        assert!(package("com.my3site").is_err());
    }

    #[test]
    fn package_accepts_dotted_letters() {
        assert!(package("com.mysite").is_ok());
        assert!(package("org.example.deep.pkg").is_ok());
    }

    #[test]
    fn package_rejects_malformed_separators() {
        assert!(package(".com").is_err());
        assert!(package("com.").is_err());
        assert!(package("com..site").is_err());
        assert!(package("").is_err());
    }

    #[test]
    fn group_id_allows_digits_unlike_package() {
        assert!(group_id("com.mysite123").is_ok());
        assert!(group_id("com my site").is_err());
    }

    #[test]
    fn artifact_id_is_lowercase_only() {
        assert!(artifact_id("my-site").is_ok());
        assert!(artifact_id("MySite").is_err());
        assert!(artifact_id("1site").is_err());
    }

    #[test]
    fn version_rejects_whitespace() {
        assert!(version("1.0.0-SNAPSHOT").is_ok());
        assert!(version("1.0 beta").is_err());
        assert!(version("").is_err());
    }

    #[test]
    fn aem_version_accepts_platform_aliases() {
        assert!(aem_version("cloud").is_ok());
        assert!(aem_version("6.5").is_ok());
        assert!(aem_version("7.0").is_err());
    }

    #[test]
    fn module_path_rules() {
        assert!(module_path("core").is_ok());
        assert!(module_path("it.tests").is_ok());
        assert!(module_path("a/b").is_err());
        assert!(module_path(".hidden").is_err());
        assert!(module_path("").is_err());
    }
}
