//! Shared checks used by request builders.

use crate::error::RequestError;

/// Characters a feature flag name may never contain.
const FORBIDDEN_NAME_CHARS: &[char] = &['/', '"', '\'', '(', ')', ','];

/// Returns the value or a missing-field error.
pub(crate) fn require<T>(value: Option<T>, field: &'static str) -> Result<T, RequestError> {
    value.ok_or(RequestError::MissingField { field })
}

/// Returns the string or a missing-field error when absent or empty.
pub(crate) fn require_text(
    value: Option<String>,
    field: &'static str,
) -> Result<String, RequestError> {
    match value {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(RequestError::MissingField { field }),
    }
}

/// Rejects an empty identifier passed to a single-field constructor.
pub(crate) fn non_empty(value: impl Into<String>, field: &'static str) -> Result<String, RequestError> {
    require_text(Some(value.into()), field)
}

/// Checks a platform name: no whitespace, slashes, quotes, parentheses or
/// commas anywhere, and no trailing period.
pub(crate) fn check_name(value: &str, field: &'static str) -> Result<(), RequestError> {
    let invalid = |reason| RequestError::InvalidFormat {
        field,
        value: value.to_string(),
        reason,
    };

    if value.chars().any(char::is_whitespace) {
        return Err(invalid("must not contain whitespace"));
    }
    if value.contains(FORBIDDEN_NAME_CHARS) {
        return Err(invalid(
            "must not contain slashes, quotes, parentheses or commas",
        ));
    }
    if value.ends_with('.') {
        return Err(invalid("must not end with a period"));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_require_text() {
        assert!(require_text(Some(String::from("x")), "name").is_ok());
        assert_eq!(
            require_text(Some(String::new()), "name"),
            Err(RequestError::MissingField { field: "name" })
        );
        assert_eq!(
            require_text(None, "name"),
            Err(RequestError::MissingField { field: "name" })
        );
    }

    #[test]
    fn test_check_name_accepts() {
        assert!(check_name("test_feature_flag_name", "name").is_ok());
        assert!(check_name("app.bits.upload", "name").is_ok());
        assert!(check_name("diego-docker", "name").is_ok());
    }

    #[test]
    fn test_check_name_rejects() {
        for bad in [
            "has space",
            "tab\tinside",
            "slash/inside",
            "double\"quote",
            "single'quote",
            "paren(",
            "paren)",
            "comma,inside",
            "trailing ",
            "trailing.",
        ] {
            assert!(check_name(bad, "name").is_err(), "{bad:?} should be rejected");
        }
    }
}
