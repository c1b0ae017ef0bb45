//! Feature flag requests and responses.

use serde::{Deserialize, Serialize};

use crate::client::validation::{check_name, non_empty};
use crate::error::RequestError;

/// A platform feature flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeatureFlag {
    /// Flag name.
    pub name: String,
    /// Whether the flag is enabled.
    pub enabled: bool,
    /// Custom error message returned when the flag blocks an action.
    #[serde(default)]
    pub error_message: Option<String>,
    /// Flag URL.
    #[serde(default)]
    pub url: Option<String>,
}

/// Request to fetch a feature flag by name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GetFeatureFlagRequest {
    name: String,
}

impl GetFeatureFlagRequest {
    /// Creates the request.
    ///
    /// # Errors
    ///
    /// Returns an error if the name is empty or malformed.
    pub fn new(name: impl Into<String>) -> Result<Self, RequestError> {
        let name = non_empty(name, "name")?;
        check_name(&name, "name")?;
        Ok(Self { name })
    }

    /// The flag name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bad_name_with_forbidden_characters() {
        assert!(
            GetFeatureFlagRequest::new(
                "mustn't have spaces or / chars (or quotes, or parentheses, or commas)"
            )
            .is_err()
        );
    }

    #[test]
    fn test_bad_name_trailing_whitespace() {
        assert!(GetFeatureFlagRequest::new("good_name_with_bad_at_end ").is_err());
    }

    #[test]
    fn test_bad_name_trailing_period() {
        assert!(GetFeatureFlagRequest::new("good_name_with_bad_at_end.").is_err());
    }

    #[test]
    fn test_no_name() {
        assert_eq!(
            GetFeatureFlagRequest::new(""),
            Err(RequestError::MissingField { field: "name" })
        );
    }

    #[test]
    fn test_valid() {
        let request = GetFeatureFlagRequest::new("test_feature_flag_name").expect("valid name");
        assert_eq!(request.name(), "test_feature_flag_name");
    }

    #[test]
    fn test_parse_feature_flag() {
        let flag: FeatureFlag = serde_json::from_str(
            r#"{"name":"user_org_creation","enabled":false,"error_message":null,"url":"/v2/config/feature_flags/user_org_creation"}"#,
        )
        .expect("should parse");
        assert!(!flag.enabled);
        assert!(flag.error_message.is_none());
    }
}
