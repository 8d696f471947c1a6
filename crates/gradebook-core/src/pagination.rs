//! Offset/limit pagination for list endpoints.
//!
//! - `skip`: number of leading records to drop (default 0)
//! - `limit`: maximum number of records to return (default 10)
//!
//! Both must be non-negative; negative values are rejected by
//! [`validator::Validate`] rather than silently clamped.

use serde::Deserialize;
use utoipa::IntoParams;
use validator::Validate;

use crate::serde::deserialize_optional_i64;

pub const DEFAULT_LIMIT: i64 = 10;

#[derive(Debug, Default, Deserialize, IntoParams, Validate)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// Records to skip (default 0)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[validate(range(min = 0, message = "skip must be greater than or equal to 0"))]
    pub skip: Option<i64>,
    /// Maximum records to return (default 10)
    #[serde(default, deserialize_with = "deserialize_optional_i64")]
    #[validate(range(min = 0, message = "limit must be greater than or equal to 0"))]
    pub limit: Option<i64>,
}

impl ListParams {
    pub fn new(skip: i64, limit: i64) -> Self {
        Self {
            skip: Some(skip),
            limit: Some(limit),
        }
    }

    pub fn skip(&self) -> i64 {
        self.skip.unwrap_or(0).max(0)
    }

    pub fn limit(&self) -> i64 {
        self.limit.unwrap_or(DEFAULT_LIMIT).max(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_list_params_defaults() {
        let params = ListParams::default();
        assert_eq!(params.skip(), 0);
        assert_eq!(params.limit(), 10);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_list_params_custom_values() {
        let params = ListParams::new(40, 20);
        assert_eq!(params.skip(), 40);
        assert_eq!(params.limit(), 20);
    }

    #[test]
    fn test_list_params_large_limit_applied_as_given() {
        let params = ListParams::new(0, 500);
        assert_eq!(params.limit(), 500);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_list_params_zero_limit_allowed() {
        let params = ListParams::new(0, 0);
        assert_eq!(params.limit(), 0);
        assert!(params.validate().is_ok());
    }

    #[test]
    fn test_list_params_negative_rejected() {
        let errors = ListParams::new(-1, -5).validate().unwrap_err();
        let fields = errors.field_errors();
        assert!(fields.contains_key("skip"));
        assert!(fields.contains_key("limit"));
    }

    #[test]
    fn test_list_params_deserialize_strings() {
        let json = r#"{"skip":"15","limit":"30"}"#;
        let params: ListParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.skip(), 15);
        assert_eq!(params.limit(), 30);
    }

    #[test]
    fn test_list_params_deserialize_empty_strings() {
        let json = r#"{"skip":"","limit":""}"#;
        let params: ListParams = serde_json::from_str(json).unwrap();
        assert_eq!(params.skip(), 0);
        assert_eq!(params.limit(), 10);
    }

    #[test]
    fn test_list_params_deserialize_missing_fields() {
        let params: ListParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params.skip, None);
        assert_eq!(params.limit, None);
    }

    #[test]
    fn test_list_params_deserialize_garbage_fails() {
        let json = r#"{"skip":"ten"}"#;
        assert!(serde_json::from_str::<ListParams>(json).is_err());
    }
}
