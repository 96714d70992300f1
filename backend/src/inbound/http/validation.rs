//! Shared validation helpers for inbound HTTP adapters.
//!
//! Every rejection carries `{field, code}` details so form UIs can attach
//! the message to the offending input.

use serde::{Deserialize, Deserializer};
use serde_json::json;

use crate::domain::Error;

/// Deserialiser distinguishing an absent key from an explicit JSON `null`.
///
/// Plain `Option<Option<T>>` collapses `null` into the outer `None`;
/// routing through this helper keeps `null` as `Some(None)` so partial
/// updates can clear nullable columns.
pub(crate) fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Validation error codes for HTTP request failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum ErrorCode {
    MissingField,
    InvalidValue,
}

impl ErrorCode {
    fn as_str(self) -> &'static str {
        match self {
            ErrorCode::MissingField => "missing_field",
            ErrorCode::InvalidValue => "invalid_value",
        }
    }
}

/// Newtype wrapper for HTTP field names to provide type safety.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct FieldName(&'static str);

impl FieldName {
    pub(crate) const fn new(name: &'static str) -> Self {
        Self(name)
    }

    fn as_str(&self) -> &'static str {
        self.0
    }
}

pub(crate) fn missing_field_error(field: FieldName) -> Error {
    let field = field.as_str();
    Error::invalid_request(format!("missing required field: {field}")).with_details(json!({
        "field": field,
        "code": ErrorCode::MissingField.as_str(),
    }))
}

pub(crate) fn invalid_field_error(field: FieldName, message: impl Into<String>) -> Error {
    Error::invalid_request(message.into()).with_details(json!({
        "field": field.as_str(),
        "code": ErrorCode::InvalidValue.as_str(),
    }))
}

pub(crate) fn invalid_field_value_error(
    field: FieldName,
    message: impl Into<String>,
    value: impl Into<String>,
) -> Error {
    Error::invalid_request(message.into()).with_details(json!({
        "field": field.as_str(),
        "value": value.into(),
        "code": ErrorCode::InvalidValue.as_str(),
    }))
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn missing_field_carries_field_details() {
        let error = missing_field_error(FieldName::new("invoiceNumber"));
        let details = error.details().expect("details");
        assert_eq!(details["field"], "invoiceNumber");
        assert_eq!(details["code"], "missing_field");
    }

    #[rstest]
    fn double_option_separates_null_from_absent() {
        #[derive(Deserialize)]
        struct Probe {
            #[serde(default, deserialize_with = "double_option")]
            value: Option<Option<String>>,
        }

        let absent: Probe = serde_json::from_str("{}").expect("absent key");
        assert_eq!(absent.value, None);

        let null: Probe = serde_json::from_str(r#"{ "value": null }"#).expect("explicit null");
        assert_eq!(null.value, Some(None));

        let set: Probe = serde_json::from_str(r#"{ "value": "x" }"#).expect("set value");
        assert_eq!(set.value, Some(Some("x".to_owned())));
    }

    #[rstest]
    fn invalid_value_carries_the_rejected_input() {
        let error = invalid_field_value_error(
            FieldName::new("status"),
            "status must be one of the known lifecycle values",
            "shipped",
        );
        let details = error.details().expect("details");
        assert_eq!(details["value"], "shipped");
        assert_eq!(details["code"], "invalid_value");
    }
}
