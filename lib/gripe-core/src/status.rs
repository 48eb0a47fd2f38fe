//! Structured status reported by a failed service call.

use serde::{Deserialize, Serialize};

use crate::Meta;

/// Server-reported description of a failed call.
///
/// The wire form uses the `ErrorCode`/`Message`/`StackTrace`/`Errors`/`Meta`
/// field names; camelCase spellings are accepted on deserialize.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct ResponseStatus {
    /// Machine-readable discriminator, e.g. `"ValidationException"`.
    #[serde(alias = "errorCode", skip_serializing_if = "String::is_empty")]
    pub error_code: String,

    /// Human-readable description of the failure.
    #[serde(alias = "message", skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// Server-side diagnostic trace, only present on debug server configurations.
    #[serde(alias = "stackTrace", skip_serializing_if = "Option::is_none")]
    pub stack_trace: Option<String>,

    /// Field-level validation failures, in server order.
    #[serde(alias = "errors", skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<FieldError>,

    /// Free-form additional context.
    #[serde(alias = "meta", skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl ResponseStatus {
    /// Creates a status with the given code and message.
    #[must_use]
    pub fn new(error_code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error_code: error_code.into(),
            message: message.into(),
            ..Self::default()
        }
    }

    /// Sets the server-side stack trace.
    #[must_use]
    pub fn with_stack_trace(mut self, stack_trace: impl Into<String>) -> Self {
        self.stack_trace = Some(stack_trace.into());
        self
    }

    /// Appends a field-level validation failure.
    #[must_use]
    pub fn with_error(mut self, error: FieldError) -> Self {
        self.errors.push(error);
        self
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key, value);
        self
    }
}

/// One field-level validation failure within a [`ResponseStatus`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "PascalCase")]
pub struct FieldError {
    /// Name of the offending field.
    #[serde(alias = "fieldName", skip_serializing_if = "String::is_empty")]
    pub field_name: String,

    /// Machine-readable discriminator for this field failure.
    #[serde(alias = "errorCode", skip_serializing_if = "String::is_empty")]
    pub error_code: String,

    /// Human-readable description of this field failure.
    #[serde(alias = "message", skip_serializing_if = "String::is_empty")]
    pub message: String,

    /// Free-form additional context for this field.
    #[serde(alias = "meta", skip_serializing_if = "Meta::is_empty")]
    pub meta: Meta,
}

impl FieldError {
    /// Creates a field error.
    #[must_use]
    pub fn new(
        field_name: impl Into<String>,
        error_code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            field_name: field_name.into(),
            error_code: error_code.into(),
            message: message.into(),
            meta: Meta::new(),
        }
    }

    /// Adds a metadata entry.
    #[must_use]
    pub fn with_meta(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.meta.insert(key, value);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_serializes_with_wire_names() {
        let status = ResponseStatus::new("ValidationException", "Validation failed")
            .with_error(FieldError::new("Email", "NotEmpty", "Required"));

        let text = serde_json::to_string(&status).expect("serialize");
        assert_eq!(
            text,
            r#"{"ErrorCode":"ValidationException","Message":"Validation failed","Errors":[{"FieldName":"Email","ErrorCode":"NotEmpty","Message":"Required"}]}"#
        );
    }

    #[test]
    fn status_skips_empty_fields() {
        let status = ResponseStatus::new("Timeout", "");
        let text = serde_json::to_string(&status).expect("serialize");
        assert_eq!(text, r#"{"ErrorCode":"Timeout"}"#);
    }

    #[test]
    fn status_deserializes_pascal_case() {
        let status: ResponseStatus = serde_json::from_str(
            r#"{"ErrorCode":"NotFound","Message":"no such user","StackTrace":"at Users.Get()"}"#,
        )
        .expect("deserialize");

        assert_eq!(status.error_code, "NotFound");
        assert_eq!(status.message, "no such user");
        assert_eq!(status.stack_trace.as_deref(), Some("at Users.Get()"));
        assert!(status.errors.is_empty());
        assert!(status.meta.is_empty());
    }

    #[test]
    fn status_deserializes_camel_case_aliases() {
        let status: ResponseStatus = serde_json::from_str(
            r#"{"errorCode":"NotFound","message":"no such user","errors":[{"fieldName":"Id","errorCode":"Invalid","message":"bad id"}]}"#,
        )
        .expect("deserialize");

        assert_eq!(status.error_code, "NotFound");
        assert_eq!(status.errors.len(), 1);
        let error = status.errors.first().expect("field error");
        assert_eq!(error.field_name, "Id");
        assert_eq!(error.error_code, "Invalid");
    }

    #[test]
    fn status_deserializes_empty_object() {
        let status: ResponseStatus = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(status, ResponseStatus::default());
    }

    #[test]
    fn field_error_meta_round_trip() {
        let error = FieldError::new("Email", "NotEmpty", "Required").with_meta("PropertyName", "Email");

        let text = serde_json::to_string(&error).expect("serialize");
        let back: FieldError = serde_json::from_str(&text).expect("deserialize");
        assert_eq!(back, error);
        assert_eq!(back.meta.get("PropertyName"), Some("Email"));
    }
}
