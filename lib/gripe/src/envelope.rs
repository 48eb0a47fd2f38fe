//! The error envelope for one failed service call.

use std::collections::HashMap;
use std::fmt;
use std::sync::OnceLock;

use gripe_core::{
    FieldError, HasStatusCode, HasStatusDescription, ResponseStatus, ToResponseStatus, wire,
};
use serde_json::Value;

use crate::dto::{ErrorResponse, ResponseDto};

/// A failed remote-service call, explained.
///
/// The transport layer fills in the status line, headers, and raw body; the
/// calling layer may attach the deserialized error payload afterwards. The
/// derived fields - [`error_code`], [`error_message`], [`server_stack_trace`] -
/// are extracted from the payload on first access and frozen from then on,
/// so an envelope shared between readers always tells the same story.
///
/// Accessors never fail: a missing or malformed payload degrades to the
/// status description or to empty strings, and [`fmt::Display`] always
/// produces a usable multi-line report.
///
/// [`error_code`]: Self::error_code
/// [`error_message`]: Self::error_message
/// [`server_stack_trace`]: Self::server_stack_trace
#[derive(Debug)]
pub struct ServiceError {
    status_code: u16,
    status_description: String,
    headers: HashMap<String, String>,
    response_dto: Option<ResponseDto>,
    response_body: Option<String>,
    extracted: OnceLock<Extracted>,
}

/// Derived fields, written once by the extraction pass.
#[derive(Debug, Clone, Default)]
struct Extracted {
    error_code: Option<String>,
    error_message: Option<String>,
    server_stack_trace: Option<String>,
}

impl ServiceError {
    /// Creates an envelope from a status line.
    #[must_use]
    pub fn new(status_code: u16, status_description: impl Into<String>) -> Self {
        Self {
            status_code,
            status_description: status_description.into(),
            headers: HashMap::new(),
            response_dto: None,
            response_body: None,
            extracted: OnceLock::new(),
        }
    }

    /// Creates an envelope from a bare status code.
    ///
    /// The description is the canonical reason phrase when the code has one.
    #[must_use]
    pub fn from_status(status_code: u16) -> Self {
        let description = http::StatusCode::from_u16(status_code)
            .ok()
            .and_then(|status| status.canonical_reason())
            .unwrap_or("");
        Self::new(status_code, description)
    }

    /// Adds a response header.
    #[must_use]
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    /// Adds response headers.
    #[must_use]
    pub fn with_headers(mut self, headers: impl IntoIterator<Item = (String, String)>) -> Self {
        self.headers.extend(headers);
        self
    }

    /// Sets the raw response body.
    #[must_use]
    pub fn with_response_body(mut self, body: impl Into<String>) -> Self {
        self.response_body = Some(body.into());
        self
    }

    /// Attaches a typed error payload.
    #[must_use]
    pub fn with_response_dto(mut self, dto: impl ErrorResponse + 'static) -> Self {
        self.set_response_dto(dto);
        self
    }

    /// Attaches a structural error payload.
    #[must_use]
    pub fn with_response_value(mut self, value: Value) -> Self {
        self.set_response_value(value);
        self
    }

    /// Attaches a typed error payload after construction.
    ///
    /// Attach before the first read of a derived field: extraction runs once
    /// and its result is frozen for the lifetime of the envelope.
    pub fn set_response_dto(&mut self, dto: impl ErrorResponse + 'static) {
        self.response_dto = Some(ResponseDto::Typed(Box::new(dto)));
    }

    /// Attaches a structural error payload after construction.
    pub fn set_response_value(&mut self, value: Value) {
        self.response_dto = Some(ResponseDto::Untyped(value));
    }

    /// Replaces the raw response body.
    pub fn set_response_body(&mut self, body: impl Into<String>) {
        self.response_body = Some(body.into());
    }

    /// HTTP status code.
    #[must_use]
    pub const fn status_code(&self) -> u16 {
        self.status_code
    }

    /// HTTP status description.
    #[must_use]
    pub fn status_description(&self) -> &str {
        &self.status_description
    }

    /// Response headers.
    #[must_use]
    pub const fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Single header value by name, ignoring ASCII case.
    #[must_use]
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Attached error payload, if any.
    #[must_use]
    pub const fn response_dto(&self) -> Option<&ResponseDto> {
        self.response_dto.as_ref()
    }

    /// Raw response body, if any.
    #[must_use]
    pub fn response_body(&self) -> Option<&str> {
        self.response_body.as_deref()
    }

    /// Machine-readable error code.
    ///
    /// Falls back to the status description when the response carries no
    /// structured status at all.
    #[must_use]
    pub fn error_code(&self) -> &str {
        self.extracted().error_code.as_deref().unwrap_or_default()
    }

    /// Human-readable error message.
    #[must_use]
    pub fn error_message(&self) -> &str {
        self.extracted().error_message.as_deref().unwrap_or_default()
    }

    /// Server-side stack trace, present when the server runs in a debug
    /// configuration.
    #[must_use]
    pub fn server_stack_trace(&self) -> &str {
        self.extracted()
            .server_stack_trace
            .as_deref()
            .unwrap_or_default()
    }

    /// Structured status resolved from the attached payload.
    ///
    /// Recomputed on each call, since the payload may be attached after the
    /// envelope was built.
    #[must_use]
    pub fn response_status(&self) -> Option<ResponseStatus> {
        self.response_dto.as_ref()?.response_status()
    }

    /// Field-level validation failures; empty when there are none.
    #[must_use]
    pub fn field_errors(&self) -> Vec<FieldError> {
        self.response_status()
            .map(|status| status.errors)
            .unwrap_or_default()
    }

    /// Returns `true` for 4xx status codes.
    #[must_use]
    pub const fn is_client_error(&self) -> bool {
        self.status_code >= 400 && self.status_code < 500
    }

    /// Returns `true` for 5xx status codes.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        self.status_code >= 500 && self.status_code < 600
    }

    /// Returns `true` for 404 Not Found.
    #[must_use]
    pub const fn is_not_found(&self) -> bool {
        self.status_code == 404
    }

    fn extracted(&self) -> &Extracted {
        self.extracted.get_or_init(|| self.extract())
    }

    /// Single extraction pass over the payload and the raw body.
    ///
    /// A missing blob falls back to the status description as the error
    /// code; a blob that is not a map leaves every derived field empty. The
    /// asymmetry is part of the wire contract.
    fn extract(&self) -> Extracted {
        let Some(blob) = self.status_blob() else {
            return Extracted {
                error_code: Some(self.status_description.clone()),
                ..Extracted::default()
            };
        };

        let Some(map) = wire::as_map(&blob) else {
            tracing::debug!("structured status is not a map, leaving derived fields empty");
            return Extracted::default();
        };

        Extracted {
            error_code: wire::get_ignore_case(&map, wire::ERROR_CODE).and_then(wire::as_text),
            error_message: wire::get_ignore_case(&map, wire::MESSAGE).and_then(wire::as_text),
            server_stack_trace: wire::get_ignore_case(&map, wire::STACK_TRACE)
                .and_then(wire::as_text),
        }
    }

    /// Candidate structured-status blob: payload first, then raw body.
    fn status_blob(&self) -> Option<Value> {
        self.status_blob_from_dto()
            .or_else(|| self.status_blob_from_body())
    }

    fn status_blob_from_dto(&self) -> Option<Value> {
        let shape = self.response_dto.as_ref()?.to_wire_value()?;
        let map = shape.as_object()?;
        wire::get_ignore_case(map, wire::RESPONSE_STATUS).cloned()
    }

    fn status_blob_from_body(&self) -> Option<Value> {
        let body = self
            .response_body
            .as_deref()
            .filter(|body| !body.is_empty())?;
        let shape = match gripe_core::from_wire::<Value>(body) {
            Ok(shape) => shape,
            Err(err) => {
                tracing::debug!("response body is not structured text: {err}");
                return None;
            }
        };
        let map = shape.as_object()?;
        wire::get_ignore_case(map, wire::RESPONSE_STATUS).cloned()
    }
}

impl fmt::Display for ServiceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{} {}", self.status_code, self.status_description)?;
        writeln!(
            f,
            "Code: {}, Message: {}",
            self.error_code(),
            self.error_message()
        )?;

        if let Some(status) = self.response_status() {
            if !status.errors.is_empty() {
                writeln!(f, "Field Errors:")?;
                for error in &status.errors {
                    writeln!(
                        f,
                        "  [{}] {}:{}",
                        error.field_name, error.error_code, error.message
                    )?;
                    if !error.meta.is_empty() {
                        writeln!(f, "  Field Meta:")?;
                        for (key, value) in error.meta.iter() {
                            writeln!(f, "    {key}:{value}")?;
                        }
                    }
                }
            }

            if !status.meta.is_empty() {
                writeln!(f, "Meta:")?;
                for (key, value) in status.meta.iter() {
                    writeln!(f, "  {key}:{value}")?;
                }
            }
        }

        let stack_trace = self.server_stack_trace();
        if !stack_trace.is_empty() {
            writeln!(f, "Server StackTrace:")?;
            writeln!(f, " {stack_trace}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ServiceError {}

impl HasStatusCode for ServiceError {
    fn status_code(&self) -> u16 {
        self.status_code
    }
}

impl HasStatusDescription for ServiceError {
    fn status_description(&self) -> &str {
        &self.status_description
    }
}

impl ToResponseStatus for ServiceError {
    fn to_response_status(&self) -> Option<ResponseStatus> {
        self.response_status()
    }
}
