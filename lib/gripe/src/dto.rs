//! Response payload attached to a [`ServiceError`](crate::ServiceError).

use std::fmt;

use gripe_core::{HasResponseStatus, ResponseStatus, wire};
use serde_json::Value;

/// Deserialized error payload carried by an envelope.
///
/// Status lookup is a closed set of two shapes: a typed DTO answering through
/// its [`HasResponseStatus`] capability, and a generic structural value
/// searched by field name.
#[derive(Debug)]
pub enum ResponseDto {
    /// Typed DTO; its status is read directly, never reparsed.
    Typed(Box<dyn ErrorResponse>),
    /// Structural shape from the serialization layer.
    Untyped(Value),
}

impl ResponseDto {
    /// Resolves the structured status carried by this payload.
    ///
    /// The typed variant answers through its capability. The structural
    /// variant is searched for a [`wire::RESPONSE_STATUS`] field (ASCII case
    /// ignored) and the found value is coerced through the codec; a miss or
    /// a failed coercion yields `None`.
    #[must_use]
    pub fn response_status(&self) -> Option<ResponseStatus> {
        match self {
            Self::Typed(dto) => dto.response_status().cloned(),
            Self::Untyped(value) => {
                let map = value.as_object()?;
                let found = wire::get_ignore_case(map, wire::RESPONSE_STATUS)?;
                match gripe_core::from_wire_value(found.clone()) {
                    Ok(status) => Some(status),
                    Err(err) => {
                        tracing::debug!("response status field did not coerce: {err}");
                        None
                    }
                }
            }
        }
    }

    /// The payload as a wire shape, for structural inspection.
    pub(crate) fn to_wire_value(&self) -> Option<Value> {
        match self {
            Self::Typed(dto) => {
                let text = dto.to_wire_text()?;
                match gripe_core::from_wire(&text) {
                    Ok(value) => Some(value),
                    Err(err) => {
                        tracing::debug!("typed payload did not round-trip the codec: {err}");
                        None
                    }
                }
            }
            Self::Untyped(value) => Some(value.clone()),
        }
    }
}

/// Object-safe view of a typed error response.
///
/// Blanket-implemented for every `Serialize + Debug + Send + Sync` type that
/// has the [`HasResponseStatus`] capability; there is nothing to implement by
/// hand.
pub trait ErrorResponse: HasResponseStatus + fmt::Debug + Send + Sync {
    /// Serializes the payload into wire text.
    fn to_wire_text(&self) -> Option<String>;
}

impl<T> ErrorResponse for T
where
    T: HasResponseStatus + serde::Serialize + fmt::Debug + Send + Sync,
{
    fn to_wire_text(&self) -> Option<String> {
        match gripe_core::to_wire(self) {
            Ok(text) => Some(text),
            Err(err) => {
                tracing::debug!("payload serialization failed: {err}");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use serde::Serialize;
    use serde_json::json;

    use super::*;

    #[derive(Debug, Serialize)]
    #[serde(rename_all = "PascalCase")]
    struct Dto {
        response_status: ResponseStatus,
    }

    impl HasResponseStatus for Dto {
        fn response_status(&self) -> Option<&ResponseStatus> {
            Some(&self.response_status)
        }
    }

    #[test]
    fn typed_resolves_through_capability() {
        let dto = ResponseDto::Typed(Box::new(Dto {
            response_status: ResponseStatus::new("Nope", "did not work"),
        }));

        let status = dto.response_status().expect("status");
        assert_eq!(status.error_code, "Nope");
    }

    #[test]
    fn typed_serializes_to_wire_shape() {
        let dto = ResponseDto::Typed(Box::new(Dto {
            response_status: ResponseStatus::new("Nope", "did not work"),
        }));

        let value = dto.to_wire_value().expect("wire shape");
        assert_eq!(
            value,
            json!({"ResponseStatus": {"ErrorCode": "Nope", "Message": "did not work"}})
        );
    }

    #[test]
    fn untyped_resolves_by_field_name() {
        let dto = ResponseDto::Untyped(json!({
            "responsestatus": {"errorCode": "Nope", "message": "did not work"}
        }));

        let status = dto.response_status().expect("status");
        assert_eq!(status.error_code, "Nope");
        assert_eq!(status.message, "did not work");
    }

    #[test]
    fn untyped_miss_yields_none() {
        let dto = ResponseDto::Untyped(json!({"Result": "ok"}));
        assert!(dto.response_status().is_none());

        let dto = ResponseDto::Untyped(json!("not an object"));
        assert!(dto.response_status().is_none());
    }

    #[test]
    fn untyped_failed_coercion_yields_none() {
        let dto = ResponseDto::Untyped(json!({"ResponseStatus": [1, 2, 3]}));
        assert!(dto.response_status().is_none());
    }
}
