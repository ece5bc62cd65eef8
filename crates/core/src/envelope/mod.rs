//! Response envelope framework
//!
//! Every provider response goes through [`parse_and_evaluate`], which turns
//! a raw JSON body and HTTP status into either a typed [`Envelope`] or a
//! [`PerxError`]. Error detection runs in a fixed order:
//!
//! 1. empty body: `TransportFailure`
//! 2. status >= 400 with a `{code, message}` pair: `ProviderRejected`
//! 3. unreadable `error` / `error_description` / `meta`: `MalformedPayload`
//! 4. shape extraction
//! 5. truthy `error` / `error_description`: `ProviderRejected`, even when
//!    extraction failed
//! 6. extraction failure, if any

pub mod shape;

use perx_domain::{PagingMeta, PerxError, Result};
use serde::de::{DeserializeOwned, IgnoredAny};
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

pub use shape::{DataKey, DataPath, List, Object, RewardsKey, Root, Shape};

const NO_ERROR_CODE: &str = "no-error-code";
const NO_ERROR_DESCRIPTION: &str = "no-error-description";

/// Top-level error fields of a response body.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ErrorFields {
    #[serde(default)]
    pub error: Option<Value>,
    #[serde(default)]
    pub error_description: Option<Value>,
}

impl ErrorFields {
    /// The provider error these fields describe, if either is truthy.
    pub fn error(&self) -> Option<PerxError> {
        let error = self.error.as_ref().filter(|value| truthy(value));
        let description = self.error_description.as_ref().filter(|value| truthy(value));
        if error.is_none() && description.is_none() {
            return None;
        }
        Some(PerxError::rejected(
            error.map_or_else(|| NO_ERROR_CODE.to_string(), render),
            description.map_or_else(|| NO_ERROR_DESCRIPTION.to_string(), render),
        ))
    }
}

/// Typed response: payload, paging block and the raw error fields.
#[derive(Debug, Clone, PartialEq)]
pub struct Envelope<D, M = IgnoredAny> {
    pub data: D,
    pub meta: Option<M>,
    pub errors: ErrorFields,
}

/// Envelope of a single object.
pub type ObjectEnvelope<T> = Envelope<T, IgnoredAny>;

/// Envelope of a paginated list.
pub type ListEnvelope<T, M = PagingMeta> = Envelope<Vec<T>, M>;

impl<D, M> Envelope<D, M> {
    pub fn into_data(self) -> D {
        self.data
    }
}

#[derive(Deserialize)]
#[serde(bound = "M: DeserializeOwned")]
struct Header<M> {
    #[serde(default)]
    error: Option<Value>,
    #[serde(default)]
    error_description: Option<Value>,
    #[serde(default)]
    meta: Option<M>,
}

impl<M> Default for Header<M> {
    fn default() -> Self {
        Self { error: None, error_description: None, meta: None }
    }
}

/// Turn a raw response into a typed envelope of shape `S`.
///
/// # Errors
/// See the module documentation for the order in which errors are detected.
pub fn parse_and_evaluate<S: Shape>(
    body: Option<Value>,
    status: u16,
) -> Result<Envelope<S::Data, S::Meta>> {
    let body = match body {
        None | Some(Value::Null) => return Err(PerxError::TransportFailure { status }),
        Some(Value::String(text)) if text.is_empty() => {
            return Err(PerxError::TransportFailure { status })
        }
        Some(body) => body,
    };

    // Read straight from the body so a broken `meta` cannot hide a rejection.
    if status >= 400 {
        if let Some(message) = body.get("message").filter(|value| truthy(value)) {
            let code = body
                .get("code")
                .filter(|value| !value.is_null())
                .map_or_else(|| NO_ERROR_CODE.to_string(), render);
            debug!(status, code = %code, "provider rejected request");
            return Err(PerxError::rejected(code, render(message)));
        }
    }

    let header: Header<S::Meta> = if body.is_object() {
        Header::deserialize(&body)
            .map_err(|err| PerxError::malformed(format!("Failed to deserialize envelope: {err}")))?
    } else {
        Header::default()
    };

    let extracted = S::extract(&body);

    let errors =
        ErrorFields { error: header.error, error_description: header.error_description };
    if let Some(error) = errors.error() {
        return Err(error);
    }

    Ok(Envelope { data: extracted?, meta: header.meta, errors })
}

/// JSON truthiness: `null`, `false`, `0` and `""` are falsy.
fn truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(flag) => *flag,
        Value::Number(number) => number.as_f64().is_some_and(|n| n != 0.0),
        Value::String(text) => !text.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use perx_domain::{Reward, Voucher, VoucherPagingMeta};
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_bodies_are_transport_failures() {
        for body in [None, Some(Value::Null), Some(json!(""))] {
            let err = parse_and_evaluate::<Object<Reward>>(body, 502).unwrap_err();
            assert_eq!(err, PerxError::TransportFailure { status: 502 });
            assert_eq!(err.to_string(), "Invalid response from server (httpStatusCode 502)");
        }
    }

    #[test]
    fn code_message_pair_wins_over_data_on_error_status() {
        let body = json!({"code": "4103", "message": "not enough points", "data": {"id": 1}});
        let err = parse_and_evaluate::<Object<Reward>>(Some(body), 422).unwrap_err();
        assert_eq!(err, PerxError::rejected("4103", "not enough points"));
        assert_eq!(err.code(), "perx-error:4103");
    }

    #[test]
    fn rejection_survives_unreadable_meta() {
        let body = json!({"code": "4103", "message": "not enough points", "meta": "garbage"});
        let err = parse_and_evaluate::<List<Reward>>(Some(body), 422).unwrap_err();
        assert_eq!(err, PerxError::rejected("4103", "not enough points"));
    }

    #[test]
    fn numeric_code_and_missing_code_are_rendered() {
        let body = json!({"code": 40, "message": "nope"});
        let err = parse_and_evaluate::<Object<Reward>>(Some(body), 400).unwrap_err();
        assert_eq!(err, PerxError::rejected("40", "nope"));

        let body = json!({"message": "nope"});
        let err = parse_and_evaluate::<Object<Reward>>(Some(body), 400).unwrap_err();
        assert_eq!(err, PerxError::rejected("no-error-code", "nope"));
    }

    #[test]
    fn code_message_pair_ignored_on_success_status() {
        let body = json!({"code": "0", "message": "ok", "data": {"id": 9}});
        let envelope = parse_and_evaluate::<Object<Reward>>(Some(body), 200).unwrap();
        assert_eq!(envelope.data.id, 9);
    }

    #[test]
    fn error_fields_win_over_extraction_failure() {
        let body = json!({"error": "invalid_token", "data": "not an object"});
        let err = parse_and_evaluate::<Object<Reward>>(Some(body), 200).unwrap_err();
        assert_eq!(err, PerxError::rejected("invalid_token", "no-error-description"));
    }

    #[test]
    fn error_description_alone_is_an_error() {
        let body = json!({"error_description": "expired", "data": {"id": 1}});
        let err = parse_and_evaluate::<Object<Reward>>(Some(body), 200).unwrap_err();
        assert_eq!(err, PerxError::rejected("no-error-code", "expired"));
    }

    #[test]
    fn falsy_error_fields_are_ignored() {
        let body = json!({"error": "", "error_description": null, "data": {"id": 1}});
        let envelope = parse_and_evaluate::<Object<Reward>>(Some(body), 200).unwrap();
        assert_eq!(envelope.data.id, 1);
    }

    #[test]
    fn list_envelope_carries_meta() {
        let body = json!({
            "data": [{"id": 1, "state": "issued"}, {"id": 2, "state": "redeemed"}],
            "meta": {"count": 2, "size": 25, "page": 1, "total_pages": 1, "type": "active"}
        });
        let envelope: ListEnvelope<Voucher, VoucherPagingMeta> =
            parse_and_evaluate::<List<Voucher, VoucherPagingMeta>>(Some(body), 200).unwrap();

        assert_eq!(envelope.data.len(), 2);
        let meta = envelope.meta.unwrap();
        assert_eq!(meta.total_pages, Some(1));
        assert_eq!(meta.voucher_type.as_deref(), Some("active"));
    }

    #[test]
    fn unreadable_meta_is_malformed() {
        let body = json!({"data": [], "meta": {"total_pages": "many"}});
        let err = parse_and_evaluate::<List<Reward>>(Some(body), 200).unwrap_err();
        assert!(matches!(err, PerxError::MalformedPayload(_)));
    }

    #[test]
    fn extraction_failure_propagates_without_error_fields() {
        let body = json!({"data": {"id": 1}});
        let err = parse_and_evaluate::<List<Reward>>(Some(body), 200).unwrap_err();
        assert_eq!(err, PerxError::malformed("Failed to deserialize item entries"));
    }
}
