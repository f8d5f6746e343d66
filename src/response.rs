//! Classification of gateway responses.
//!
//! The gateway reports failure in several dialects: an HTTP error status, a
//! numeric `response_code` inside an otherwise-successful response, or a
//! boolean `status` flag. This module centralizes those checks, the ordered
//! search for the most specific upstream message, and the two predicates that
//! reclassify an unsuccessful response as a routine business outcome instead
//! of an error.

use serde_json::Value;

use crate::error::PayazaError;

/// An HTTP exchange that completed: status code plus parsed JSON body.
/// Bodies that fail to parse as JSON are represented as `Value::Null`, which
/// makes every secondary check fail and routes the caller to a gateway error
/// rather than a panic.
#[derive(Debug, Clone)]
pub(crate) struct GatewayResponse {
    pub status: u16,
    pub body: Value,
}

impl GatewayResponse {
    /// Did the transport layer report success?
    pub fn http_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Secondary check: the body carries `response_code == 200`. The gateway
    /// emits the code as either a number or a string.
    pub fn response_code_ok(&self) -> bool {
        response_code(&self.body) == Some(200)
    }

    /// Secondary check: the body carries a truthy boolean `status` field.
    pub fn status_flag_ok(&self) -> bool {
        self.body
            .get("status")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    /// Most specific upstream message available, or the operation fallback.
    pub fn message_or(&self, fallback: &str) -> String {
        extract_message(&self.body).unwrap_or_else(|| fallback.to_string())
    }

    /// Convert into a gateway error carrying the message, HTTP status and
    /// full body.
    pub fn into_gateway_error(self, fallback: &str) -> PayazaError {
        let message = self.message_or(fallback);
        PayazaError::gateway(message, self.status, self.body)
    }
}

/// Ordered candidate search for a human-readable upstream message:
/// `response_message`, then `message`, then `debugMessage`.
pub(crate) fn extract_message(body: &Value) -> Option<String> {
    ["response_message", "message", "debugMessage"]
        .iter()
        .find_map(|key| body.get(key).and_then(Value::as_str))
        .map(str::to_string)
}

fn response_code(body: &Value) -> Option<i64> {
    let code = body.get("response_code")?;
    code.as_i64()
        .or_else(|| code.as_str().and_then(|s| s.parse().ok()))
}

/// Does this enquiry response describe an unknown/inactive beneficiary
/// account rather than an operational fault?
///
/// The gateway reports this as `response_code == 500` with a message
/// containing "invalid account" in some spelling. The match is a substring
/// check on human-readable copy, so it lives here as a single predicate that
/// can be revised when the upstream wording changes.
pub(crate) fn is_invalid_account(body: &Value) -> bool {
    if response_code(body) != Some(500) {
        return false;
    }
    extract_message(body)
        .map(|message| message.to_ascii_lowercase().contains("invalid account"))
        .unwrap_or(false)
}

/// Does this failed charge response describe a card-level decline
/// (insufficient funds, issuer refusal) rather than a request or
/// authentication fault?
///
/// Declines come back with 3-D-Secure explicitly skipped and a diagnostic
/// message naming the decline reason; they are a terminal transaction
/// outcome, not an exception. Same substring-fragility caveat as
/// [`is_invalid_account`].
pub(crate) fn is_card_decline(body: &Value) -> bool {
    let skipped_3ds = body.get("do3dsAuth").and_then(Value::as_bool) == Some(false);
    if !skipped_3ds {
        return false;
    }
    body.get("debugMessage")
        .and_then(Value::as_str)
        .map(|reason| {
            let reason = reason.to_ascii_lowercase();
            reason.contains("insufficient funds") || reason.contains("declined")
        })
        .unwrap_or(false)
}
