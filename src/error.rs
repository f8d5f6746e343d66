use thiserror::Error;

pub type PayazaResult<T> = Result<T, PayazaError>;

/// Errors surfaced by the Payaza client.
///
/// Soft failures (an invalid beneficiary account on a name enquiry, a card
/// declined by its issuer) are returned as domain values, not as errors;
/// everything here represents a call that could not produce a usable result.
#[derive(Debug, Error)]
pub enum PayazaError {
    /// Bad or missing account/endpoint configuration. Fatal, raised before
    /// any network traffic.
    #[error("Configuration error: {message}")]
    Configuration { message: String },

    /// The transport could not complete the exchange at all (DNS, connect,
    /// timeout before a response). Carries a fixed per-operation message.
    #[error("{message}")]
    Connection { message: String },

    /// The gateway answered with a failure. Carries the most specific
    /// upstream-provided message, the HTTP status code and the full parsed
    /// body for programmatic inspection.
    #[error("{message}")]
    Gateway {
        message: String,
        status_code: u16,
        body: serde_json::Value,
    },
}

impl PayazaError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection {
            message: message.into(),
        }
    }

    pub fn gateway(message: impl Into<String>, status_code: u16, body: serde_json::Value) -> Self {
        Self::Gateway {
            message: message.into(),
            status_code,
            body,
        }
    }

    /// HTTP status code of the failed exchange, when one was received.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            Self::Gateway { status_code, .. } => Some(*status_code),
            _ => None,
        }
    }

    /// Raw upstream response body, when one was received.
    pub fn response_body(&self) -> Option<&serde_json::Value> {
        match self {
            Self::Gateway { body, .. } => Some(body),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn gateway_error_keeps_status_and_body() {
        let body = json!({"response_message": "Insufficient balance"});
        let err = PayazaError::gateway("Insufficient balance", 400, body.clone());

        assert_eq!(err.status_code(), Some(400));
        assert_eq!(err.response_body(), Some(&body));
        assert_eq!(err.to_string(), "Insufficient balance");
    }

    #[test]
    fn connection_error_has_no_response_data() {
        let err = PayazaError::connection("Connection timeout - card issuer not responding");

        assert_eq!(err.status_code(), None);
        assert!(err.response_body().is_none());
    }
}
