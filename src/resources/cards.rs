//! Card charges, status polling and refunds.

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::client::PayazaClient;
use crate::error::PayazaResult;
use crate::response::is_card_decline;
use crate::status::TransactionState;
use crate::types::{Card, Currency, TransactionStatus};
use crate::urls::Endpoint;

const CONNECT_MESSAGE: &str = "Connection timeout - card issuer not responding";

/// Which authentication flow the charge goes through. The two flows are
/// served by different endpoints and wrap their result envelopes differently.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ChargeAuth {
    #[default]
    ThreeDs,
    TwoDs,
}

/// Optional charge parameters.
#[derive(Debug, Clone, Default)]
pub struct ChargeOptions {
    /// Cardholder name; split into first/last on the first space.
    pub account_name: Option<String>,
    pub auth: ChargeAuth,
    pub callback_url: Option<String>,
}

pub struct Cards<'a> {
    client: &'a PayazaClient,
}

impl<'a> Cards<'a> {
    pub(crate) fn new(client: &'a PayazaClient) -> Self {
        Self { client }
    }

    /// Charge a card.
    ///
    /// The returned state is `Pending` unless the response explicitly says
    /// the 3-D-Secure challenge was skipped (`do3dsAuth == false`) AND a
    /// terminal status is present; any other combination means a challenge is
    /// still outstanding.
    ///
    /// A card-level decline (insufficient funds, issuer refusal) is a
    /// terminal domain outcome and comes back as a `Failed` status with the
    /// raw response attached; request and authentication faults are raised.
    pub async fn charge(
        &self,
        amount: f64,
        card: &Card,
        reference: &str,
        currency: Currency,
        options: ChargeOptions,
    ) -> PayazaResult<TransactionStatus> {
        let mut service_payload = json!({
            "amount": amount,
            "currency": currency.as_str(),
            "transaction_reference": reference,
            "card": {
                "expiryMonth": card.expiry_month(),
                "expiryYear": card.expiry_year(),
                "securityCode": card.cvc(),
                "cardNumber": card.number(),
            },
        });

        if let Some(name) = &options.account_name {
            let (first, last) = name.split_once(' ').unwrap_or((name.as_str(), ""));
            service_payload["first_name"] = json!(first);
            service_payload["last_name"] = json!(last);
        }

        if let Some(callback_url) = &options.callback_url {
            service_payload["callback_url"] = json!(callback_url);
        }

        let endpoint = match options.auth {
            ChargeAuth::ThreeDs => Endpoint::CardCharge3ds,
            ChargeAuth::TwoDs => Endpoint::CardCharge2ds,
        };
        let url = self.client.url(endpoint)?;

        info!(reference, %currency, amount, "initiating card charge");

        let response = self
            .client
            .post_json(&url, &json!({"service_payload": service_payload}), CONNECT_MESSAGE)
            .await?;

        if !response.http_ok() {
            if is_card_decline(&response.body) {
                warn!(reference, "card charge declined by issuer");
                return Ok(TransactionStatus {
                    transaction_id: reference.to_string(),
                    state: TransactionState::Failed,
                    raw: response.body,
                });
            }
            return Err(response.into_gateway_error("Charge failed"));
        }

        // The 2DS flow nests the charge result one level deeper.
        let envelope = match options.auth {
            ChargeAuth::TwoDs => response.body.get("response_content").cloned().unwrap_or(Value::Null),
            ChargeAuth::ThreeDs => response.body.clone(),
        };

        let skipped_3ds = envelope.get("do3dsAuth").and_then(Value::as_bool) == Some(false);
        let reported = TransactionState::from_gateway_status(
            envelope
                .pointer("/transaction/transaction_status")
                .and_then(Value::as_str),
        );

        let state = if skipped_3ds && reported.is_terminal() {
            reported
        } else {
            TransactionState::Pending
        };

        info!(reference, %state, "card charge accepted");

        Ok(TransactionStatus {
            transaction_id: reference.to_string(),
            state,
            raw: response.body,
        })
    }

    /// Poll the status of a previous charge.
    pub async fn status(&self, reference: &str) -> PayazaResult<TransactionStatus> {
        let url = self.client.url(Endpoint::CardStatus)?;
        let payload = json!({"service_payload": {"transaction_reference": reference}});

        let response = self.client.post_json(&url, &payload, CONNECT_MESSAGE).await?;

        if !response.http_ok() {
            return Err(response.into_gateway_error("Unable to fetch transaction status"));
        }

        let state = TransactionState::from_gateway_status(
            response
                .body
                .pointer("/response_content/transaction_status")
                .and_then(Value::as_str),
        );

        Ok(TransactionStatus {
            transaction_id: reference.to_string(),
            state,
            raw: response.body,
        })
    }

    /// Refund (part of) a charge. Returns whether the gateway accepted the
    /// refund request.
    pub async fn refund(&self, reference: &str, amount: f64) -> PayazaResult<bool> {
        let url = self.client.url(Endpoint::CardRefund)?;
        let payload = json!({
            "service_payload": {
                "transaction_reference": reference,
                "amount": amount,
            }
        });

        info!(reference, amount, "requesting card refund");

        let response = self.client.post_json(&url, &payload, CONNECT_MESSAGE).await?;

        if !response.http_ok() {
            return Err(response.into_gateway_error("Refund failed"));
        }

        Ok(response.body.get("status").and_then(Value::as_str) == Some("success"))
    }

    /// Poll the status of a refund.
    pub async fn refund_status(&self, reference: &str) -> PayazaResult<TransactionStatus> {
        let url = self.client.url(Endpoint::CardRefundStatus)?;
        let payload = json!({"service_payload": {"transaction_reference": reference}});

        let response = self.client.post_json(&url, &payload, CONNECT_MESSAGE).await?;

        if !response.http_ok() {
            return Err(response.into_gateway_error("Unable to fetch refund status"));
        }

        let state = TransactionState::from_gateway_status(
            response
                .body
                .pointer("/response_content/transaction_status")
                .and_then(Value::as_str),
        );

        Ok(TransactionStatus {
            transaction_id: reference.to_string(),
            state,
            raw: response.body,
        })
    }
}
