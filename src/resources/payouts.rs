//! Payout origination, status polling and bank directory lookup.

use serde_json::{json, Value};
use tracing::info;

use crate::client::PayazaClient;
use crate::error::{PayazaError, PayazaResult};
use crate::status::TransactionState;
use crate::types::{Bank, Currency, PayoutBeneficiary, TransactionStatus};
use crate::urls::Endpoint;

const CONNECT_MESSAGE: &str = "Connection timeout - payout service not responding";

const DEFAULT_NARRATION: &str = "Payout via Payaza SDK";
const MOBILE_MONEY_NARRATION: &str = "Mobile Money Payout";
const GHS_TRANSFER_NARRATION: &str = "GHS Bank Transfer";

/// Gateway rail selector for a payout, derived from the target currency.
fn transaction_type(currency: Currency) -> &'static str {
    match currency {
        Currency::Ngn => "nuban",
        Currency::Ghs => "ghipps",
        Currency::Kes | Currency::Ugx | Currency::Tzs | Currency::Xof => "mobile_money",
        _ => "nuban",
    }
}

fn sender_block() -> Value {
    json!({
        "sender_name": "Payaza SDK User",
        "sender_id": "",
        "sender_phone_number": "01234595",
        "sender_address": "123, SDK Street",
    })
}

pub struct Payouts<'a> {
    client: &'a PayazaClient,
}

impl<'a> Payouts<'a> {
    pub(crate) fn new(client: &'a PayazaClient) -> Self {
        Self { client }
    }

    /// Settlement-account reference for a currency, resolved from a fresh
    /// account-list call. The reference identifies which merchant account
    /// funds the payout; without a matching currency there is nothing to
    /// debit.
    async fn settlement_reference(&self, currency: Currency) -> PayazaResult<Option<String>> {
        let (accounts, response) = self.client.accounts().account_list().await?;

        let account = accounts
            .into_iter()
            .find(|account| account.currency.as_deref() == Some(currency.as_str()))
            .ok_or_else(|| {
                PayazaError::gateway(
                    format!("No account found for currency {currency}"),
                    response.status,
                    response.body,
                )
            })?;

        Ok(account.account_reference)
    }

    async fn dispatch(
        &self,
        payload: Value,
        reference: &str,
        fallback: &str,
    ) -> PayazaResult<TransactionStatus> {
        let url = self.client.url(Endpoint::PayoutSend)?;
        let response = self.client.post_json(&url, &payload, CONNECT_MESSAGE).await?;

        if !response.http_ok() || !response.response_code_ok() {
            return Err(response.into_gateway_error(fallback));
        }

        let content = response.body.get("response_content").cloned().unwrap_or(Value::Null);
        let raw_status = content
            .get("transaction_status")
            .or_else(|| content.get("response_status"))
            .and_then(Value::as_str);
        let state = TransactionState::from_gateway_status(raw_status);

        info!(reference, %state, "payout accepted by gateway");

        Ok(TransactionStatus {
            transaction_id: reference.to_string(),
            state,
            raw: response.body,
        })
    }

    /// Send a payout to a bank-account beneficiary.
    ///
    /// Two sequential upstream calls: the settlement-reference lookup, then
    /// the payout itself.
    pub async fn send(
        &self,
        beneficiary: &PayoutBeneficiary,
        reference: &str,
    ) -> PayazaResult<TransactionStatus> {
        info!(
            reference,
            currency = %beneficiary.currency,
            amount = beneficiary.amount,
            "initiating payout"
        );

        let account_reference = self.settlement_reference(beneficiary.currency).await?;
        let narration = beneficiary
            .narration
            .clone()
            .unwrap_or_else(|| DEFAULT_NARRATION.to_string());

        let payload = json!({
            "transaction_type": transaction_type(beneficiary.currency),
            "service_payload": {
                "payout_amount": beneficiary.amount,
                "transaction_pin": self.client.transaction_pin(),
                "account_reference": account_reference,
                "currency": beneficiary.currency.as_str(),
                "payout_beneficiaries": [{
                    "credit_amount": beneficiary.amount,
                    "account_number": beneficiary.account_number,
                    "account_name": beneficiary.account_name,
                    "bank_code": beneficiary.bank_code,
                    "narration": narration,
                    "transaction_reference": reference,
                    "sender": sender_block(),
                }],
            },
        });

        self.dispatch(payload, reference, "Payout failed").await
    }

    /// Send a mobile-money payout. `country` is forwarded for XOF, where the
    /// currency alone does not identify the destination network.
    #[allow(clippy::too_many_arguments)]
    pub async fn send_mobile_money(
        &self,
        currency: Currency,
        amount: f64,
        phone_number: &str,
        account_name: &str,
        bank_code: &str,
        reference: &str,
        narration: Option<&str>,
        country: Option<&str>,
    ) -> PayazaResult<TransactionStatus> {
        info!(reference, %currency, amount, "initiating mobile money payout");

        let account_reference = self.settlement_reference(currency).await?;

        let mut service_payload = json!({
            "payout_amount": amount,
            "transaction_pin": self.client.transaction_pin(),
            "account_reference": account_reference,
            "currency": currency.as_str(),
            "payout_beneficiaries": [{
                "credit_amount": amount,
                "account_number": phone_number,
                "account_name": account_name,
                "bank_code": bank_code,
                "narration": narration.unwrap_or(MOBILE_MONEY_NARRATION),
                "transaction_reference": reference,
                "sender": sender_block(),
            }],
        });

        if currency == Currency::Xof {
            if let Some(country) = country {
                service_payload["country"] = json!(country);
            }
        }

        let payload = json!({
            "transaction_type": "mobile_money",
            "service_payload": service_payload,
        });

        self.dispatch(payload, reference, "Mobile money payout failed")
            .await
    }

    /// Send a GHS bank transfer over the GhIPSS rail.
    pub async fn send_ghs_bank_transfer(
        &self,
        amount: f64,
        account_number: &str,
        account_name: &str,
        bank_code: &str,
        reference: &str,
        narration: Option<&str>,
    ) -> PayazaResult<TransactionStatus> {
        info!(reference, amount, "initiating GHS bank transfer");

        let account_reference = self.settlement_reference(Currency::Ghs).await?;

        let payload = json!({
            "transaction_type": "ghipps",
            "service_payload": {
                "payout_amount": amount,
                "transaction_pin": self.client.transaction_pin(),
                "account_reference": account_reference,
                "currency": Currency::Ghs.as_str(),
                "payout_beneficiaries": [{
                    "credit_amount": amount,
                    "account_number": account_number,
                    "account_name": account_name,
                    "bank_code": bank_code,
                    "narration": narration.unwrap_or(GHS_TRANSFER_NARRATION),
                    "transaction_reference": reference,
                    "sender": sender_block(),
                }],
            },
        });

        self.dispatch(payload, reference, "GHS bank transfer failed")
            .await
    }

    /// Poll a payout by reference. This endpoint answers in NIP settlement
    /// codes, not the generic gateway vocabulary.
    pub async fn status(&self, reference: &str) -> PayazaResult<TransactionStatus> {
        let base = self.client.url(Endpoint::PayoutStatus)?;
        let url = format!("{base}/{reference}");

        let response = self.client.get_json(&url, None, CONNECT_MESSAGE).await?;

        if !response.http_ok() || !response.status_flag_ok() {
            return Err(response.into_gateway_error("Failed to get transaction status"));
        }

        let state = TransactionState::from_nip_status(
            response
                .body
                .pointer("/data/transactionStatus")
                .and_then(Value::as_str),
        );

        Ok(TransactionStatus {
            transaction_id: reference.to_string(),
            state,
            raw: response.body,
        })
    }

    /// List the banks reachable for payouts in one country.
    pub async fn banks(&self, country_code: &str) -> PayazaResult<Vec<Bank>> {
        let base = self.client.url(Endpoint::PayoutBanks)?;
        let url = format!("{base}/{country_code}");

        let response = self.client.get_json(&url, None, CONNECT_MESSAGE).await?;

        if !response.http_ok() {
            return Err(response.into_gateway_error("Unable to fetch banks"));
        }

        let data = response.body.get("data").cloned().unwrap_or_else(|| json!([]));
        serde_json::from_value(data).map_err(|_| {
            PayazaError::gateway("Malformed bank list response", response.status, response.body)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn routes_payouts_by_currency() {
        assert_eq!(transaction_type(Currency::Ngn), "nuban");
        assert_eq!(transaction_type(Currency::Ghs), "ghipps");
        assert_eq!(transaction_type(Currency::Kes), "mobile_money");
        assert_eq!(transaction_type(Currency::Ugx), "mobile_money");
        assert_eq!(transaction_type(Currency::Tzs), "mobile_money");
        assert_eq!(transaction_type(Currency::Xof), "mobile_money");
        assert_eq!(transaction_type(Currency::Usd), "nuban");
    }
}
