//! Merchant account operations: balances, name enquiry, transaction history.

use serde_json::{json, Value};
use tracing::{info, warn};

use crate::client::PayazaClient;
use crate::error::{PayazaError, PayazaResult};
use crate::response::{is_invalid_account, GatewayResponse};
use crate::types::{AccountBalance, AccountNameResult, AccountSummary, Currency, Transaction};
use crate::urls::Endpoint;

const CONNECT_MESSAGE: &str = "Connection timeout - account service not responding";

pub struct Accounts<'a> {
    client: &'a PayazaClient,
}

impl<'a> Accounts<'a> {
    pub(crate) fn new(client: &'a PayazaClient) -> Self {
        Self { client }
    }

    /// Fetch the full merchant account list. Always a fresh upstream call:
    /// settlement references and balances are never cached, trading an extra
    /// round trip for correctness.
    pub(crate) async fn account_list(
        &self,
    ) -> PayazaResult<(Vec<AccountSummary>, GatewayResponse)> {
        let url = self.client.url(Endpoint::AccountInfo)?;
        let response = self.client.get_json(&url, None, CONNECT_MESSAGE).await?;

        if !response.http_ok() || !response.status_flag_ok() {
            return Err(response.into_gateway_error("Unable to fetch account information"));
        }

        let data = response.body.get("data").cloned().unwrap_or_else(|| json!([]));
        let summaries = serde_json::from_value(data).map_err(|e| {
            warn!(error = %e, "account list did not match the expected shape");
            PayazaError::gateway(
                "Malformed account information response",
                response.status,
                response.body.clone(),
            )
        })?;

        Ok((summaries, response))
    }

    /// Balances of every settlement account held by this merchant.
    pub async fn balance(&self) -> PayazaResult<Vec<AccountSummary>> {
        let (summaries, _) = self.account_list().await?;
        Ok(summaries)
    }

    /// Balance of the settlement account for one currency.
    pub async fn balance_for(&self, currency: Currency) -> PayazaResult<AccountBalance> {
        let (summaries, response) = self.account_list().await?;

        let summary = summaries
            .into_iter()
            .find(|account| account.currency.as_deref() == Some(currency.as_str()))
            .ok_or_else(|| {
                PayazaError::gateway(
                    format!("No account found for currency {currency}"),
                    response.status,
                    response.body,
                )
            })?;

        Ok(AccountBalance {
            available_balance: summary.account_balance.unwrap_or(0.0),
            currency,
            account_reference: summary.account_reference.unwrap_or_default(),
        })
    }

    /// Resolve the name behind a beneficiary bank account.
    ///
    /// An unknown or inactive account is an expected business answer for this
    /// endpoint and is returned as a result with `account_status ==
    /// "INVALID"`, not raised as an error.
    pub async fn account_name_enquiry(
        &self,
        account_number: &str,
        bank_code: &str,
        currency: Option<Currency>,
    ) -> PayazaResult<AccountNameResult> {
        let currency = currency.unwrap_or(Currency::Ngn);
        let url = self.client.url(Endpoint::AccountEnquiry)?;
        let payload = json!({
            "service_payload": {
                "account_number": account_number,
                "bank_code": bank_code,
                "currency": currency.as_str(),
            }
        });

        let response = self.client.post_json(&url, &payload, CONNECT_MESSAGE).await?;

        if !response.http_ok() || !response.response_code_ok() {
            if is_invalid_account(&response.body) {
                info!(account_number, bank_code, "name enquiry resolved to an invalid account");
                return Ok(AccountNameResult {
                    account_name: None,
                    account_status: AccountNameResult::STATUS_INVALID.to_string(),
                    account_number: account_number.to_string(),
                    bank_code: bank_code.to_string(),
                    error_message: Some(response.message_or("Invalid account")),
                });
            }
            return Err(response.into_gateway_error("Account name enquiry failed"));
        }

        let content = response
            .body
            .get("response_content")
            .cloned()
            .unwrap_or_else(|| response.body.clone());

        Ok(AccountNameResult {
            account_name: content
                .get("account_name")
                .and_then(Value::as_str)
                .map(str::to_string),
            account_status: content
                .get("account_status")
                .and_then(Value::as_str)
                .unwrap_or("ACTIVE")
                .to_string(),
            account_number: account_number.to_string(),
            bank_code: bank_code.to_string(),
            error_message: None,
        })
    }

    /// Raw settlement-account summaries, including their upstream references.
    pub async fn payaza_accounts_info(&self) -> PayazaResult<Vec<AccountSummary>> {
        let (summaries, _) = self.account_list().await?;
        Ok(summaries)
    }

    /// Page through the merchant transaction history.
    pub async fn transactions(&self, page: u32, limit: u32) -> PayazaResult<Vec<Transaction>> {
        let url = self.client.url(Endpoint::AccountTransactions)?;
        let query = [
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];

        let response = self
            .client
            .get_json(&url, Some(&query), CONNECT_MESSAGE)
            .await?;

        if !response.http_ok() {
            return Err(response.into_gateway_error("Unable to fetch transactions"));
        }

        // The history endpoint has shipped both `data.transactions: [...]`
        // and a bare `data: [...]`.
        let data = response.body.get("data").cloned().unwrap_or(Value::Null);
        let entries = if let Some(list) = data.get("transactions") {
            list.clone()
        } else if data.is_array() {
            data
        } else {
            json!([])
        };

        serde_json::from_value(entries).map_err(|_| {
            PayazaError::gateway(
                "Malformed transaction list response",
                response.status,
                response.body,
            )
        })
    }

    /// Fetch a single transaction by its gateway id.
    pub async fn transaction(&self, transaction_id: &str) -> PayazaResult<Transaction> {
        let base = self.client.url(Endpoint::AccountTransaction)?;
        let url = format!("{base}/{transaction_id}");

        let response = self.client.get_json(&url, None, CONNECT_MESSAGE).await?;

        if !response.http_ok() {
            return Err(response.into_gateway_error("Unable to fetch transaction"));
        }

        let data = response.body.get("data").cloned().unwrap_or(Value::Null);
        serde_json::from_value(data).map_err(|_| {
            PayazaError::gateway(
                "Malformed transaction response",
                response.status,
                response.body,
            )
        })
    }
}
