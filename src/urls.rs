//! Endpoint registry and tenant-aware URL resolution.
//!
//! Most Payaza endpoints live under a tenant-routed path
//! (`https://api.payaza.africa/{tenant}/...`), where the tenant segment is
//! `test` or `live`. The card-network endpoints are hosted on a fixed domain
//! and carry no placeholder; their templates resolve unchanged.

use std::collections::HashMap;

use crate::error::{PayazaError, PayazaResult};
use crate::types::Environment;

const TENANT_PLACEHOLDER: &str = "{tenant}";

/// Symbolic keys for every URL the client can call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Endpoint {
    CardCharge3ds,
    CardCharge2ds,
    CardStatus,
    CardRefund,
    CardRefundStatus,
    PayoutSend,
    PayoutStatus,
    PayoutBanks,
    AccountEnquiry,
    AccountInfo,
    AccountTransactions,
    AccountTransaction,
}

impl Endpoint {
    /// Configuration key, as used in the package config of the gateway SDKs.
    pub fn key(&self) -> &'static str {
        match self {
            Self::CardCharge3ds => "card_charge_3ds",
            Self::CardCharge2ds => "card_charge_2ds",
            Self::CardStatus => "card_status",
            Self::CardRefund => "card_refund",
            Self::CardRefundStatus => "card_refund_status",
            Self::PayoutSend => "payout_send",
            Self::PayoutStatus => "payout_status",
            Self::PayoutBanks => "payout_banks",
            Self::AccountEnquiry => "account_enquiry",
            Self::AccountInfo => "account_info",
            Self::AccountTransactions => "account_transactions",
            Self::AccountTransaction => "account_transaction",
        }
    }
}

/// Read-only mapping from endpoint key to URL template. Loaded once at
/// configuration time.
#[derive(Debug, Clone)]
pub struct EndpointUrls {
    templates: HashMap<Endpoint, String>,
}

impl Default for EndpointUrls {
    fn default() -> Self {
        Self::with_hosts("https://api.payaza.africa", "https://cards-live.78financials.com")
    }
}

impl EndpointUrls {
    /// Build the registry from an explicit template map. Missing entries
    /// surface as configuration errors at resolution time.
    pub fn from_templates(templates: HashMap<Endpoint, String>) -> Self {
        Self { templates }
    }

    /// Rebuild every template against a single base host, keeping the
    /// production paths and tenant placeholders. Used to point the client at
    /// a mock or self-hosted gateway.
    pub fn with_base(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        Self::with_hosts(base, base)
    }

    fn with_hosts(api: &str, cards: &str) -> Self {
        let mut templates = HashMap::new();
        templates.insert(Endpoint::CardCharge3ds, format!("{cards}/card_charge/"));
        templates.insert(
            Endpoint::CardCharge2ds,
            format!("{cards}/cards/mpgs/v1/2ds/card_charge"),
        );
        templates.insert(
            Endpoint::CardStatus,
            format!("{api}/{TENANT_PLACEHOLDER}/card/card_charge/transaction_status"),
        );
        templates.insert(Endpoint::CardRefund, format!("{cards}/card_charge/refund"));
        templates.insert(
            Endpoint::CardRefundStatus,
            format!("{cards}/card_charge/refund_status"),
        );
        templates.insert(
            Endpoint::PayoutSend,
            format!("{api}/{TENANT_PLACEHOLDER}/payout-receptor/payout"),
        );
        templates.insert(
            Endpoint::PayoutStatus,
            format!(
                "{api}/{TENANT_PLACEHOLDER}/payaza-account/api/v1/mainaccounts/merchant/transaction"
            ),
        );
        templates.insert(
            Endpoint::PayoutBanks,
            format!("{api}/{TENANT_PLACEHOLDER}/payout-receptor/banks"),
        );
        templates.insert(
            Endpoint::AccountEnquiry,
            format!(
                "{api}/{TENANT_PLACEHOLDER}/payaza-account/api/v1/mainaccounts/merchant/provider/enquiry"
            ),
        );
        templates.insert(
            Endpoint::AccountInfo,
            format!(
                "{api}/{TENANT_PLACEHOLDER}/payaza-account/api/v1/mainaccounts/merchant/enquiry/main"
            ),
        );
        templates.insert(
            Endpoint::AccountTransactions,
            format!(
                "{api}/{TENANT_PLACEHOLDER}/payaza-account/api/v1/mainaccounts/merchant/transactions"
            ),
        );
        templates.insert(
            Endpoint::AccountTransaction,
            format!(
                "{api}/{TENANT_PLACEHOLDER}/payaza-account/api/v1/mainaccounts/merchant/transaction"
            ),
        );
        Self { templates }
    }

    /// Override a single endpoint template.
    pub fn set(&mut self, endpoint: Endpoint, template: impl Into<String>) {
        self.templates.insert(endpoint, template.into());
    }

    /// Resolve an endpoint to a fully-qualified URL for the given
    /// environment. Only the first `{tenant}` occurrence is substituted;
    /// placeholder-free templates come back unchanged.
    pub fn resolve(&self, endpoint: Endpoint, environment: Environment) -> PayazaResult<String> {
        let template = self.templates.get(&endpoint).ok_or_else(|| {
            PayazaError::configuration(format!(
                "URL configuration for '{}' not found",
                endpoint.key()
            ))
        })?;

        Ok(template.replacen(TENANT_PLACEHOLDER, environment.tenant(), 1))
    }
}
