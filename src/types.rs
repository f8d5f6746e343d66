//! Domain types shared across the resource clients.

use std::fmt;
use std::str::FromStr;

use serde::Deserialize;

use crate::status::TransactionState;

/// Gateway environment. Selects the tenant path segment injected into
/// templated URLs and the `x-TenantID` header value. Fixed per client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Environment {
    #[default]
    Test,
    Live,
}

impl Environment {
    /// The tenant segment substituted into URL templates.
    pub fn tenant(&self) -> &'static str {
        match self {
            Self::Test => "test",
            Self::Live => "live",
        }
    }
}

impl FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "live" => Ok(Self::Live),
            "test" => Ok(Self::Test),
            other => Err(format!("Environment must be 'test' or 'live', got {other}")),
        }
    }
}

impl fmt::Display for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tenant())
    }
}

/// Supported settlement currencies. Doubles as the payout routing key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Currency {
    Usd,
    Ngn,
    Ghs,
    Xof,
    Kes,
    Ugx,
    Tzs,
}

impl Currency {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Usd => "USD",
            Self::Ngn => "NGN",
            Self::Ghs => "GHS",
            Self::Xof => "XOF",
            Self::Kes => "KES",
            Self::Ugx => "UGX",
            Self::Tzs => "TZS",
        }
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A card expiry component, normalized to an exactly-two-digit zero-padded
/// string no matter how the caller spelled it (`7`, `"7"`, `"07"`, `2027`).
#[derive(Clone, PartialEq, Eq)]
pub struct ExpiryPart(String);

impl ExpiryPart {
    fn normalize(digits: &str) -> String {
        let digits: String = digits.chars().filter(|c| c.is_ascii_digit()).collect();
        // Keep the last two digits so four-digit years collapse to their
        // two-digit form, then left-pad single digits.
        let tail = if digits.len() > 2 {
            &digits[digits.len() - 2..]
        } else {
            digits.as_str()
        };
        format!("{tail:0>2}")
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<u32> for ExpiryPart {
    fn from(value: u32) -> Self {
        Self(Self::normalize(&value.to_string()))
    }
}

impl From<u8> for ExpiryPart {
    fn from(value: u8) -> Self {
        Self::from(value as u32)
    }
}

impl From<u16> for ExpiryPart {
    fn from(value: u16) -> Self {
        Self::from(value as u32)
    }
}

impl From<i32> for ExpiryPart {
    fn from(value: i32) -> Self {
        Self::from(value.unsigned_abs())
    }
}

impl From<&str> for ExpiryPart {
    fn from(value: &str) -> Self {
        Self(Self::normalize(value))
    }
}

impl From<String> for ExpiryPart {
    fn from(value: String) -> Self {
        Self::from(value.as_str())
    }
}

/// Raw card details for a charge. Constructed fresh per call, passed through
/// to the gateway in a single request and never persisted or logged.
#[derive(Clone)]
pub struct Card {
    number: String,
    expiry_month: String,
    expiry_year: String,
    cvc: String,
}

impl Card {
    pub fn new(
        number: impl Into<String>,
        expiry_month: impl Into<ExpiryPart>,
        expiry_year: impl Into<ExpiryPart>,
        cvc: impl Into<String>,
    ) -> Self {
        Self {
            number: number.into(),
            expiry_month: expiry_month.into().0,
            expiry_year: expiry_year.into().0,
            cvc: cvc.into(),
        }
    }

    pub fn number(&self) -> &str {
        &self.number
    }

    pub fn expiry_month(&self) -> &str {
        &self.expiry_month
    }

    pub fn expiry_year(&self) -> &str {
        &self.expiry_year
    }

    pub fn cvc(&self) -> &str {
        &self.cvc
    }
}

// PAN and CVC must not leak through debug logging.
impl fmt::Debug for Card {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let masked: String = self
            .number
            .chars()
            .rev()
            .take(4)
            .collect::<Vec<_>>()
            .into_iter()
            .rev()
            .collect();
        f.debug_struct("Card")
            .field("number", &format_args!("****{masked}"))
            .field("expiry_month", &self.expiry_month)
            .field("expiry_year", &self.expiry_year)
            .field("cvc", &"***")
            .finish()
    }
}

/// Recipient of a single payout. One beneficiary maps to exactly one payout
/// request.
#[derive(Debug, Clone)]
pub struct PayoutBeneficiary {
    pub account_name: String,
    pub account_number: String,
    pub bank_code: String,
    pub amount: f64,
    pub currency: Currency,
    pub narration: Option<String>,
}

impl PayoutBeneficiary {
    pub fn new(
        account_name: impl Into<String>,
        account_number: impl Into<String>,
        bank_code: impl Into<String>,
        amount: f64,
        currency: Currency,
    ) -> Self {
        Self {
            account_name: account_name.into(),
            account_number: account_number.into(),
            bank_code: bank_code.into(),
            amount,
            currency,
            narration: None,
        }
    }

    pub fn with_narration(mut self, narration: impl Into<String>) -> Self {
        self.narration = Some(narration.into());
        self
    }
}

/// Result of a money-moving operation.
///
/// `transaction_id` always echoes the caller-supplied reference; upstream ids
/// are available through `raw` but are never used for result identity.
#[derive(Debug, Clone)]
pub struct TransactionStatus {
    pub transaction_id: String,
    pub state: TransactionState,
    /// Verbatim upstream response body, kept for caller inspection.
    pub raw: serde_json::Value,
}

/// One merchant settlement account as reported by the account-list endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct AccountSummary {
    #[serde(rename = "payazaAccountReference", default)]
    pub account_reference: Option<String>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(rename = "accountBalance", default)]
    pub account_balance: Option<f64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
}

/// Balance of the settlement account matching a requested currency.
#[derive(Debug, Clone, PartialEq)]
pub struct AccountBalance {
    pub available_balance: f64,
    pub currency: Currency,
    pub account_reference: String,
}

/// Outcome of a beneficiary account name enquiry.
///
/// An unknown or inactive account is a routine business answer, not an error:
/// it comes back with `account_status == "INVALID"` and no resolved name.
#[derive(Debug, Clone)]
pub struct AccountNameResult {
    pub account_name: Option<String>,
    pub account_status: String,
    pub account_number: String,
    pub bank_code: String,
    pub error_message: Option<String>,
}

impl AccountNameResult {
    pub const STATUS_INVALID: &'static str = "INVALID";

    pub fn is_valid(&self) -> bool {
        self.account_status != Self::STATUS_INVALID
    }
}

/// A bank reachable through the payout rails of one country.
#[derive(Debug, Clone, Deserialize)]
pub struct Bank {
    pub code: String,
    pub name: String,
}

/// A ledger entry from the merchant transaction history.
#[derive(Debug, Clone, Deserialize)]
pub struct Transaction {
    pub id: String,
    pub amount: f64,
    #[serde(default)]
    pub status: Option<String>,
}
