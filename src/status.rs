//! Canonical transaction states and the mappings from upstream status strings.
//!
//! Two separate upstream systems report transaction progress and they do not
//! share a vocabulary: the card/payout gateway uses lower-case words
//! ("successful", "processing", ...) while the payout status-polling service
//! reports NIP codes ("NIP_SUCCESS", ...). The two mappings are kept as
//! distinct total functions and the resource client picks the one matching
//! the endpoint it just called.

use std::fmt;

/// The only status vocabulary callers ever need to branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TransactionState {
    Pending,
    Processing,
    Successful,
    Failed,
}

impl TransactionState {
    /// Map a gateway status string (cards, generic payouts). Case-insensitive.
    ///
    /// Unknown or missing input maps to `Pending`: absence of information is
    /// not evidence of failure.
    pub fn from_gateway_status(raw: Option<&str>) -> Self {
        match raw.unwrap_or("pending").to_ascii_lowercase().as_str() {
            "completed" | "successful" => Self::Successful,
            "processing" | "initialized" | "transaction_initiated" => Self::Processing,
            "failed" => Self::Failed,
            _ => Self::Pending,
        }
    }

    /// Map a NIP settlement code from the payout status-polling endpoint.
    /// Exact match, case-sensitive; anything unrecognized maps to `Pending`.
    pub fn from_nip_status(raw: Option<&str>) -> Self {
        match raw.unwrap_or("") {
            "NIP_SUCCESS" => Self::Successful,
            "NIP_PENDING" | "TRANSACTION_INITIATED" => Self::Processing,
            "NIP_FAILURE" => Self::Failed,
            _ => Self::Pending,
        }
    }

    /// Whether this state is final (no further polling will change it).
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Successful | Self::Failed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::Processing => "PROCESSING",
            Self::Successful => "SUCCESSFUL",
            Self::Failed => "FAILED",
        }
    }
}

impl fmt::Display for TransactionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gateway_statuses_map_case_insensitively() {
        assert_eq!(
            TransactionState::from_gateway_status(Some("Completed")),
            TransactionState::Successful
        );
        assert_eq!(
            TransactionState::from_gateway_status(Some("SUCCESSFUL")),
            TransactionState::Successful
        );
        assert_eq!(
            TransactionState::from_gateway_status(Some("processing")),
            TransactionState::Processing
        );
        assert_eq!(
            TransactionState::from_gateway_status(Some("initialized")),
            TransactionState::Processing
        );
        assert_eq!(
            TransactionState::from_gateway_status(Some("TRANSACTION_INITIATED")),
            TransactionState::Processing
        );
        assert_eq!(
            TransactionState::from_gateway_status(Some("failed")),
            TransactionState::Failed
        );
    }

    #[test]
    fn unknown_gateway_status_defaults_to_pending() {
        assert_eq!(
            TransactionState::from_gateway_status(Some("reversed")),
            TransactionState::Pending
        );
        assert_eq!(
            TransactionState::from_gateway_status(Some("")),
            TransactionState::Pending
        );
        assert_eq!(
            TransactionState::from_gateway_status(None),
            TransactionState::Pending
        );
    }

    #[test]
    fn nip_codes_map_exactly() {
        assert_eq!(
            TransactionState::from_nip_status(Some("NIP_SUCCESS")),
            TransactionState::Successful
        );
        assert_eq!(
            TransactionState::from_nip_status(Some("NIP_PENDING")),
            TransactionState::Processing
        );
        assert_eq!(
            TransactionState::from_nip_status(Some("TRANSACTION_INITIATED")),
            TransactionState::Processing
        );
        assert_eq!(
            TransactionState::from_nip_status(Some("NIP_FAILURE")),
            TransactionState::Failed
        );
    }

    #[test]
    fn nip_mapping_is_case_sensitive() {
        assert_eq!(
            TransactionState::from_nip_status(Some("nip_success")),
            TransactionState::Pending
        );
        assert_eq!(
            TransactionState::from_nip_status(None),
            TransactionState::Pending
        );
    }

    #[test]
    fn terminal_states() {
        assert!(TransactionState::Successful.is_terminal());
        assert!(TransactionState::Failed.is_terminal());
        assert!(!TransactionState::Pending.is_terminal());
        assert!(!TransactionState::Processing.is_terminal());
    }
}
