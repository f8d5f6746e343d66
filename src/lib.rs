//! Client library for the Payaza payment gateway.
//!
//! Covers card charges, payouts and merchant account operations behind a
//! typed surface. One [`PayazaClient`] binds a single merchant credential and
//! environment (test or live); its resource clients build the gateway-shaped
//! payloads, route each call through the tenant-aware endpoint registry, and
//! normalize the gateway's mixed status vocabularies onto
//! [`TransactionState`].
//!
//! ```no_run
//! use payaza::{Card, ChargeOptions, Currency, PayazaClient, PayazaConfig};
//!
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! let config = PayazaConfig::from_env()?;
//! let client = PayazaClient::new(config)?;
//!
//! let card = Card::new("4242424242424242", 12, 27, "123");
//! let status = client
//!     .cards()
//!     .charge(100.0, &card, "ORDER-1001", Currency::Usd, ChargeOptions::default())
//!     .await?;
//!
//! println!("{}: {}", status.transaction_id, status.state);
//! # Ok(())
//! # }
//! ```
//!
//! This layer performs no retries and keeps no per-call mutable state; a
//! failed or timed-out exchange surfaces immediately as a typed
//! [`PayazaError`].

pub mod client;
pub mod config;
pub mod error;
pub mod resources;
pub mod status;
pub mod types;
pub mod urls;

mod response;

pub use client::PayazaClient;
pub use config::{AccountCredential, PayazaConfig};
pub use error::{PayazaError, PayazaResult};
pub use resources::{Accounts, Cards, ChargeAuth, ChargeOptions, Payouts};
pub use status::TransactionState;
pub use types::{
    AccountBalance, AccountNameResult, AccountSummary, Bank, Card, Currency, Environment,
    PayoutBeneficiary, Transaction, TransactionStatus,
};
pub use urls::{Endpoint, EndpointUrls};
