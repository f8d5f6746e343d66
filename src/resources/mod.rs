//! Resource clients: one module per gateway surface.

pub mod accounts;
pub mod cards;
pub mod payouts;

pub use accounts::Accounts;
pub use cards::{Cards, ChargeAuth, ChargeOptions};
pub use payouts::Payouts;
