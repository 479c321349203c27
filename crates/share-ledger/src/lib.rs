// share-ledger/src/lib.rs

//! Share issuance ledger and settlement
//!
//! This crate implements the mutable half of the share-curve system:
//! - `IssuanceLedger`: total supply and per-holder balances
//! - `SettlementGateway`: reserve routing and overpayment refunds
//! - `TransitionGuard`: reentrancy protection around mint/burn
//! - `ShareToken`: the contract facade tying pricing and settlement into
//!   atomic, all-or-nothing transitions

pub mod events;
pub mod guard;
pub mod ledger;
pub mod settlement;
pub mod token;

pub use events::ShareEvent;
pub use guard::{TransitionGuard, TransitionState};
pub use ledger::IssuanceLedger;
pub use settlement::{FundTransfer, MemoryVault, SettlementGateway};
pub use token::{BurnOutcome, MintOutcome, ShareToken, TokenStats};

use curve_core::{Amount, Units};

/// Result type for token operations
pub type TokenResult<T> = Result<T, TokenError>;

/// Errors that can occur in token operations
#[derive(Debug, thiserror::Error)]
pub enum TokenError {
    #[error("Reserve sink must not be the zero address")]
    InvalidReserve,

    #[error("Invalid parameters: {0}")]
    InvalidParameters(String),

    #[error("Amount must be greater than zero")]
    ZeroAmount,

    #[error("Insufficient funds: required {required}, supplied {supplied}")]
    InsufficientFunds { required: Amount, supplied: Amount },

    #[error("Insufficient balance: required {required}, available {available}")]
    InsufficientBalance { required: Units, available: Units },

    #[error("Reentrant call rejected")]
    ReentrantCall,

    #[error("Fund transfer failed: {0}")]
    TransferFailed(String),

    #[error("Pricing error: {0}")]
    Pricing(#[from] curve_pricing::PricingError),
}
