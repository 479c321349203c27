// curve-core/src/lib.rs

//! Shared primitive types for the share-curve workspace
//!
//! This crate provides:
//! - `Amount`: checked u128 value type for prices and reserve movements
//! - `Units`: unit counts on the issuance ledger
//! - `Address`: opaque 20-byte holder/reserve identity

pub mod address;
pub mod types;

pub use address::Address;
pub use types::{Amount, Timestamp, Units};

/// Result type for core operations
pub type CoreResult<T> = Result<T, CoreError>;

/// Errors that can occur in core type handling
#[derive(Debug, thiserror::Error)]
pub enum CoreError {
    #[error("Invalid address: {0}")]
    InvalidAddress(String),
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_basic_imports() {
        // Smoke test
    }
}
