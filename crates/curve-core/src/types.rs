// curve-core/src/types.rs

use serde::{Deserialize, Serialize};

/// Count of issued share units
pub type Units = u64;

/// Timestamp in Unix epoch seconds
pub type Timestamp = u64;

/// Value amount (prices, payments, reserve movements)
///
/// Backed by u128 so that a full batch cost over a u64 unit count cannot
/// overflow silently; every arithmetic operation is checked and overflow
/// must be surfaced by the caller as an explicit failure.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Amount(u128);

impl Amount {
    pub fn new(value: u128) -> Self {
        Self(value)
    }

    pub fn zero() -> Self {
        Self(0)
    }

    pub fn from_u64(value: u64) -> Self {
        Self(value as u128)
    }

    pub fn from_units(units: Units) -> Self {
        Self(units as u128)
    }

    pub fn inner(&self) -> u128 {
        self.0
    }

    pub fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_add(other.0).map(Amount)
    }

    pub fn checked_sub(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_sub(other.0).map(Amount)
    }

    pub fn checked_mul(&self, other: &Amount) -> Option<Amount> {
        self.0.checked_mul(other.0).map(Amount)
    }

    /// Scale by a unit count (slope × supply, slope × step index)
    pub fn checked_mul_units(&self, units: Units) -> Option<Amount> {
        self.0.checked_mul(units as u128).map(Amount)
    }
}

impl std::fmt::Display for Amount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
