// curve-pricing/src/lib.rs

//! Linear bonding-curve pricing
//!
//! This crate provides:
//! - `CurveParams`: validated base price and slope of the linear curve
//! - `curve::price_at`: marginal unit price at a given supply
//! - `integrator`: batch cost/value over a contiguous run of units
//!
//! All arithmetic is checked; overflow and underflow surface as errors
//! instead of wrapping.

pub mod curve;
pub mod integrator;

pub use curve::CurveParams;
pub use integrator::{burn_value, mint_cost};

/// Result type for pricing operations
pub type PricingResult<T> = Result<T, PricingError>;

/// Errors that can occur in pricing operations
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum PricingError {
    #[error("Base price must be greater than zero")]
    InvalidBasePrice,

    #[error("Slope must be greater than zero")]
    InvalidSlope,

    #[error("Arithmetic overflow in curve computation")]
    ArithmeticOverflow,

    #[error("Arithmetic underflow in curve computation")]
    ArithmeticUnderflow,
}
