// curve-pricing/src/curve.rs

use crate::{PricingError, PricingResult};
use curve_core::{Amount, Units};
use serde::{Deserialize, Serialize};

/// Parameters of the linear curve: price = base_price + slope × supply
///
/// Both parameters are strictly positive and immutable after construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurveParams {
    base_price: Amount,
    slope: Amount,
}

impl CurveParams {
    /// Validate and construct curve parameters
    pub fn new(base_price: Amount, slope: Amount) -> PricingResult<Self> {
        if base_price.is_zero() {
            return Err(PricingError::InvalidBasePrice);
        }
        if slope.is_zero() {
            return Err(PricingError::InvalidSlope);
        }
        Ok(Self { base_price, slope })
    }

    pub fn base_price(&self) -> Amount {
        self.base_price
    }

    pub fn slope(&self) -> Amount {
        self.slope
    }

    /// Marginal unit price at the given supply level
    ///
    /// Strictly increasing in `supply` since slope > 0. Pure; the only
    /// failure mode is overflow of the fixed-size representation.
    pub fn price_at(&self, supply: Units) -> PricingResult<Amount> {
        let scaled = self
            .slope
            .checked_mul_units(supply)
            .ok_or(PricingError::ArithmeticOverflow)?;
        self.base_price
            .checked_add(&scaled)
            .ok_or(PricingError::ArithmeticOverflow)
    }
}
