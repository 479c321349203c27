// curve-pricing/src/integrator.rs

//! Batch integration over a contiguous run of units
//!
//! Both operations evaluate the marginal price once at the pre-transition
//! supply and then step by the slope per unit. The mint and burn sums are
//! intentionally not inverses of each other for batches larger than one
//! unit; the burn side walks *down* from the current top-of-curve price.
//! This asymmetry is the pricing policy and must not be "corrected".

use crate::{CurveParams, PricingError, PricingResult};
use curve_core::{Amount, Units};

/// Total cost of minting `amount` units at pre-mint supply `supply_before`
///
/// total = Σ_{i=0}^{amount-1} (price_at(supply_before) + slope × i)
pub fn mint_cost(
    params: &CurveParams,
    supply_before: Units,
    amount: Units,
) -> PricingResult<Amount> {
    if amount == 0 {
        return Ok(Amount::zero());
    }

    let current_price = params.price_at(supply_before)?;
    let mut total = Amount::zero();
    for i in 0..amount {
        let step = params
            .slope()
            .checked_mul_units(i)
            .ok_or(PricingError::ArithmeticOverflow)?;
        let term = current_price
            .checked_add(&step)
            .ok_or(PricingError::ArithmeticOverflow)?;
        total = total
            .checked_add(&term)
            .ok_or(PricingError::ArithmeticOverflow)?;
    }
    Ok(total)
}

/// Total value of burning `amount` units at pre-burn supply `supply_before`
///
/// total = Σ_{i=0}^{amount-1} (price_at(supply_before) − slope × i)
///
/// No bounds check of `amount` against `supply_before` happens here; that
/// is the issuance ledger's responsibility. If a step drops below zero the
/// call fails with `ArithmeticUnderflow` rather than clamping.
pub fn burn_value(
    params: &CurveParams,
    supply_before: Units,
    amount: Units,
) -> PricingResult<Amount> {
    if amount == 0 {
        return Ok(Amount::zero());
    }

    let current_price = params.price_at(supply_before)?;
    let mut total = Amount::zero();
    for i in 0..amount {
        let step = params
            .slope()
            .checked_mul_units(i)
            .ok_or(PricingError::ArithmeticOverflow)?;
        let term = current_price
            .checked_sub(&step)
            .ok_or(PricingError::ArithmeticUnderflow)?;
        total = total
            .checked_add(&term)
            .ok_or(PricingError::ArithmeticOverflow)?;
    }
    Ok(total)
}
