// share-ledger/src/ledger.rs

use crate::{TokenError, TokenResult};
use curve_core::{Address, Units};
use curve_pricing::PricingError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Total issued supply plus per-holder balances
///
/// Mutation happens only by committing a `StagedTransition` produced by
/// `stage_credit`/`stage_debit`; a transition that fails before commit
/// leaves the ledger untouched. Outside an in-flight transition the sum of
/// all balances equals the total issued supply.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IssuanceLedger {
    total_issued: Units,
    balances: HashMap<Address, Units>,
}

/// Staged outcome of one mint or burn, committed only after settlement
#[derive(Debug, Clone, Copy)]
pub(crate) struct StagedTransition {
    holder: Address,
    balance_after: Units,
    total_after: Units,
}

impl IssuanceLedger {
    pub fn new() -> Self {
        Self {
            total_issued: 0,
            balances: HashMap::new(),
        }
    }

    pub fn total_supply(&self) -> Units {
        self.total_issued
    }

    pub fn balance_of(&self, holder: &Address) -> Units {
        self.balances.get(holder).copied().unwrap_or(0)
    }

    pub fn holder_count(&self) -> usize {
        self.balances.len()
    }

    /// Check the conservation invariant: Σ balances == total issued
    pub fn is_consistent(&self) -> bool {
        let sum: u128 = self.balances.values().map(|b| *b as u128).sum();
        sum == self.total_issued as u128
    }

    /// Stage crediting `amount` units to `holder`
    pub(crate) fn stage_credit(
        &self,
        holder: Address,
        amount: Units,
    ) -> TokenResult<StagedTransition> {
        let balance_after = self
            .balance_of(&holder)
            .checked_add(amount)
            .ok_or(PricingError::ArithmeticOverflow)?;
        let total_after = self
            .total_issued
            .checked_add(amount)
            .ok_or(PricingError::ArithmeticOverflow)?;
        Ok(StagedTransition {
            holder,
            balance_after,
            total_after,
        })
    }

    /// Stage debiting `amount` units from `holder`
    pub(crate) fn stage_debit(
        &self,
        holder: Address,
        amount: Units,
    ) -> TokenResult<StagedTransition> {
        let balance = self.balance_of(&holder);
        if balance < amount {
            return Err(TokenError::InsufficientBalance {
                required: amount,
                available: balance,
            });
        }
        // balance >= amount and total_issued >= balance, so neither
        // subtraction can wrap
        Ok(StagedTransition {
            holder,
            balance_after: balance - amount,
            total_after: self.total_issued - amount,
        })
    }

    /// Apply a staged transition; infallible by construction
    pub(crate) fn commit(&mut self, staged: StagedTransition) {
        if staged.balance_after == 0 {
            self.balances.remove(&staged.holder);
        } else {
            self.balances.insert(staged.holder, staged.balance_after);
        }
        self.total_issued = staged.total_after;
    }
}

impl Default for IssuanceLedger {
    fn default() -> Self {
        Self::new()
    }
}
