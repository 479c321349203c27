// share-ledger/src/token.rs

use crate::{
    events::ShareEvent,
    guard::TransitionGuard,
    ledger::IssuanceLedger,
    settlement::{FundTransfer, SettlementGateway},
    TokenError, TokenResult,
};
use curve_core::{Address, Amount, Timestamp, Units};
use curve_pricing::{integrator, CurveParams, PricingError};
use serde::{Deserialize, Serialize};

/// Result of a committed mint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintOutcome {
    /// Cost routed to the reserve sink
    pub cost: Amount,
    /// Surplus returned to the caller
    pub refund: Amount,
}

/// Result of a committed burn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BurnOutcome {
    /// Value paid out to the caller
    pub value: Amount,
}

/// Snapshot of the token's observable state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenStats {
    pub current_price: Amount,
    pub total_supply: Units,
    pub holders: usize,
    pub reserve_collected: Amount,
    pub reserve_paid: Amount,
}

/// Linear bonding-curve share token
///
/// Couples the pricing curve to the issuance ledger through atomic,
/// guarded transitions: every mint or burn either fully commits (supply,
/// balance and fund movement together) or leaves no state change at all.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShareToken {
    name: String,
    symbol: String,
    params: CurveParams,
    gateway: SettlementGateway,
    ledger: IssuanceLedger,
    guard: TransitionGuard,
    /// Cumulative value routed to the reserve by mints
    reserve_collected: Amount,
    /// Cumulative value paid out by burns
    reserve_paid: Amount,
    events: Vec<ShareEvent>,
    deployed_at: Timestamp,
}

impl ShareToken {
    /// Construct a new token
    ///
    /// Fails with `InvalidReserve` for a zero reserve sink and with
    /// `InvalidBasePrice`/`InvalidSlope` for zero curve parameters. Name
    /// and symbol must be non-empty; the symbol is capped at 10 chars.
    pub fn new(
        name: impl Into<String>,
        symbol: impl Into<String>,
        reserve: Address,
        base_price: Amount,
        slope: Amount,
    ) -> TokenResult<Self> {
        let name = name.into();
        let symbol = symbol.into();
        if name.is_empty() {
            return Err(TokenError::InvalidParameters("Name cannot be empty".into()));
        }
        if symbol.is_empty() {
            return Err(TokenError::InvalidParameters(
                "Symbol cannot be empty".into(),
            ));
        }
        if symbol.len() > 10 {
            return Err(TokenError::InvalidParameters(
                "Symbol too long (max 10)".into(),
            ));
        }

        let gateway = SettlementGateway::new(reserve)?;
        let params = CurveParams::new(base_price, slope)?;

        Ok(Self {
            name,
            symbol,
            params,
            gateway,
            ledger: IssuanceLedger::new(),
            guard: TransitionGuard::new(),
            reserve_collected: Amount::zero(),
            reserve_paid: Amount::zero(),
            events: Vec::new(),
            deployed_at: current_timestamp(),
        })
    }

    // === Queries ===

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn symbol(&self) -> &str {
        &self.symbol
    }

    pub fn reserve_sink(&self) -> Address {
        self.gateway.reserve()
    }

    pub fn params(&self) -> &CurveParams {
        &self.params
    }

    pub fn deployed_at(&self) -> Timestamp {
        self.deployed_at
    }

    /// Marginal price of the next unit at the current supply
    pub fn current_price(&self) -> TokenResult<Amount> {
        Ok(self.params.price_at(self.ledger.total_supply())?)
    }

    /// Total cost of minting `amount` units at the current supply
    pub fn mint_cost(&self, amount: Units) -> TokenResult<Amount> {
        Ok(integrator::mint_cost(
            &self.params,
            self.ledger.total_supply(),
            amount,
        )?)
    }

    /// Total value of burning `amount` units at the current supply
    pub fn burn_value(&self, amount: Units) -> TokenResult<Amount> {
        Ok(integrator::burn_value(
            &self.params,
            self.ledger.total_supply(),
            amount,
        )?)
    }

    pub fn balance_of(&self, holder: &Address) -> Units {
        self.ledger.balance_of(holder)
    }

    pub fn total_supply(&self) -> Units {
        self.ledger.total_supply()
    }

    pub fn ledger(&self) -> &IssuanceLedger {
        &self.ledger
    }

    pub fn events(&self) -> &[ShareEvent] {
        &self.events
    }

    pub fn stats(&self) -> TokenResult<TokenStats> {
        Ok(TokenStats {
            current_price: self.current_price()?,
            total_supply: self.ledger.total_supply(),
            holders: self.ledger.holder_count(),
            reserve_collected: self.reserve_collected,
            reserve_paid: self.reserve_paid,
        })
    }

    // === Transitions ===

    /// Mint `amount` units for `caller`, paying with `supplied`
    ///
    /// The required cost flows to the reserve sink and any surplus is
    /// refunded through the rail before the ledger credit commits. Every
    /// failure aborts the whole transition with no state change.
    pub fn mint(
        &mut self,
        rail: &mut dyn FundTransfer,
        caller: Address,
        amount: Units,
        supplied: Amount,
    ) -> TokenResult<MintOutcome> {
        self.guard.enter()?;
        let result = self.mint_in_transition(rail, caller, amount, supplied);
        self.guard.release();
        result
    }

    fn mint_in_transition(
        &mut self,
        rail: &mut dyn FundTransfer,
        caller: Address,
        amount: Units,
        supplied: Amount,
    ) -> TokenResult<MintOutcome> {
        if amount == 0 {
            return Err(TokenError::ZeroAmount);
        }

        let cost = integrator::mint_cost(&self.params, self.ledger.total_supply(), amount)?;
        let staged = self.ledger.stage_credit(caller, amount)?;
        let collected_after = self
            .reserve_collected
            .checked_add(&cost)
            .ok_or(PricingError::ArithmeticOverflow)?;

        let gateway = self.gateway;
        let refund = gateway.collect_and_refund(rail, self, caller, cost, supplied)?;

        // Settlement succeeded on both legs; commit the staged state
        self.ledger.commit(staged);
        self.reserve_collected = collected_after;
        self.events.push(ShareEvent::Minted {
            holder: caller,
            units: amount,
            cost,
            refund,
            supply_after: self.ledger.total_supply(),
            timestamp: current_timestamp(),
        });

        tracing::debug!(
            "Minted {} units of {} for {} (cost {}, refund {})",
            amount,
            self.symbol,
            caller,
            cost,
            refund
        );

        Ok(MintOutcome { cost, refund })
    }

    /// Burn `amount` of `caller`'s units and pay out the curve value
    ///
    /// The value is computed from the pre-burn supply; the debit commits
    /// only after the payout leg succeeds.
    pub fn burn(
        &mut self,
        rail: &mut dyn FundTransfer,
        caller: Address,
        amount: Units,
    ) -> TokenResult<BurnOutcome> {
        self.guard.enter()?;
        let result = self.burn_in_transition(rail, caller, amount);
        self.guard.release();
        result
    }

    fn burn_in_transition(
        &mut self,
        rail: &mut dyn FundTransfer,
        caller: Address,
        amount: Units,
    ) -> TokenResult<BurnOutcome> {
        if amount == 0 {
            return Err(TokenError::ZeroAmount);
        }

        let staged = self.ledger.stage_debit(caller, amount)?;
        let value = integrator::burn_value(&self.params, self.ledger.total_supply(), amount)?;
        let paid_after = self
            .reserve_paid
            .checked_add(&value)
            .ok_or(PricingError::ArithmeticOverflow)?;

        let gateway = self.gateway;
        gateway.payout(rail, self, caller, value)?;

        self.ledger.commit(staged);
        self.reserve_paid = paid_after;
        self.events.push(ShareEvent::Burned {
            holder: caller,
            units: amount,
            value,
            supply_after: self.ledger.total_supply(),
            timestamp: current_timestamp(),
        });

        tracing::debug!(
            "Burned {} units of {} for {} (value {})",
            amount,
            self.symbol,
            caller,
            value
        );

        Ok(BurnOutcome { value })
    }
}

/// Helper to get current timestamp
fn current_timestamp() -> Timestamp {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .unwrap()
        .as_secs()
}
