// share-ledger/src/events.rs

use curve_core::{Address, Amount, Timestamp, Units};
use serde::{Deserialize, Serialize};

/// Record of one committed transition
///
/// Events are appended only after a transition fully commits; a failed
/// mint or burn leaves no trace here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ShareEvent {
    /// Units issued against payment
    Minted {
        /// Receiving holder
        holder: Address,
        /// Units credited
        units: Units,
        /// Total cost routed to the reserve
        cost: Amount,
        /// Surplus returned to the holder
        refund: Amount,
        /// Total supply after the mint
        supply_after: Units,
        /// Timestamp
        timestamp: Timestamp,
    },

    /// Units redeemed for a payout
    Burned {
        /// Redeeming holder
        holder: Address,
        /// Units debited
        units: Units,
        /// Value paid out
        value: Amount,
        /// Total supply after the burn
        supply_after: Units,
        /// Timestamp
        timestamp: Timestamp,
    },
}

impl ShareEvent {
    /// Holder the event belongs to
    pub fn holder(&self) -> Address {
        match self {
            ShareEvent::Minted { holder, .. } => *holder,
            ShareEvent::Burned { holder, .. } => *holder,
        }
    }

    pub fn is_mint(&self) -> bool {
        matches!(self, ShareEvent::Minted { .. })
    }
}
