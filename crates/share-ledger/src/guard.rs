// share-ledger/src/guard.rs

use crate::{TokenError, TokenResult};
use serde::{Deserialize, Serialize};

/// Transition lifecycle for one token instance
///
/// Entry is only possible from `Idle`; release happens on every exit path,
/// success and failure alike.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransitionState {
    /// No mint or burn in progress
    Idle,
    /// A mint or burn transition holds the instance
    InTransition,
}

/// Serializes mint/burn transitions per token instance
///
/// A nested mint or burn triggered from inside a fund transfer finds the
/// guard in `InTransition` and is rejected with `ReentrantCall`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitionGuard {
    state: TransitionState,
}

impl TransitionGuard {
    pub fn new() -> Self {
        Self {
            state: TransitionState::Idle,
        }
    }

    pub fn state(&self) -> TransitionState {
        self.state
    }

    pub fn is_idle(&self) -> bool {
        self.state == TransitionState::Idle
    }

    /// Enter the critical section; fails unless the guard is idle
    pub(crate) fn enter(&mut self) -> TokenResult<()> {
        if self.state != TransitionState::Idle {
            return Err(TokenError::ReentrantCall);
        }
        self.state = TransitionState::InTransition;
        Ok(())
    }

    /// Leave the critical section; called on success and failure paths
    pub(crate) fn release(&mut self) {
        self.state = TransitionState::Idle;
    }
}

impl Default for TransitionGuard {
    fn default() -> Self {
        Self::new()
    }
}
