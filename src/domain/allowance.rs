//! ERC-20 allowance snapshots.

use alloy_primitives::{Address, U256};
use serde::Serialize;

/// Result of the last on-chain `allowance(owner, spender)` read.
///
/// Stale until explicitly refetched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AllowanceState {
    pub owner: Address,
    pub spender: Address,
    pub amount: U256,
}

impl AllowanceState {
    /// Whether the spender may pull `required` from the owner.
    #[must_use]
    pub fn covers(&self, required: U256) -> bool {
        self.amount >= required
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn state(amount: u64) -> AllowanceState {
        AllowanceState {
            owner: Address::repeat_byte(0xab),
            spender: Address::repeat_byte(0x11),
            amount: U256::from(amount),
        }
    }

    #[test]
    fn equal_allowance_covers_fee() {
        assert!(state(1_000_000).covers(U256::from(1_000_000u64)));
    }

    #[test]
    fn smaller_allowance_does_not_cover_fee() {
        assert!(!state(999_999).covers(U256::from(1_000_000u64)));
    }

    #[test]
    fn any_allowance_covers_zero_fee() {
        assert!(state(0).covers(U256::ZERO));
    }
}
