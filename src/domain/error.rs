//! Domain validation errors for market creation proposals.
//!
//! These errors are returned by [`MarketCreationProposal::validate_at`] when a
//! proposal supplied by an upstream agent cannot possibly produce a valid
//! `createMarket` call.
//!
//! [`MarketCreationProposal::validate_at`]: crate::domain::MarketCreationProposal::validate_at
//!
//! # Examples
//!
//! ```
//! use bizfun::domain::error::DomainError;
//!
//! let err = DomainError::ResolveBeforeDeadline { trading_deadline: 200, resolve_time: 100 };
//! assert_eq!(
//!     err.to_string(),
//!     "resolve time 100 is earlier than trading deadline 200"
//! );
//! ```

use thiserror::Error;

/// Errors that occur when proposal invariants are violated.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// The market needs a question to display and index.
    #[error("description cannot be empty")]
    EmptyDescription,

    /// A contract address was left as the zero address.
    #[error("{field} address cannot be zero")]
    ZeroAddress {
        /// Which contract address is missing.
        field: &'static str,
    },

    /// The chain id must identify a real network.
    #[error("chain id cannot be zero")]
    ZeroChainId,

    /// The AMM liquidity parameter must be positive.
    #[error("liquidity parameter must be positive")]
    ZeroLiquidity,

    /// Markets cannot resolve before trading closes.
    #[error("resolve time {resolve_time} is earlier than trading deadline {trading_deadline}")]
    ResolveBeforeDeadline {
        /// Trading deadline (unix seconds).
        trading_deadline: u64,
        /// Resolution time (unix seconds).
        resolve_time: u64,
    },

    /// Trading must still be open at creation time.
    #[error("trading deadline {trading_deadline} has already passed (now {now})")]
    DeadlinePassed {
        /// Trading deadline (unix seconds).
        trading_deadline: u64,
        /// Validation time (unix seconds).
        now: u64,
    },
}
