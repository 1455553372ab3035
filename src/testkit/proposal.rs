//! Canonical market creation proposals.

use alloy_primitives::{address, Address, U256};

use crate::domain::{MarketCreationProposal, MarketParams, ProposalContracts};

/// Factory address used by [`sample_proposal`].
pub const FACTORY: Address = address!("1111111111111111111111111111111111111111");

/// Collateral token used by [`sample_proposal`].
pub const COLLATERAL: Address = address!("2222222222222222222222222222222222222222");

/// 1 USDC at 6 decimals.
pub const CREATION_FEE: u64 = 1_000_000;

/// Proposal with a zero oracle, a 1 USDC fee, and a deadline in 2030.
#[must_use]
pub fn sample_proposal() -> MarketCreationProposal {
    MarketCreationProposal {
        description: "Will Sunrise Coffee open a second location by June 2030?".into(),
        chain_id: super::chain::CHAIN_ID,
        contracts: ProposalContracts {
            factory: FACTORY,
            collateral_token: COLLATERAL,
        },
        params: MarketParams {
            oracle: Address::ZERO,
            trading_deadline: 1_900_000_000,
            resolve_time: 1_900_086_400,
            liquidity_param: U256::from(100_000_000u64),
            metadata_uri: "ipfs://bafy-sunrise-coffee".into(),
            creation_fee: U256::from(CREATION_FEE),
        },
    }
}

/// [`sample_proposal`] with an explicit oracle.
#[must_use]
pub fn proposal_with_oracle(oracle: Address) -> MarketCreationProposal {
    let mut proposal = sample_proposal();
    proposal.params.oracle = oracle;
    proposal
}
