//! Market creation proposals.
//!
//! A [`MarketCreationProposal`] is produced upstream (by an agent or a form)
//! and handed to the workflow unchanged. It is deserialized from camelCase
//! JSON; integer parameters accept JSON numbers, decimal strings, or `0x` hex
//! strings because agents emit all three.

use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use super::error::DomainError;

/// Contract addresses a proposal targets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProposalContracts {
    /// Market factory contract (also the ERC-20 spender).
    pub factory: Address,
    /// ERC-20 token the creation fee is paid in.
    pub collateral_token: Address,
}

/// Arguments for `createMarket` plus the fee the factory pulls.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketParams {
    /// Oracle address; zero means "the caller resolves the market".
    pub oracle: Address,
    /// Unix seconds after which trading closes.
    #[serde(with = "flexible_u64")]
    pub trading_deadline: u64,
    /// Unix seconds after which the market may resolve.
    #[serde(with = "flexible_u64")]
    pub resolve_time: u64,
    /// AMM liquidity parameter `b`, passed through opaquely.
    #[serde(with = "flexible_u256")]
    pub liquidity_param: U256,
    /// URI of the off-chain market metadata document.
    pub metadata_uri: String,
    /// Fee in collateral base units the factory transfers on creation.
    #[serde(with = "flexible_u256")]
    pub creation_fee: U256,
}

/// Immutable input describing one market to create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketCreationProposal {
    /// Market question, also used as its description.
    pub description: String,
    /// Chain the contracts live on.
    pub chain_id: u64,
    /// Target contracts.
    pub contracts: ProposalContracts,
    /// `createMarket` parameters.
    pub params: MarketParams,
}

impl MarketCreationProposal {
    /// Parse a proposal from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not match the proposal shape.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Creation fee the factory requires as allowance.
    #[must_use]
    pub fn creation_fee(&self) -> U256 {
        self.params.creation_fee
    }

    /// Oracle to pass on-chain: the proposal's oracle, or `caller` when the
    /// proposal leaves it as the zero address.
    #[must_use]
    pub fn resolve_oracle(&self, caller: Address) -> Address {
        if self.params.oracle.is_zero() {
            caller
        } else {
            self.params.oracle
        }
    }

    /// Check the proposal against its invariants at time `now` (unix seconds).
    ///
    /// # Errors
    ///
    /// Returns the first [`DomainError`] found.
    pub fn validate_at(&self, now: u64) -> Result<(), DomainError> {
        if self.description.trim().is_empty() {
            return Err(DomainError::EmptyDescription);
        }
        if self.chain_id == 0 {
            return Err(DomainError::ZeroChainId);
        }
        if self.contracts.factory.is_zero() {
            return Err(DomainError::ZeroAddress { field: "factory" });
        }
        if self.contracts.collateral_token.is_zero() {
            return Err(DomainError::ZeroAddress {
                field: "collateralToken",
            });
        }
        if self.params.liquidity_param.is_zero() {
            return Err(DomainError::ZeroLiquidity);
        }
        if self.params.resolve_time < self.params.trading_deadline {
            return Err(DomainError::ResolveBeforeDeadline {
                trading_deadline: self.params.trading_deadline,
                resolve_time: self.params.resolve_time,
            });
        }
        if self.params.trading_deadline <= now {
            return Err(DomainError::DeadlinePassed {
                trading_deadline: self.params.trading_deadline,
                now,
            });
        }
        Ok(())
    }

    /// Check the proposal against its invariants at the current time.
    ///
    /// # Errors
    ///
    /// Returns the first [`DomainError`] found.
    pub fn validate(&self) -> Result<(), DomainError> {
        let now = u64::try_from(chrono::Utc::now().timestamp()).unwrap_or_default();
        self.validate_at(now)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(u64),
    String(String),
}

mod flexible_u64 {
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    use super::NumberOrString;

    pub fn serialize<S: Serializer>(value: &u64, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u64(*value)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(n),
            NumberOrString::String(s) => {
                let s = s.trim();
                let parsed = match s.strip_prefix("0x") {
                    Some(hex) => u64::from_str_radix(hex, 16),
                    None => s.parse(),
                };
                parsed.map_err(D::Error::custom)
            }
        }
    }
}

mod flexible_u256 {
    use std::str::FromStr;

    use alloy_primitives::U256;
    use serde::{de::Error as _, Deserialize, Deserializer, Serializer};

    use super::NumberOrString;

    pub fn serialize<S: Serializer>(value: &U256, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<U256, D::Error> {
        match NumberOrString::deserialize(deserializer)? {
            NumberOrString::Number(n) => Ok(U256::from(n)),
            NumberOrString::String(s) => U256::from_str(s.trim()).map_err(D::Error::custom),
        }
    }
}
