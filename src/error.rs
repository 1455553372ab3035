use std::time::Duration;

use alloy_primitives::{TxHash, U256};
use thiserror::Error;

use crate::domain::error::DomainError;
use crate::domain::Step;

/// Configuration-related errors with structured variants.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("missing required field: {field}")]
    MissingField { field: &'static str },

    #[error("invalid value for {field}: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    #[error("failed to read config file: {0}")]
    ReadFile(#[source] std::io::Error),

    #[error("failed to parse config: {0}")]
    Parse(#[source] toml::de::Error),
}

/// Wallet and chain errors raised while reading or writing on-chain state.
#[derive(Error, Debug)]
pub enum ExecutionError {
    #[error("wallet is not connected")]
    WalletDisconnected,

    #[error("wallet is on chain {actual}, proposal targets chain {expected}")]
    WrongChain { expected: u64, actual: u64 },

    #[error("failed to submit {kind} transaction: {reason}")]
    SubmissionFailed { kind: &'static str, reason: String },

    #[error("chain read failed: {0}")]
    ReadFailed(String),

    #[error("transaction {hash} reverted")]
    Reverted { hash: TxHash },

    #[error("transaction {hash} not confirmed after {waited:?}")]
    ConfirmationTimeout { hash: TxHash, waited: Duration },
}

/// Step precondition violations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum WorkflowError {
    #[error("operation requires step {expected}, workflow is at {actual}")]
    WrongStep { expected: Step, actual: Step },

    #[error("allowance {allowance} is below the creation fee {required}")]
    InsufficientAllowance { allowance: U256, required: U256 },

    #[error("no pending {kind} transaction to watch")]
    NothingPending { kind: &'static str },
}

/// Off-chain indexer errors.
#[derive(Error, Debug)]
pub enum IndexerError {
    #[error("indexer rejected request with status {status}: {body}")]
    Rejected { status: u16, body: String },

    #[error("malformed indexer response: {0}")]
    Malformed(String),
}

#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Domain(#[from] DomainError),

    #[error(transparent)]
    Execution(#[from] ExecutionError),

    #[error(transparent)]
    Workflow(#[from] WorkflowError),

    #[error(transparent)]
    Indexer(#[from] IndexerError),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("URL parse error: {0}")]
    Url(#[from] url::ParseError),
}

pub type Result<T> = std::result::Result<T, Error>;

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        // dialoguer::Error wraps an IO error
        Error::Io(std::io::Error::other(err.to_string()))
    }
}
