//! Bizfun - on-chain prediction market creation.
//!
//! This crate takes a market proposal (question, contracts, parameters) and
//! walks it through the transactions needed to list it:
//!
//! ```text
//! Check ──► Approve ──► Create ──► Indexing ──► Done
//! ```
//!
//! The collateral allowance decides whether an ERC-20 approval is needed, the
//! market factory's `createMarket` is then submitted and confirmed, and the
//! resulting market is posted to an off-chain indexer.
//!
//! # Modules
//!
//! - [`domain`] - Proposals, transactions, and workflow state
//! - [`port`] - Chain and indexer traits the workflow depends on
//! - [`application`] - The workflow orchestrator and confirmation watcher
//! - [`adapter`] - JSON-RPC chain client, HTTP indexer, and CLI
//! - [`infrastructure`] - Configuration, logging, and wiring
//! - [`error`] - Error types for the crate
//!
//! # Features
//!
//! - `evm` (default) - JSON-RPC chain client and the `bizfun` binary
//! - `testkit` - In-memory chain and indexer mocks for integration tests
//!
//! # Example
//!
//! ```no_run
//! use bizfun::application::{MarketCreationWorkflow, WorkflowSettings};
//! use bizfun::domain::MarketCreationProposal;
//! use bizfun::infrastructure::bootstrap;
//! use bizfun::infrastructure::config::settings::Config;
//!
//! # async fn example() -> bizfun::error::Result<()> {
//! let config = Config::load("config.toml")?;
//! let proposal = MarketCreationProposal::from_json(&std::fs::read_to_string("proposal.json")?)?;
//! let deps = bootstrap::workflow_deps(&config).await?;
//!
//! let mut workflow =
//!     MarketCreationWorkflow::new(proposal, deps, WorkflowSettings::from_config(&config))?;
//! let completion = workflow.run().await?;
//! println!("created in {}", completion.tx_hash);
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod port;

#[cfg(any(test, feature = "testkit"))]
pub mod testkit;
