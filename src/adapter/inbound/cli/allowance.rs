//! `bizfun allowance`: read the collateral allowance for a proposal.
//!
//! Read-only. Reports the current allowance, the creation fee, and whether
//! the workflow would start at approval or creation.

use std::path::Path;

use miette::IntoDiagnostic;

use crate::adapter::inbound::cli::{output, proposal};
use crate::domain::{AllowanceState, MarketCreationProposal, Step};
use crate::error::{ExecutionError, Result};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;
use crate::port::{ChainReader, ChainWriter};

/// Read the live allowance for a proposal and report the starting step.
///
/// # Errors
///
/// Returns an error if the chain cannot be reached or no wallet is
/// configured.
pub async fn execute(config: &Config, proposal_path: &Path) -> miette::Result<()> {
    let proposal = proposal::load(proposal_path)?;
    run(config, &proposal).await.into_diagnostic()
}

async fn run(config: &Config, proposal: &MarketCreationProposal) -> Result<()> {
    output::section("Allowance");

    let pb = output::spinner("Reading allowance...");
    let chain = match bootstrap::connect_chain(config).await {
        Ok(chain) => chain,
        Err(e) => {
            output::spinner_fail(&pb, "Failed to connect");
            return Err(e);
        }
    };

    let Some(owner) = chain.account() else {
        output::spinner_fail(&pb, "No wallet configured");
        return Err(ExecutionError::WalletDisconnected.into());
    };
    let token = proposal.contracts.collateral_token;
    let spender = proposal.contracts.factory;

    let amount = match chain.allowance(token, owner, spender).await {
        Ok(amount) => {
            output::spinner_success(&pb, "Fetched allowance");
            amount
        }
        Err(e) => {
            output::spinner_fail(&pb, "Failed to fetch allowance");
            return Err(e);
        }
    };

    let state = AllowanceState {
        owner,
        spender,
        amount,
    };
    let next = Step::after_allowance(&state, proposal.creation_fee());

    output::field("Wallet", owner);
    output::field("Token", token);
    output::field("Spender", spender);
    output::field("Allowance", amount);
    output::field("Required", proposal.creation_fee());
    output::field("Next step", next);

    if next == Step::Create {
        output::success("Allowance covers the creation fee");
    } else {
        output::note("An approval transaction is needed before creating the market");
    }
    Ok(())
}
