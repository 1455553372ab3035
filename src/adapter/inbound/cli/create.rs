//! `bizfun create`: drive one proposal through the whole workflow.
//!
//! Each workflow operation runs under its own spinner so a failure names the
//! step it happened in. A failed run can simply be re-invoked: the allowance
//! check at the start skips an approval that already landed.

use std::path::Path;

use dialoguer::{theme::ColorfulTheme, Confirm};
use miette::IntoDiagnostic;
use serde_json::json;

use crate::adapter::inbound::cli::{output, proposal};
use crate::application::{MarketCreationWorkflow, WorkflowSettings};
use crate::domain::{Completion, MarketCreationProposal, Step};
use crate::error::{Result, WorkflowError};
use crate::infrastructure::bootstrap;
use crate::infrastructure::config::settings::Config;

/// Create the market described by the proposal at `proposal_path`.
///
/// # Errors
///
/// Returns a diagnostic if the proposal is invalid or any workflow step
/// fails.
pub async fn execute(config: &Config, proposal_path: &Path, skip_confirm: bool) -> miette::Result<()> {
    let proposal = proposal::load(proposal_path)?;
    proposal.validate().into_diagnostic()?;

    output::section("Market proposal");
    proposal::print_summary(&proposal);

    if !skip_confirm && !confirm()? {
        output::warning("Market creation cancelled by user");
        return Ok(());
    }

    run(config, proposal).await.into_diagnostic()
}

fn confirm() -> miette::Result<bool> {
    if output::is_json() {
        return Err(miette::miette!("--json requires --yes"));
    }
    Confirm::with_theme(&ColorfulTheme::default())
        .with_prompt("Sign and submit the market creation transactions?")
        .default(false)
        .interact()
        .into_diagnostic()
}

async fn run(config: &Config, proposal: MarketCreationProposal) -> Result<()> {
    let deps = bootstrap::workflow_deps(config).await?;
    let mut workflow =
        MarketCreationWorkflow::new(proposal, deps, WorkflowSettings::from_config(config))?;

    output::section("Workflow");
    output::field("Workflow", workflow.id());
    output::step(workflow.step());

    let pb = output::spinner("Checking allowance...");
    let step = finish(&pb, workflow.check().await, "Allowance checked", "Allowance check failed")?;
    output::step(step);

    if step == Step::Approve {
        approve(&mut workflow).await?;
    }

    let pb = output::spinner("Submitting market creation...");
    let hash = finish(
        &pb,
        workflow.submit_creation().await,
        "Market creation submitted",
        "Market creation rejected",
    )?;
    output::field("Create tx", hash);
    output::step(workflow.step());

    let pb = output::spinner("Waiting for confirmation and indexing...");
    let completion = finish(
        &pb,
        workflow.finalize().await,
        "Market created",
        "Market creation did not confirm",
    )?;
    output::step(workflow.step());

    report(&completion);
    Ok(())
}

async fn approve(workflow: &mut MarketCreationWorkflow) -> Result<()> {
    let pb = output::spinner("Submitting approval...");
    let hash = finish(
        &pb,
        workflow.submit_approval().await,
        "Approval submitted",
        "Approval rejected",
    )?;
    output::field("Approve tx", hash);

    let pb = output::spinner("Waiting for approval confirmation...");
    let step = finish(
        &pb,
        workflow.await_approval().await,
        "Approval confirmed",
        "Approval did not confirm",
    )?;
    output::step(step);

    if step == Step::Approve {
        let allowance = workflow
            .state()
            .allowance
            .map(|allowance| allowance.amount)
            .unwrap_or_default();
        return Err(WorkflowError::InsufficientAllowance {
            allowance,
            required: workflow.proposal().creation_fee(),
        }
        .into());
    }
    Ok(())
}

fn finish<T>(pb: &indicatif::ProgressBar, result: Result<T>, ok: &str, failed: &str) -> Result<T> {
    match &result {
        Ok(_) => output::spinner_success(pb, ok),
        Err(_) => output::spinner_fail(pb, failed),
    }
    result
}

fn report(completion: &Completion) {
    if output::is_json() {
        output::json_output(json!({
            "type": "completion",
            "payload": completion,
        }));
        return;
    }

    output::section("Done");
    output::field("Transaction", completion.tx_hash);
    if let Some(url) = &completion.explorer_url {
        output::field("Explorer", url);
    }
    match &completion.market_id {
        Some(id) => output::field("Market id", id),
        None => output::warning("Market exists on-chain but was not indexed"),
    }
}
