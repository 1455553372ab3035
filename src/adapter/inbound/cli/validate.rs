//! `bizfun validate`: check a proposal file offline.

use std::path::Path;

use miette::IntoDiagnostic;

use super::{output, proposal};

/// Parse and validate a proposal without connecting to anything.
///
/// # Errors
///
/// Returns a diagnostic if the proposal cannot be parsed or is invalid.
pub fn execute(path: &Path) -> miette::Result<()> {
    let proposal = proposal::load(path)?;

    output::section("Proposal");
    proposal::print_summary(&proposal);

    proposal.validate().into_diagnostic()?;
    output::success("Proposal is valid");
    Ok(())
}
