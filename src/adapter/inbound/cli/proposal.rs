//! Proposal file loading shared by CLI handlers.

use std::fs;
use std::path::Path;

use super::diagnostic::ProposalDiagnostic;
use super::output;
use crate::domain::MarketCreationProposal;

/// Read and parse a proposal file.
///
/// Parse failures come back as a [`ProposalDiagnostic`] pointing into the
/// file; validation is left to the caller.
///
/// # Errors
///
/// Returns a diagnostic if the file cannot be read or is not a proposal.
pub fn load(path: &Path) -> miette::Result<MarketCreationProposal> {
    let src = fs::read_to_string(path).map_err(|e| {
        miette::miette!("failed to read proposal {}: {e}", path.display())
    })?;

    MarketCreationProposal::from_json(&src)
        .map_err(|e| ProposalDiagnostic::from_json_error(&src, &e).into())
}

/// Print the fields a user checks before signing.
pub fn print_summary(proposal: &MarketCreationProposal) {
    output::field("Question", &proposal.description);
    output::field("Chain", proposal.chain_id);
    output::field("Factory", proposal.contracts.factory);
    output::field("Collateral", proposal.contracts.collateral_token);
    output::field("Creation fee", proposal.creation_fee());
    output::field("Deadline", proposal.params.trading_deadline);
    output::field("Resolves", proposal.params.resolve_time);
    output::field("Metadata", &proposal.params.metadata_uri);
}
