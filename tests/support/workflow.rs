use std::sync::Arc;

use bizfun::application::{MarketCreationWorkflow, WorkflowDeps, WorkflowSettings};
use bizfun::domain::MarketCreationProposal;
use bizfun::port::MarketIndexer;
use bizfun::testkit::chain::MockChain;
use bizfun::testkit::config::fast_settings;
use bizfun::testkit::proposal::sample_proposal;

pub fn deps(chain: &Arc<MockChain>, indexer: Arc<dyn MarketIndexer>) -> WorkflowDeps {
    WorkflowDeps {
        reader: chain.clone(),
        writer: chain.clone(),
        indexer,
    }
}

pub fn workflow(chain: &Arc<MockChain>, indexer: Arc<dyn MarketIndexer>) -> MarketCreationWorkflow {
    workflow_for(sample_proposal(), chain, indexer, fast_settings())
}

pub fn workflow_for(
    proposal: MarketCreationProposal,
    chain: &Arc<MockChain>,
    indexer: Arc<dyn MarketIndexer>,
    settings: WorkflowSettings,
) -> MarketCreationWorkflow {
    MarketCreationWorkflow::new(proposal, deps(chain, indexer), settings)
        .expect("sample proposal is valid")
}
