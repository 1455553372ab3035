//! Infrastructure bootstrap helpers for runtime wiring.

use std::sync::Arc;

use tracing::info;

use crate::adapter::outbound::evm::EvmChainClient;
use crate::adapter::outbound::indexer::HttpMarketIndexer;
use crate::application::WorkflowDeps;
use crate::error::Result;
use crate::infrastructure::config::settings::Config;

/// Connect the chain client described by `config`.
///
/// # Errors
///
/// Returns an error if the RPC endpoint is unreachable or the private key is
/// invalid.
pub async fn connect_chain(config: &Config) -> Result<Arc<EvmChainClient>> {
    EvmChainClient::connect(config).await.map(Arc::new)
}

/// Build the collaborators of a market creation workflow.
///
/// One chain client serves as both reader and writer.
///
/// # Errors
///
/// Returns an error if the chain client cannot connect.
pub async fn workflow_deps(config: &Config) -> Result<WorkflowDeps> {
    let chain = connect_chain(config).await?;
    let indexer = Arc::new(HttpMarketIndexer::from_config(&config.indexer));
    info!(endpoint = indexer.endpoint(), "Indexer configured");

    Ok(WorkflowDeps {
        reader: chain.clone(),
        writer: chain,
        indexer,
    })
}
