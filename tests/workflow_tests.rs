mod support;

use std::sync::Arc;

use alloy_primitives::{Address, U256};
use bizfun::domain::{IndexedMarketId, Step};
use bizfun::error::{Error, ExecutionError, WorkflowError};
use bizfun::testkit::chain::{MockChain, ACCOUNT};
use bizfun::testkit::config::fast_settings;
use bizfun::testkit::indexer::MockIndexer;
use bizfun::testkit::proposal::{proposal_with_oracle, sample_proposal, CREATION_FEE};

#[tokio::test]
async fn fresh_account_visits_every_step_in_order() {
    let chain = Arc::new(MockChain::new().with_confirmation_polls(1));
    let indexer = Arc::new(MockIndexer::responding("abc123"));
    let mut workflow = support::workflow::workflow(&chain, indexer.clone());

    let completion = workflow.run().await.expect("workflow completes");

    assert_eq!(
        workflow.history(),
        &[Step::Check, Step::Approve, Step::Create, Step::Indexing, Step::Done]
    );
    assert_eq!(completion.market_id, Some(IndexedMarketId::from("abc123")));
    assert_eq!(workflow.completion(), Some(&completion));

    let markets = chain.created_markets();
    assert_eq!(markets.len(), 1);
    assert_eq!(chain.approvals().len(), 1);
    assert_eq!(chain.approvals()[0].amount, U256::from(CREATION_FEE));
    assert_eq!(chain.allowance_value(), U256::from(CREATION_FEE));

    let requests = indexer.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].tx_hash, completion.tx_hash);
}

#[tokio::test]
async fn existing_allowance_goes_straight_to_create() {
    let chain = Arc::new(MockChain::new().with_allowance(U256::from(CREATION_FEE * 10)));
    let indexer = Arc::new(MockIndexer::responding("m-1"));
    let mut workflow = support::workflow::workflow(&chain, indexer);

    workflow.run().await.expect("workflow completes");

    assert_eq!(
        workflow.history(),
        &[Step::Check, Step::Create, Step::Indexing, Step::Done]
    );
    assert!(chain.approvals().is_empty());
}

#[tokio::test]
async fn indexer_outage_does_not_block_completion() {
    let chain = Arc::new(MockChain::new());
    let indexer = Arc::new(MockIndexer::failing("connection refused"));
    let mut workflow = support::workflow::workflow(&chain, indexer);

    let completion = workflow.run().await.expect("chain success is enough");

    assert_eq!(workflow.step(), Step::Done);
    assert_eq!(completion.market_id, None);
    assert_eq!(
        Some(completion.tx_hash),
        workflow.state().creation_hash()
    );
}

#[tokio::test]
async fn zero_oracle_is_replaced_by_the_caller() {
    let chain = Arc::new(MockChain::new());
    let indexer = Arc::new(MockIndexer::responding("m"));
    let mut workflow = support::workflow::workflow_for(
        proposal_with_oracle(Address::ZERO),
        &chain,
        indexer,
        fast_settings(),
    );

    workflow.run().await.expect("workflow completes");

    assert_eq!(chain.created_markets()[0].oracle, ACCOUNT);
}

#[tokio::test]
async fn stale_allowance_stops_run_without_second_approval() {
    let chain = Arc::new(MockChain::new());
    let indexer = Arc::new(MockIndexer::responding("m"));
    let mut workflow = support::workflow::workflow(&chain, indexer);

    // First read is real (zero), the post-approval read is stale.
    chain.stale_allowance_read(U256::ZERO);
    chain.stale_allowance_read(U256::ZERO);

    let result = workflow.run().await;

    assert!(matches!(
        result,
        Err(Error::Workflow(WorkflowError::InsufficientAllowance { .. }))
    ));
    assert_eq!(workflow.step(), Step::Approve);
    assert!(chain.created_markets().is_empty());

    // The node catches up; resuming does not approve again.
    let completion = workflow.run().await.expect("resumes after refetch");
    assert_eq!(chain.approvals().len(), 1);
    assert_eq!(Some(completion.tx_hash), workflow.state().creation_hash());
}

#[tokio::test]
async fn wallet_rejection_leaves_step_for_explicit_retry() {
    let chain = Arc::new(MockChain::new().with_allowance(U256::from(CREATION_FEE)));
    let indexer = Arc::new(MockIndexer::responding("m"));
    let mut workflow = support::workflow::workflow(&chain, indexer);
    chain.reject_next_write("User denied transaction signature");

    let result = workflow.run().await;

    assert!(matches!(
        result,
        Err(Error::Execution(ExecutionError::SubmissionFailed { .. }))
    ));
    assert_eq!(workflow.step(), Step::Create);
    let failure = workflow.last_error().expect("error recorded");
    assert_eq!(failure.step, Step::Create);

    assert_eq!(workflow.retry().await.expect("retry submits"), Step::Indexing);
    assert!(workflow.last_error().is_none());
    workflow.finalize().await.expect("finalizes");
    assert_eq!(workflow.step(), Step::Done);
    assert_eq!(chain.created_markets().len(), 1);
}

#[tokio::test]
async fn dropped_creation_can_be_rechecked_after_timeout() {
    let chain = Arc::new(MockChain::new().with_allowance(U256::from(CREATION_FEE)));
    let indexer = Arc::new(MockIndexer::responding("late"));
    let mut workflow = support::workflow::workflow(&chain, indexer);

    workflow.check().await.expect("check");
    let hash = chain.next_hash();
    chain.drop_transaction(hash);
    workflow.submit_creation().await.expect("submitted");

    let result = workflow.finalize().await;
    assert!(matches!(
        result,
        Err(Error::Execution(ExecutionError::ConfirmationTimeout { .. }))
    ));
    assert_eq!(workflow.step(), Step::Indexing);
    assert_eq!(workflow.state().creation_hash(), Some(hash));

    chain.include_transaction(hash);
    assert_eq!(workflow.retry().await.expect("recheck"), Step::Done);
    assert_eq!(
        workflow.completion().and_then(|c| c.market_id.clone()),
        Some(IndexedMarketId::from("late"))
    );
    assert_eq!(chain.created_markets().len(), 1);
}

#[tokio::test]
async fn independent_workflows_do_not_share_state() {
    let chain = Arc::new(MockChain::new().with_allowance(U256::from(CREATION_FEE)));
    let first = support::workflow::workflow(&chain, Arc::new(MockIndexer::responding("a")));
    let mut second = support::workflow::workflow(&chain, Arc::new(MockIndexer::responding("b")));

    second.run().await.expect("second completes");

    assert_ne!(first.id(), second.id());
    assert_eq!(first.step(), Step::Check);
    assert_eq!(second.step(), Step::Done);
    assert_eq!(sample_proposal(), *first.proposal());
}
