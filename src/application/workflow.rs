//! Market creation workflow orchestrator.
//!
//! [`MarketCreationWorkflow`] sequences one attempt to create a market:
//!
//! 1. **Check** reads the collateral allowance the factory holds over the
//!    connected account and picks Approve or Create.
//! 2. **Approve** submits `approve(factory, creationFee)`, watches the
//!    confirmation, then re-reads the allowance and re-runs the Check
//!    decision. A stale read keeps the workflow in Approve.
//! 3. **Create** submits `createMarket` and moves to Indexing as soon as a
//!    hash exists, so callers can show progress while it confirms.
//! 4. **Indexing** watches the create confirmation, then posts the market to
//!    the indexer. Indexing is best-effort: the chain is the source of truth,
//!    so an indexer failure still ends in Done, without a market id.
//!
//! Every step method returns a `Result`. Failures are logged, recorded as
//! [`last_error`](MarketCreationWorkflow::last_error), and leave the step
//! unchanged; [`retry`](MarketCreationWorkflow::retry) re-runs whatever the
//! current step needs. Nothing is retried automatically.
//!
//! Dependencies are injected, so the orchestrator holds no hidden shared
//! state. Two workflows for the same account may still race on allowance.

use std::sync::Arc;
use std::time::Duration;

use alloy_primitives::{Address, TxHash, U256};
use tokio::sync::watch;
use tracing::{info, warn};

use super::watcher::ConfirmationWatcher;
use crate::domain::{
    AllowanceState, Completion, ConfirmationStatus, IndexRequest, IndexedMarketId,
    MarketCreationProposal, PendingTransaction, Step, StepFailure, TxKind, WorkflowId,
    WorkflowState, DEFAULT_VIBE,
};
use crate::error::{Error, ExecutionError, Result, WorkflowError};
use crate::infrastructure::config::settings::Config;
use crate::port::{ChainReader, ChainWriter, CreateMarketCall, MarketIndexer};

/// External collaborators of a workflow.
#[derive(Clone)]
pub struct WorkflowDeps {
    pub reader: Arc<dyn ChainReader>,
    pub writer: Arc<dyn ChainWriter>,
    pub indexer: Arc<dyn MarketIndexer>,
}

/// Tunables of a workflow.
#[derive(Debug, Clone)]
pub struct WorkflowSettings {
    pub poll_interval: Duration,
    pub confirmation_timeout: Duration,
    /// Vibe tag sent to the indexer.
    pub vibe: String,
    /// Block explorer base URL for the Done link.
    pub explorer_url: Option<String>,
}

impl WorkflowSettings {
    #[must_use]
    pub fn from_config(config: &Config) -> Self {
        Self {
            poll_interval: config.workflow.poll_interval(),
            confirmation_timeout: config.workflow.confirmation_timeout(),
            vibe: config.indexer.vibe.clone(),
            explorer_url: config.chain.explorer_url.clone(),
        }
    }

    fn explorer_link(&self, hash: TxHash) -> Option<String> {
        self.explorer_url
            .as_deref()
            .map(|base| format!("{}/tx/{hash}", base.trim_end_matches('/')))
    }
}

impl Default for WorkflowSettings {
    fn default() -> Self {
        Self {
            poll_interval: Duration::from_secs(2),
            confirmation_timeout: Duration::from_secs(300),
            vibe: DEFAULT_VIBE.to_string(),
            explorer_url: None,
        }
    }
}

/// One market creation attempt.
pub struct MarketCreationWorkflow {
    id: WorkflowId,
    proposal: MarketCreationProposal,
    deps: WorkflowDeps,
    watcher: ConfirmationWatcher,
    settings: WorkflowSettings,
    state: WorkflowState,
    creator: Option<Address>,
    step_tx: watch::Sender<Step>,
}

impl MarketCreationWorkflow {
    /// Start a workflow at [`Step::Check`] for a validated proposal.
    ///
    /// # Errors
    ///
    /// Returns a domain error if the proposal is invalid.
    pub fn new(
        proposal: MarketCreationProposal,
        deps: WorkflowDeps,
        settings: WorkflowSettings,
    ) -> Result<Self> {
        proposal.validate()?;

        let watcher = ConfirmationWatcher::new(
            Arc::clone(&deps.reader),
            settings.poll_interval,
            settings.confirmation_timeout,
        );
        let (step_tx, _) = watch::channel(Step::Check);
        let id = WorkflowId::new();

        info!(
            workflow = %id,
            chain_id = proposal.chain_id,
            factory = %proposal.contracts.factory,
            creation_fee = %proposal.creation_fee(),
            "Market creation workflow started"
        );

        Ok(Self {
            id,
            proposal,
            deps,
            watcher,
            settings,
            state: WorkflowState::new(),
            creator: None,
            step_tx,
        })
    }

    #[must_use]
    pub fn id(&self) -> &WorkflowId {
        &self.id
    }

    #[must_use]
    pub fn proposal(&self) -> &MarketCreationProposal {
        &self.proposal
    }

    #[must_use]
    pub fn state(&self) -> &WorkflowState {
        &self.state
    }

    #[must_use]
    pub fn step(&self) -> Step {
        self.state.step
    }

    /// Steps visited so far, starting with [`Step::Check`].
    #[must_use]
    pub fn history(&self) -> &[Step] {
        &self.state.history
    }

    /// Most recent step failure, cleared when a step next succeeds.
    #[must_use]
    pub fn last_error(&self) -> Option<&StepFailure> {
        self.state.last_error.as_ref()
    }

    #[must_use]
    pub fn completion(&self) -> Option<&Completion> {
        self.state.completion.as_ref()
    }

    /// Observe step changes.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Step> {
        self.step_tx.subscribe()
    }

    /// Read the allowance and decide between Approve and Create.
    ///
    /// A no-op once the create transaction has been submitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the wallet is unavailable or the read fails.
    pub async fn check(&mut self) -> Result<Step> {
        match self.state.step {
            Step::Indexing | Step::Done => Ok(self.state.step),
            _ => self.refresh_allowance().await,
        }
    }

    /// Submit `approve(factory, creationFee)` on the collateral token.
    ///
    /// Returns the outstanding hash instead of submitting again when an
    /// approval is already pending.
    ///
    /// # Errors
    ///
    /// Returns an error outside [`Step::Approve`], or if the wallet is
    /// unavailable or rejects the transaction.
    pub async fn submit_approval(&mut self) -> Result<TxHash> {
        self.expect_step(Step::Approve)?;
        if let Some(pending) = &self.state.pending_approval {
            return Ok(pending.hash);
        }

        let result = self.send_approval().await;
        let hash = match result {
            Ok(hash) => hash,
            Err(e) => return self.fail(Step::Approve, e),
        };

        info!(
            workflow = %self.id,
            tx_hash = %hash,
            amount = %self.proposal.creation_fee(),
            "Approval submitted"
        );
        self.state.pending_approval = Some(PendingTransaction::new(hash, TxKind::Approve));
        self.state.last_error = None;
        Ok(hash)
    }

    /// Wait for the pending approval, then re-run the Check decision.
    ///
    /// # Errors
    ///
    /// Returns an error if nothing is pending, the approval reverts, the
    /// confirmation times out (the hash stays pending), or the allowance
    /// read fails.
    pub async fn await_approval(&mut self) -> Result<Step> {
        self.expect_step(Step::Approve)?;
        let hash = self
            .state
            .pending_approval
            .as_ref()
            .map(|tx| tx.hash)
            .ok_or(WorkflowError::NothingPending { kind: "approve" })?;

        match self.watcher.wait(hash).await {
            Ok(ConfirmationStatus::Confirmed { block_number }) => {
                info!(workflow = %self.id, tx_hash = %hash, ?block_number, "Approval confirmed");
                self.state.pending_approval = None;
                self.state.approval_hash = Some(hash);
            }
            Ok(status) => {
                self.state.pending_approval = None;
                warn!(workflow = %self.id, tx_hash = %hash, ?status, "Approval did not succeed");
                return self.fail(Step::Approve, ExecutionError::Reverted { hash }.into());
            }
            Err(e) => return self.fail(Step::Approve, e),
        }

        let step = self.refresh_allowance().await?;
        if step == Step::Approve {
            let allowance = self.current_allowance();
            warn!(
                workflow = %self.id,
                allowance = %allowance,
                required = %self.proposal.creation_fee(),
                "Allowance still below fee after approval confirmed"
            );
            self.record(
                Step::Approve,
                &WorkflowError::InsufficientAllowance {
                    allowance,
                    required: self.proposal.creation_fee(),
                }
                .into(),
            );
        }
        Ok(step)
    }

    /// Submit `createMarket` and move to [`Step::Indexing`].
    ///
    /// A zero-address oracle in the proposal is replaced by the caller.
    ///
    /// # Errors
    ///
    /// Returns an error outside [`Step::Create`], when the last allowance read
    /// does not cover the fee, or if the wallet is unavailable or rejects the
    /// transaction.
    pub async fn submit_creation(&mut self) -> Result<TxHash> {
        self.expect_step(Step::Create)?;
        let required = self.proposal.creation_fee();
        let allowance = self.current_allowance();
        if allowance < required {
            return self.fail(
                Step::Create,
                WorkflowError::InsufficientAllowance {
                    allowance,
                    required,
                }
                .into(),
            );
        }

        let caller = match self.connected_account() {
            Ok(caller) => caller,
            Err(e) => return self.fail(Step::Create, e),
        };
        let call = self.create_call(caller);

        let hash = match self.deps.writer.create_market(&call).await {
            Ok(hash) => hash,
            Err(e) => return self.fail(Step::Create, e),
        };

        info!(
            workflow = %self.id,
            tx_hash = %hash,
            oracle = %call.oracle,
            "Market creation submitted"
        );
        self.creator = Some(caller);
        self.state.pending_creation = Some(PendingTransaction::new(hash, TxKind::CreateMarket));
        self.state.last_error = None;
        self.transition(Step::Indexing);
        Ok(hash)
    }

    /// Wait for the create transaction, index the market, and finish.
    ///
    /// Returns the existing completion when already done. A reverted create
    /// clears the pending hash and returns the workflow to [`Step::Create`].
    ///
    /// # Errors
    ///
    /// Returns an error outside [`Step::Indexing`]/[`Step::Done`], if the
    /// create transaction reverts, or if the confirmation times out (the hash
    /// stays pending). Indexer errors are not returned.
    pub async fn finalize(&mut self) -> Result<Completion> {
        if let Some(completion) = &self.state.completion {
            return Ok(completion.clone());
        }
        self.expect_step(Step::Indexing)?;
        let hash = self
            .state
            .pending_creation
            .as_ref()
            .map(|tx| tx.hash)
            .ok_or(WorkflowError::NothingPending {
                kind: "createMarket",
            })?;

        match self.watcher.wait(hash).await {
            Ok(ConfirmationStatus::Confirmed { block_number }) => {
                info!(workflow = %self.id, tx_hash = %hash, ?block_number, "Market creation confirmed");
            }
            Ok(status) => {
                warn!(workflow = %self.id, tx_hash = %hash, ?status, "Market creation did not succeed");
                self.state.pending_creation = None;
                self.transition(Step::Create);
                return self.fail(Step::Create, ExecutionError::Reverted { hash }.into());
            }
            Err(e) => return self.fail(Step::Indexing, e),
        }

        let market_id = self.index_market(hash).await;
        let completion = Completion {
            tx_hash: hash,
            market_id,
            explorer_url: self.settings.explorer_link(hash),
        };

        self.state.pending_creation = None;
        self.state.completion = Some(completion.clone());
        self.state.last_error = None;
        self.transition(Step::Done);
        Ok(completion)
    }

    /// Re-run whatever the current step needs after a failure.
    ///
    /// - Check: read the allowance again.
    /// - Approve: resume watching a pending approval; otherwise re-check the
    ///   allowance and, if still short, submit and watch a new approval.
    /// - Create: submit the creation again.
    /// - Indexing: resume watching the create transaction.
    ///
    /// # Errors
    ///
    /// Returns the error of the operation that was retried.
    pub async fn retry(&mut self) -> Result<Step> {
        info!(workflow = %self.id, step = %self.state.step, "Retrying step");
        match self.state.step {
            Step::Check => self.check().await,
            Step::Approve => {
                if self.state.pending_approval.is_none() {
                    if self.check().await? != Step::Approve {
                        return Ok(self.state.step);
                    }
                    self.submit_approval().await?;
                }
                self.await_approval().await
            }
            Step::Create => {
                self.submit_creation().await?;
                Ok(self.state.step)
            }
            Step::Indexing => {
                self.finalize().await?;
                Ok(self.state.step)
            }
            Step::Done => Ok(Step::Done),
        }
    }

    /// Drive the workflow from its current step to [`Step::Done`].
    ///
    /// Stops at the first failure, leaving the workflow resumable.
    ///
    /// # Errors
    ///
    /// Returns the first step error, or
    /// [`WorkflowError::InsufficientAllowance`] when a confirmed approval is
    /// not yet visible in the allowance.
    pub async fn run(&mut self) -> Result<Completion> {
        loop {
            match self.state.step {
                Step::Check => {
                    self.check().await?;
                }
                Step::Approve => {
                    // A confirmed approval may only now be visible.
                    if self.state.pending_approval.is_none()
                        && self.state.approval_hash.is_some()
                        && self.refresh_allowance().await? != Step::Approve
                    {
                        continue;
                    }
                    self.submit_approval().await?;
                    if self.await_approval().await? == Step::Approve {
                        return Err(WorkflowError::InsufficientAllowance {
                            allowance: self.current_allowance(),
                            required: self.proposal.creation_fee(),
                        }
                        .into());
                    }
                }
                Step::Create => {
                    self.submit_creation().await?;
                }
                Step::Indexing | Step::Done => return self.finalize().await,
            }
        }
    }

    async fn refresh_allowance(&mut self) -> Result<Step> {
        let step = self.state.step;
        let owner = match self.connected_account() {
            Ok(owner) => owner,
            Err(e) => return self.fail(step, e),
        };
        let token = self.proposal.contracts.collateral_token;
        let spender = self.proposal.contracts.factory;

        let amount = match self.deps.reader.allowance(token, owner, spender).await {
            Ok(amount) => amount,
            Err(e) => return self.fail(step, e),
        };

        let allowance = AllowanceState {
            owner,
            spender,
            amount,
        };
        let next = Step::after_allowance(&allowance, self.proposal.creation_fee());
        info!(
            workflow = %self.id,
            allowance = %amount,
            required = %self.proposal.creation_fee(),
            next = %next,
            "Allowance checked"
        );

        self.state.allowance = Some(allowance);
        if next == Step::Create {
            if let Some(pending) = self.state.pending_approval.take() {
                self.state.approval_hash = Some(pending.hash);
            }
        }
        self.state.last_error = None;
        self.transition(next);
        Ok(next)
    }

    async fn send_approval(&self) -> Result<TxHash> {
        self.connected_account()?;
        self.deps
            .writer
            .approve(
                self.proposal.contracts.collateral_token,
                self.proposal.contracts.factory,
                self.proposal.creation_fee(),
            )
            .await
    }

    async fn index_market(&self, hash: TxHash) -> Option<IndexedMarketId> {
        let Some(creator) = self.creator else {
            warn!(workflow = %self.id, "No creator recorded, skipping indexing");
            return None;
        };
        let request =
            IndexRequest::for_proposal(&self.proposal, creator, hash, &self.settings.vibe);

        match self.deps.indexer.index(&request).await {
            Ok(market) => {
                info!(workflow = %self.id, market_id = %market.id, "Market indexed");
                Some(market.id)
            }
            Err(e) => {
                warn!(
                    workflow = %self.id,
                    tx_hash = %hash,
                    error = %e,
                    "Indexing failed, market exists on-chain only"
                );
                None
            }
        }
    }

    fn create_call(&self, caller: Address) -> CreateMarketCall {
        let params = &self.proposal.params;
        CreateMarketCall {
            factory: self.proposal.contracts.factory,
            oracle: self.proposal.resolve_oracle(caller),
            trading_deadline: params.trading_deadline,
            resolve_time: params.resolve_time,
            liquidity_param: params.liquidity_param,
            metadata_uri: params.metadata_uri.clone(),
        }
    }

    fn connected_account(&self) -> Result<Address> {
        let account = self
            .deps
            .writer
            .account()
            .ok_or(ExecutionError::WalletDisconnected)?;
        let actual = self.deps.writer.chain_id();
        if actual != self.proposal.chain_id {
            return Err(ExecutionError::WrongChain {
                expected: self.proposal.chain_id,
                actual,
            }
            .into());
        }
        Ok(account)
    }

    fn current_allowance(&self) -> U256 {
        self.state
            .allowance
            .map(|allowance| allowance.amount)
            .unwrap_or_default()
    }

    fn expect_step(&self, expected: Step) -> Result<()> {
        if self.state.step == expected {
            Ok(())
        } else {
            Err(WorkflowError::WrongStep {
                expected,
                actual: self.state.step,
            }
            .into())
        }
    }

    fn transition(&mut self, step: Step) {
        let from = self.state.step;
        if self.state.advance(step) {
            info!(workflow = %self.id, from = %from, to = %step, "Workflow step changed");
            self.step_tx.send_replace(step);
        }
    }

    fn record(&mut self, step: Step, error: &Error) {
        warn!(workflow = %self.id, step = %step, error = %error, "Workflow step failed");
        self.state.last_error = Some(StepFailure::new(step, error.to_string()));
    }

    fn fail<T>(&mut self, step: Step, error: Error) -> Result<T> {
        self.record(step, &error);
        Err(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testkit::chain::{MockChain, ACCOUNT};
    use crate::testkit::config::fast_settings;
    use crate::testkit::indexer::MockIndexer;
    use crate::testkit::proposal::{proposal_with_oracle, sample_proposal, CREATION_FEE};
    use alloy_primitives::address;

    fn workflow_with(
        proposal: MarketCreationProposal,
        chain: &Arc<MockChain>,
        indexer: &Arc<MockIndexer>,
    ) -> MarketCreationWorkflow {
        let deps = WorkflowDeps {
            reader: chain.clone(),
            writer: chain.clone(),
            indexer: indexer.clone(),
        };
        MarketCreationWorkflow::new(proposal, deps, fast_settings()).expect("valid proposal")
    }

    fn workflow(chain: &Arc<MockChain>, indexer: &Arc<MockIndexer>) -> MarketCreationWorkflow {
        workflow_with(sample_proposal(), chain, indexer)
    }

    fn fee() -> U256 {
        U256::from(CREATION_FEE)
    }

    #[tokio::test]
    async fn check_skips_approve_when_allowance_covers_fee() {
        for allowance in [CREATION_FEE, CREATION_FEE + 1, u64::MAX] {
            let chain = Arc::new(MockChain::new().with_allowance(U256::from(allowance)));
            let indexer = Arc::new(MockIndexer::responding("m"));
            let mut wf = workflow(&chain, &indexer);

            assert_eq!(wf.check().await.unwrap(), Step::Create);
            assert_eq!(wf.history(), &[Step::Check, Step::Create]);
        }
    }

    #[tokio::test]
    async fn check_requires_approve_below_fee() {
        for allowance in [0, CREATION_FEE - 1] {
            let chain = Arc::new(MockChain::new().with_allowance(U256::from(allowance)));
            let indexer = Arc::new(MockIndexer::responding("m"));
            let mut wf = workflow(&chain, &indexer);

            assert_eq!(wf.check().await.unwrap(), Step::Approve);
        }
    }

    #[tokio::test]
    async fn check_failure_keeps_step_and_records_error() {
        let chain = Arc::new(MockChain::new());
        chain.fail_allowance("rpc unavailable");
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);

        assert!(wf.check().await.is_err());
        assert_eq!(wf.step(), Step::Check);
        let failure = wf.last_error().expect("failure recorded");
        assert_eq!(failure.step, Step::Check);
        assert!(failure.reason.contains("rpc unavailable"));

        chain.heal();
        assert_eq!(wf.retry().await.unwrap(), Step::Approve);
        assert!(wf.last_error().is_none());
    }

    #[tokio::test]
    async fn approval_confirmation_advances_to_create() {
        let chain = Arc::new(MockChain::new().with_confirmation_polls(1));
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);

        wf.check().await.unwrap();
        let hash = wf.submit_approval().await.unwrap();
        assert_eq!(wf.state().pending(TxKind::Approve).map(|tx| tx.hash), Some(hash));

        assert_eq!(wf.await_approval().await.unwrap(), Step::Create);
        assert_eq!(wf.state().approval_hash, Some(hash));
        assert!(wf.state().pending_approval.is_none());

        let approvals = chain.approvals();
        assert_eq!(approvals.len(), 1);
        assert_eq!(approvals[0].spender, sample_proposal().contracts.factory);
        assert_eq!(approvals[0].token, sample_proposal().contracts.collateral_token);
        assert_eq!(approvals[0].amount, fee());
    }

    #[tokio::test]
    async fn stale_allowance_after_approval_stays_in_approve() {
        let chain = Arc::new(MockChain::new());
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);

        wf.check().await.unwrap();
        wf.submit_approval().await.unwrap();
        chain.stale_allowance_read(U256::ZERO);

        assert_eq!(wf.await_approval().await.unwrap(), Step::Approve);
        assert_eq!(wf.step(), Step::Approve);
        assert_eq!(wf.last_error().map(|f| f.step), Some(Step::Approve));

        // A fresh read now sees the confirmed approval without a second approve.
        assert_eq!(wf.retry().await.unwrap(), Step::Create);
        assert_eq!(chain.approvals().len(), 1);
    }

    #[tokio::test]
    async fn rejected_approval_keeps_step_and_allows_retry() {
        let chain = Arc::new(MockChain::new());
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);

        wf.check().await.unwrap();
        chain.reject_next_write("user rejected the request");

        assert!(wf.submit_approval().await.is_err());
        assert_eq!(wf.step(), Step::Approve);
        assert!(wf.state().pending_approval.is_none());
        assert!(wf
            .last_error()
            .is_some_and(|f| f.reason.contains("user rejected")));

        assert_eq!(wf.retry().await.unwrap(), Step::Create);
    }

    #[tokio::test]
    async fn pending_approval_is_not_submitted_twice() {
        let chain = Arc::new(MockChain::new());
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);

        wf.check().await.unwrap();
        let first = wf.submit_approval().await.unwrap();
        let second = wf.submit_approval().await.unwrap();

        assert_eq!(first, second);
        assert_eq!(chain.approvals().len(), 1);
    }

    #[tokio::test]
    async fn reverted_approval_clears_pending() {
        let chain = Arc::new(MockChain::new());
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);

        wf.check().await.unwrap();
        chain.revert(chain.next_hash());
        wf.submit_approval().await.unwrap();

        let result = wf.await_approval().await;
        assert!(matches!(
            result,
            Err(Error::Execution(ExecutionError::Reverted { .. }))
        ));
        assert_eq!(wf.step(), Step::Approve);
        assert!(wf.state().pending_approval.is_none());
    }

    #[tokio::test]
    async fn approval_timeout_keeps_pending_hash_for_recheck() {
        let chain = Arc::new(MockChain::new());
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);

        wf.check().await.unwrap();
        let hash = chain.next_hash();
        chain.drop_transaction(hash);
        wf.submit_approval().await.unwrap();

        let result = wf.await_approval().await;
        assert!(matches!(
            result,
            Err(Error::Execution(ExecutionError::ConfirmationTimeout { .. }))
        ));
        assert_eq!(wf.state().pending_approval.as_ref().map(|tx| tx.hash), Some(hash));

        chain.include_transaction(hash);
        assert_eq!(wf.retry().await.unwrap(), Step::Create);
        assert_eq!(chain.approvals().len(), 1);
    }

    #[tokio::test]
    async fn creation_substitutes_caller_for_zero_oracle() {
        let chain = Arc::new(MockChain::new().with_allowance(fee()));
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);

        wf.check().await.unwrap();
        wf.submit_creation().await.unwrap();

        let markets = chain.created_markets();
        assert_eq!(markets.len(), 1);
        assert_eq!(markets[0].oracle, ACCOUNT);
    }

    #[tokio::test]
    async fn creation_keeps_explicit_oracle() {
        let oracle = address!("3333333333333333333333333333333333333333");
        let chain = Arc::new(MockChain::new().with_allowance(fee()));
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow_with(proposal_with_oracle(oracle), &chain, &indexer);

        wf.check().await.unwrap();
        wf.submit_creation().await.unwrap();

        let call = &chain.created_markets()[0];
        assert_eq!(call.oracle, oracle);
        assert_eq!(call.factory, sample_proposal().contracts.factory);
        assert_eq!(call.metadata_uri, sample_proposal().params.metadata_uri);
    }

    #[tokio::test]
    async fn indexing_starts_on_submission_not_confirmation() {
        let chain = Arc::new(MockChain::new().with_allowance(fee()));
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);

        wf.check().await.unwrap();
        let hash = wf.submit_creation().await.unwrap();

        assert_eq!(wf.step(), Step::Indexing);
        assert_eq!(wf.state().creation_hash(), Some(hash));
        assert_eq!(chain.receipt_polls(hash), 0);
        assert!(indexer.requests().is_empty());
    }

    #[tokio::test]
    async fn create_refused_in_wrong_step() {
        let chain = Arc::new(MockChain::new());
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);

        wf.check().await.unwrap();
        let result = wf.submit_creation().await;

        assert!(matches!(
            result,
            Err(Error::Workflow(WorkflowError::WrongStep {
                expected: Step::Create,
                actual: Step::Approve,
            }))
        ));
        assert!(chain.created_markets().is_empty());
    }

    #[tokio::test]
    async fn indexer_failure_still_reaches_done() {
        let chain = Arc::new(MockChain::new().with_allowance(fee()));
        let indexer = Arc::new(MockIndexer::failing("network unreachable"));
        let mut wf = workflow(&chain, &indexer);

        let completion = wf.run().await.unwrap();

        assert_eq!(wf.step(), Step::Done);
        assert_eq!(completion.market_id, None);
        assert_eq!(Some(completion.tx_hash), wf.state().creation_hash());
        assert!(wf.last_error().is_none());
        assert_eq!(indexer.requests().len(), 1);
    }

    #[tokio::test]
    async fn reverted_creation_returns_to_create() {
        let chain = Arc::new(MockChain::new().with_allowance(fee()));
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);

        wf.check().await.unwrap();
        chain.revert(chain.next_hash());
        wf.submit_creation().await.unwrap();

        assert!(wf.finalize().await.is_err());
        assert_eq!(wf.step(), Step::Create);
        assert!(wf.state().pending_creation.is_none());
        assert!(indexer.requests().is_empty());

        assert_eq!(wf.retry().await.unwrap(), Step::Indexing);
        let completion = wf.finalize().await.unwrap();
        assert_eq!(completion.market_id, Some(IndexedMarketId::from("m")));
    }

    #[tokio::test]
    async fn disconnected_wallet_blocks_check() {
        let chain = Arc::new(MockChain::new().with_account(None));
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);

        let result = wf.check().await;

        assert!(matches!(
            result,
            Err(Error::Execution(ExecutionError::WalletDisconnected))
        ));
        assert_eq!(wf.step(), Step::Check);
        assert_eq!(chain.allowance_reads(), 0);
    }

    #[tokio::test]
    async fn wrong_chain_blocks_check() {
        let chain = Arc::new(MockChain::new().with_chain_id(1));
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);

        let result = wf.check().await;

        assert!(matches!(
            result,
            Err(Error::Execution(ExecutionError::WrongChain {
                expected: 84532,
                actual: 1,
            }))
        ));
    }

    #[tokio::test]
    async fn wrong_chain_blocks_approval_submission() {
        let chain = Arc::new(MockChain::new().with_chain_id(1));
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);
        wf.transition(Step::Approve);

        let result = wf.submit_approval().await;

        assert!(matches!(
            result,
            Err(Error::Execution(ExecutionError::WrongChain { actual: 1, .. }))
        ));
        assert_eq!(wf.step(), Step::Approve);
        assert!(wf.state().pending_approval.is_none());
        assert_eq!(wf.last_error().map(|f| f.step), Some(Step::Approve));
        assert!(chain.approvals().is_empty());
    }

    #[tokio::test]
    async fn wrong_chain_blocks_creation_submission() {
        let chain = Arc::new(MockChain::new().with_allowance(fee()));
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);
        assert_eq!(wf.check().await.unwrap(), Step::Create);

        let foreign = Arc::new(MockChain::new().with_allowance(fee()).with_chain_id(1));
        wf.deps.writer = Arc::clone(&foreign) as Arc<dyn ChainWriter>;
        let result = wf.submit_creation().await;

        assert!(matches!(
            result,
            Err(Error::Execution(ExecutionError::WrongChain { actual: 1, .. }))
        ));
        assert_eq!(wf.step(), Step::Create);
        assert_eq!(wf.last_error().map(|f| f.step), Some(Step::Create));
        assert!(foreign.created_markets().is_empty());
    }

    #[tokio::test]
    async fn creation_below_cached_allowance_is_recorded() {
        let chain = Arc::new(MockChain::new().with_allowance(fee()));
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);
        wf.check().await.unwrap();
        if let Some(snapshot) = wf.state.allowance.as_mut() {
            snapshot.amount = fee() - U256::from(1u64);
        }

        let result = wf.submit_creation().await;

        assert!(matches!(
            result,
            Err(Error::Workflow(WorkflowError::InsufficientAllowance { .. }))
        ));
        assert_eq!(wf.step(), Step::Create);
        let failure = wf.last_error().expect("failure recorded");
        assert_eq!(failure.step, Step::Create);
        assert!(chain.created_markets().is_empty());
    }

    #[tokio::test]
    async fn index_request_describes_confirmed_market() {
        let chain = Arc::new(MockChain::new().with_allowance(fee()));
        let indexer = Arc::new(MockIndexer::responding("abc123"));
        let mut wf = workflow(&chain, &indexer);

        let completion = wf.run().await.unwrap();

        let requests = indexer.requests();
        assert_eq!(requests.len(), 1);
        let request = &requests[0];
        let proposal = sample_proposal();
        assert_eq!(request.question, proposal.description);
        assert_eq!(request.vibe, "Community");
        assert_eq!(request.creator, ACCOUNT);
        assert_eq!(request.tx_hash, completion.tx_hash);
        assert_eq!(request.trading_deadline, proposal.params.trading_deadline);
        assert_eq!(request.chain_id, proposal.chain_id);
    }

    #[tokio::test]
    async fn explorer_link_is_attached_when_configured() {
        let chain = Arc::new(MockChain::new().with_allowance(fee()));
        let indexer = Arc::new(MockIndexer::responding("m"));
        let deps = WorkflowDeps {
            reader: chain.clone(),
            writer: chain.clone(),
            indexer: indexer.clone(),
        };
        let settings = WorkflowSettings {
            explorer_url: Some("https://sepolia.basescan.org/".into()),
            ..fast_settings()
        };
        let mut wf = MarketCreationWorkflow::new(sample_proposal(), deps, settings).unwrap();

        let completion = wf.run().await.unwrap();

        assert_eq!(
            completion.explorer_url,
            Some(format!("https://sepolia.basescan.org/tx/{}", completion.tx_hash))
        );
    }

    #[tokio::test]
    async fn subscribers_observe_step_changes() {
        let chain = Arc::new(MockChain::new().with_allowance(fee()));
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut wf = workflow(&chain, &indexer);
        let rx = wf.subscribe();

        wf.check().await.unwrap();
        assert_eq!(*rx.borrow(), Step::Create);

        wf.run().await.unwrap();
        assert_eq!(*rx.borrow(), Step::Done);
    }

    #[tokio::test]
    async fn invalid_proposal_is_rejected() {
        let chain = Arc::new(MockChain::new());
        let indexer = Arc::new(MockIndexer::responding("m"));
        let mut proposal = sample_proposal();
        proposal.description = String::new();
        let deps = WorkflowDeps {
            reader: chain.clone(),
            writer: chain,
            indexer,
        };

        let result = MarketCreationWorkflow::new(proposal, deps, fast_settings());

        assert!(matches!(result, Err(Error::Domain(_))));
    }
}
