//! NFA factory client
//!
//! Connects to a wallet and submits the NFA factory and MOR token calls through it,
//! reporting a single current status line for every step.

use crate::call::{ActionRequest, CallSpec};
use crate::config::DeploymentConfig;
use crate::error::{Error, Result};
use crate::state::{AppState, NfaDraft, StateEvent};
use crate::status::{Status, StatusReporter};
use crate::wallet::{TxOutcome, Wallet, WalletError};
use alloy_primitives::{Address, TxHash};
use anyhow::anyhow;
use flight::SingleFlight;
use std::sync::{Mutex, PoisonError};
use tracing::{debug, info, warn};

pub mod call;
#[cfg(feature = "clap")]
pub mod clap;
pub mod config;
pub mod contracts;
pub mod error;
mod flight;
pub mod state;
pub mod status;
pub mod wallet;

/// Transaction submission client
///
/// Owns the application state. Only one connect or action runs at a time,
/// anything started meanwhile fails with `Error::ActionInProgress`. That refusal
/// is returned to the caller but not reported, the status stays with the running action.
pub struct NfaClient<W, R> {
    wallet: W,
    config: DeploymentConfig,
    reporter: R,
    state: Mutex<AppState>,
    flight: SingleFlight,
}

impl<W: Wallet, R: StatusReporter> NfaClient<W, R> {
    pub fn new(wallet: W, config: DeploymentConfig, reporter: R) -> Self {
        NfaClient {
            wallet,
            config,
            reporter,
            state: Mutex::new(AppState::default()),
            flight: SingleFlight::default(),
        }
    }

    pub fn config(&self) -> &DeploymentConfig {
        &self.config
    }

    pub fn wallet(&self) -> &W {
        &self.wallet
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Snapshot of the current application state
    pub fn state(&self) -> AppState {
        self.state
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn apply(&self, event: StateEvent) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = std::mem::take(&mut *state).reduce(event);
    }

    fn report(&self, status: Status) {
        debug!(%status, "Status changed.");
        self.apply(StateEvent::Status(status.clone()));
        self.reporter.set_status(status);
    }

    fn report_failure(&self, err: &Error) {
        self.report(Status::Failed(err.to_string()));
    }

    /// Ask the wallet for an account, then switch it to the configured chain.
    /// A failed chain switch is reported, but the connection stands.
    pub async fn connect(&self) -> Result<Address> {
        let Some(_flight) = self.flight.try_acquire() else {
            warn!("Connect requested while another action is in progress.");
            return Err(Error::ActionInProgress);
        };

        let account = match self.request_account().await {
            Ok(account) => account,
            Err(err) => {
                self.report_failure(&err);
                return Err(err);
            }
        };

        info!(%account, "Wallet connected.");
        self.apply(StateEvent::Connected { account });
        self.report(Status::WalletConnected(account));

        let chain_id = self.config.chain_id;
        match self.wallet.switch_chain(chain_id).await {
            Ok(()) => {
                debug!(chain_id, "Switched wallet network.");
                self.apply(StateEvent::NetworkSwitched);
            }
            Err(err) => {
                let err = Error::NetworkSwitchFailed {
                    chain_id,
                    source: anyhow!(err),
                };
                warn!(%err, "Continuing on the wallet's current network.");
                self.report_failure(&err);
            }
        }

        Ok(account)
    }

    async fn request_account(&self) -> Result<Address> {
        let accounts = self
            .wallet
            .request_accounts()
            .await
            .map_err(|err| match err {
                WalletError::Unavailable(source) => Error::WalletUnavailable(source),
                WalletError::UserRejected(reason) => Error::UserRejected(reason),
                WalletError::Other(source) => Error::AccountRequestFailed(source),
            })?;

        accounts.first().copied().ok_or(Error::NoAccounts)
    }

    /// Create an NFA through the factory
    pub async fn submit_create_nfa(&self, draft: &NfaDraft) -> Result<TxHash> {
        self.dispatch(ActionRequest::CreateNfa(draft.clone())).await
    }

    /// Request test tokens from the payment token faucet
    pub async fn submit_faucet_request(&self) -> Result<TxHash> {
        self.dispatch(ActionRequest::RequestFaucet).await
    }

    /// Approve the factory to take the fee, then create a paid NFA.
    /// Returns the hash of the creating transaction.
    pub async fn submit_create_nfa_with_payment(&self, draft: &NfaDraft) -> Result<TxHash> {
        self.dispatch(ActionRequest::CreateNfaWithPayment {
            payment_token: self.config.payment_token,
            draft: draft.clone(),
        })
        .await
    }

    /// Run an action to completion: every call of its plan is sent and confirmed in order.
    /// Returns the hash of the last transaction.
    pub async fn dispatch(&self, request: ActionRequest) -> Result<TxHash> {
        let Some(_flight) = self.flight.try_acquire() else {
            warn!(action = %request.kind(), "Action requested while another one is in progress.");
            return Err(Error::ActionInProgress);
        };

        match self.execute(&request).await {
            Ok(tx_hash) => {
                info!(action = %request.kind(), ?tx_hash, "Action completed.");
                self.report(Status::Succeeded(request.kind()));
                Ok(tx_hash)
            }
            Err(err) => {
                warn!(action = %request.kind(), %err, "Action failed.");
                self.report_failure(&err);
                Err(err)
            }
        }
    }

    async fn execute(&self, request: &ActionRequest) -> Result<TxHash> {
        let account = self.state().connection.account().ok_or(Error::NotConnected)?;
        if let Some(draft) = request.draft() {
            draft.validate()?;
        }

        let plan = request.plan(&self.config)?;
        let mut last_tx_hash = None;
        for call in plan.iter() {
            let tx_hash = self.submit(account, call).await?;
            self.await_confirmation(&tx_hash).await?;
            last_tx_hash = Some(tx_hash);
        }

        last_tx_hash.ok_or_else(|| Error::SubmissionFailed(anyhow!("empty call plan")))
    }

    async fn submit(&self, account: Address, call: &CallSpec) -> Result<TxHash> {
        debug!(call = %call.kind, to = %call.to, "Submitting transaction.");
        let tx_hash = self
            .wallet
            .sign_and_send(account, call)
            .await
            .map_err(|err| match err {
                WalletError::UserRejected(reason) => Error::UserRejected(reason),
                WalletError::Unavailable(source) => Error::WalletUnavailable(source),
                WalletError::Other(source) => Error::SubmissionFailed(source),
            })?;

        info!(call = %call.kind, ?tx_hash, "Transaction submitted.");
        self.report(Status::Submitted {
            kind: call.kind,
            tx_hash,
        });
        Ok(tx_hash)
    }

    async fn await_confirmation(&self, tx_hash: &TxHash) -> Result<()> {
        info!(?tx_hash, "Awaiting transaction confirmation.");
        let outcome = match self.config.confirmation_timeout() {
            Some(timeout) => tokio::time::timeout(timeout, self.wallet.await_tx_confirm(tx_hash))
                .await
                .map_err(|_| Error::ConfirmationTimeout(*tx_hash))?,
            None => self.wallet.await_tx_confirm(tx_hash).await,
        };

        match outcome {
            Ok(TxOutcome::Succeeded) => {
                debug!(?tx_hash, "Transaction confirmed.");
                Ok(())
            }
            Ok(TxOutcome::Reverted { reason }) => Err(Error::ConfirmationFailed {
                tx_hash: *tx_hash,
                reason,
            }),
            Err(err) => Err(Error::ConfirmationFailed {
                tx_hash: *tx_hash,
                reason: err.to_string(),
            }),
        }
    }
}
