//! Wallet trait

use alloy_primitives::{Address, TxHash};
use anyhow::anyhow;
use std::future::Future;
use thiserror::Error;

use crate::call::CallSpec;

/// External wallet holding the private keys (directly or indirectly).
/// It authorizes accounts, signs and sends calls, and reports their on-chain outcome.
pub trait Wallet {
    /// Ask the wallet to authorize accounts. May wait indefinitely for the user.
    fn request_accounts(&self) -> impl Future<Output = Result<Vec<Address>, WalletError>>;

    /// Ask the wallet to switch to the given chain
    fn switch_chain(&self, chain_id: u64) -> impl Future<Output = Result<(), WalletError>>;

    /// Sign a call with the account `from` and send it, returning the transaction hash
    /// as soon as the transaction is accepted (not waiting for inclusion)
    fn sign_and_send(
        &self,
        from: Address,
        call: &CallSpec,
    ) -> impl Future<Output = Result<TxHash, WalletError>>;

    /// Wait until the transaction is included and its outcome is known
    fn await_tx_confirm(
        &self,
        tx_hash: &TxHash,
    ) -> impl Future<Output = Result<TxOutcome, WalletError>>;
}

/// Outcome of an included transaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TxOutcome {
    Succeeded,
    Reverted { reason: String },
}

#[derive(Error, Debug)]
pub enum WalletError {
    #[error("{0}")]
    Unavailable(anyhow::Error),

    #[error("{0}")]
    UserRejected(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// A missing wallet: every request fails as unavailable
impl<W: Wallet> Wallet for Option<W> {
    async fn request_accounts(&self) -> Result<Vec<Address>, WalletError> {
        match self {
            Some(wallet) => wallet.request_accounts().await,
            None => Err(no_wallet()),
        }
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        match self {
            Some(wallet) => wallet.switch_chain(chain_id).await,
            None => Err(no_wallet()),
        }
    }

    async fn sign_and_send(&self, from: Address, call: &CallSpec) -> Result<TxHash, WalletError> {
        match self {
            Some(wallet) => wallet.sign_and_send(from, call).await,
            None => Err(no_wallet()),
        }
    }

    async fn await_tx_confirm(&self, tx_hash: &TxHash) -> Result<TxOutcome, WalletError> {
        match self {
            Some(wallet) => wallet.await_tx_confirm(tx_hash).await,
            None => Err(no_wallet()),
        }
    }
}

fn no_wallet() -> WalletError {
    WalletError::Unavailable(anyhow!("no wallet found in the host environment"))
}
