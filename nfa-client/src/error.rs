use alloy_primitives::TxHash;
use thiserror::Error;

use crate::state::DraftField;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Wallet is not available: {0}")]
    WalletUnavailable(anyhow::Error),

    #[error("Request rejected by the user: {0}")]
    UserRejected(String),

    #[error("Account request failed: {0}")]
    AccountRequestFailed(anyhow::Error),

    #[error("Wallet did not authorize any account.")]
    NoAccounts,

    #[error("Failed to switch to chain {chain_id:#x}: {source}")]
    NetworkSwitchFailed {
        chain_id: u64,
        source: anyhow::Error,
    },

    #[error("Connect wallet first!")]
    NotConnected,

    #[error("Please enter name and symbol.")]
    InvalidDraft { missing: DraftField },

    #[error("Another action is still in progress.")]
    ActionInProgress,

    #[error("Transaction submission failed: {0}")]
    SubmissionFailed(anyhow::Error),

    #[error("Transaction {tx_hash} failed: {reason}")]
    ConfirmationFailed { tx_hash: TxHash, reason: String },

    #[error("Timed out waiting for confirmation of transaction {0}")]
    ConfirmationTimeout(TxHash),

    #[error("Error occurred due to a configuration for {0}")]
    InvalidConfiguration(String),
}
