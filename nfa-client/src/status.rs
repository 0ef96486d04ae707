//! Human readable status of the latest action

use std::fmt;

use alloy_primitives::{Address, TxHash};
use tokio::sync::watch;

use crate::call::CallKind;

/// User triggered actions
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ActionKind {
    CreateNfa,
    RequestFaucet,
    CreateNfaWithPayment,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::CreateNfa => f.write_str("create NFA"),
            ActionKind::RequestFaucet => f.write_str("request faucet"),
            ActionKind::CreateNfaWithPayment => f.write_str("create NFA with payment"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Status {
    WalletConnected(Address),
    /// A transaction was accepted by the wallet, confirmation pending
    Submitted { kind: CallKind, tx_hash: TxHash },
    Succeeded(ActionKind),
    Failed(String),
}

impl Status {
    pub fn is_failure(&self) -> bool {
        matches!(self, Status::Failed(_))
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Status::WalletConnected(account) => write!(f, "Wallet connected: {}", account),
            Status::Submitted { kind, tx_hash } => match kind {
                CallKind::Approve => write!(f, "Approval transaction sent: {}", tx_hash),
                CallKind::Faucet => write!(f, "Faucet transaction sent: {}", tx_hash),
                CallKind::CreateNfa | CallKind::CreateNfaWithPayment => {
                    write!(f, "Transaction sent: {}", tx_hash)
                }
            },
            Status::Succeeded(action) => match action {
                ActionKind::CreateNfa => f.write_str("NFA created successfully!"),
                ActionKind::RequestFaucet => f.write_str("MOR tokens received!"),
                ActionKind::CreateNfaWithPayment => f.write_str("NFA created with MOR payment!"),
            },
            Status::Failed(message) => write!(f, "Error: {}", message),
        }
    }
}

/// Sink for status updates. Every call replaces the previous status.
///
/// Every failure of a connect or action is reported as `Status::Failed`, except
/// `Error::ActionInProgress`: a start refused while another action is running only
/// returns the error, so the running action's status is not overwritten.
pub trait StatusReporter {
    fn set_status(&self, status: Status);
}

impl<F: Fn(Status)> StatusReporter for F {
    fn set_status(&self, status: Status) {
        self(status)
    }
}

/// Current-value status store observed by a display layer
#[derive(Debug)]
pub struct StatusBoard {
    sender: watch::Sender<Option<Status>>,
}

impl Default for StatusBoard {
    fn default() -> Self {
        Self::new()
    }
}

impl StatusBoard {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(None);
        StatusBoard { sender }
    }

    pub fn subscribe(&self) -> watch::Receiver<Option<Status>> {
        self.sender.subscribe()
    }

    pub fn current(&self) -> Option<Status> {
        self.sender.borrow().clone()
    }
}

impl StatusReporter for StatusBoard {
    fn set_status(&self, status: Status) {
        self.sender.send_replace(Some(status));
    }
}
