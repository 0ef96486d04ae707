//! Application state and its reducer

use std::fmt;

use alloy_primitives::Address;

use crate::error::{Error, Result};
use crate::status::Status;

/// Wallet connection. Only a connected state carries an account.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connected {
        account: Address,
        /// The wallet accepted the switch to the configured chain
        on_target_network: bool,
    },
}

impl ConnectionState {
    pub fn is_connected(&self) -> bool {
        matches!(self, ConnectionState::Connected { .. })
    }

    pub fn account(&self) -> Option<Address> {
        match self {
            ConnectionState::Connected { account, .. } => Some(*account),
            ConnectionState::Disconnected => None,
        }
    }
}

/// User entered NFA parameters
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NfaDraft {
    pub name: String,
    pub symbol: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftField {
    Name,
    Symbol,
}

impl fmt::Display for DraftField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftField::Name => f.write_str("name"),
            DraftField::Symbol => f.write_str("symbol"),
        }
    }
}

impl NfaDraft {
    pub fn new(name: impl Into<String>, symbol: impl Into<String>) -> Self {
        NfaDraft {
            name: name.into(),
            symbol: symbol.into(),
        }
    }

    /// Both fields are required
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            Err(Error::InvalidDraft {
                missing: DraftField::Name,
            })
        } else if self.symbol.is_empty() {
            Err(Error::InvalidDraft {
                missing: DraftField::Symbol,
            })
        } else {
            Ok(())
        }
    }
}

/// Changes applied to the application state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StateEvent {
    Connected { account: Address },
    NetworkSwitched,
    Status(Status),
}

/// Everything the client tracks between actions
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppState {
    pub connection: ConnectionState,
    /// Latest status, overwritten by every event
    pub status: Option<Status>,
}

impl AppState {
    pub fn reduce(self, event: StateEvent) -> AppState {
        match event {
            StateEvent::Connected { account } => AppState {
                connection: ConnectionState::Connected {
                    account,
                    on_target_network: false,
                },
                ..self
            },
            StateEvent::NetworkSwitched => match self.connection {
                ConnectionState::Connected { account, .. } => AppState {
                    connection: ConnectionState::Connected {
                        account,
                        on_target_network: true,
                    },
                    ..self
                },
                ConnectionState::Disconnected => self,
            },
            StateEvent::Status(status) => AppState {
                status: Some(status),
                ..self
            },
        }
    }
}
