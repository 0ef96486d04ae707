use anyhow::anyhow;
use jsonrpsee::core::client::Error as ClientError;
use nfa_client::wallet::WalletError;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, RpcWalletError>;

/// EIP-1193: the user rejected the request
pub const USER_REJECTED_REQUEST: i32 = 4001;

/// EIP-1193: the requested method/account has not been authorized by the user
pub const UNAUTHORIZED: i32 = 4100;

/// EIP-1193: the provider is disconnected from all chains
pub const DISCONNECTED: i32 = 4900;

#[derive(Error, Debug)]
pub enum RpcWalletError {
    #[error("Wallet returned error {code}: {message}")]
    Rpc { code: i32, message: String },

    #[error("Wallet connection failed: {0}")]
    Connection(anyhow::Error),

    #[error("Couldn't decode the {label} result from the wallet response: {source}")]
    ConversionError {
        label: String,
        source: anyhow::Error,
    },

    #[error(transparent)]
    JSONRpcError(#[from] ClientError),
}

impl RpcWalletError {
    /// Classify a client error of the `method` request
    pub fn from_client_error(method: &str, err: ClientError) -> Self {
        match err {
            ClientError::Call(err) => RpcWalletError::Rpc {
                code: err.code(),
                message: err.message().to_string(),
            },
            ClientError::Transport(err) => RpcWalletError::Connection(anyhow!(err)),
            ClientError::RestartNeeded(err) => RpcWalletError::Connection(anyhow!(err)),
            ClientError::ParseError(err) => RpcWalletError::ConversionError {
                label: method.to_string(),
                source: anyhow!(err),
            },
            err => RpcWalletError::JSONRpcError(err),
        }
    }
}

impl From<RpcWalletError> for WalletError {
    fn from(err: RpcWalletError) -> WalletError {
        match err {
            RpcWalletError::Rpc {
                code: USER_REJECTED_REQUEST | UNAUTHORIZED,
                message,
            } => WalletError::UserRejected(message),
            err @ RpcWalletError::Rpc {
                code: DISCONNECTED, ..
            } => WalletError::Unavailable(anyhow!(err)),
            err @ RpcWalletError::Connection(_) => WalletError::Unavailable(anyhow!(err)),
            err => WalletError::Other(anyhow!(err)),
        }
    }
}
