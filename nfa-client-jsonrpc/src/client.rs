use std::time::Duration;

use alloy_primitives::{Address, TxHash};
use anyhow::anyhow;
use derive_builder::Builder;
use jsonrpsee::{
    core::client::ClientT,
    core::traits::ToRpcParams,
    rpc_params,
    ws_client::{WsClient, WsClientBuilder},
};
use nfa_client::{
    call::CallSpec,
    wallet::{TxOutcome, Wallet, WalletError},
};
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use url::Url;

use super::{
    api::{SwitchChainParams, TransactionReceipt, TransactionRequest},
    error::{Result, RpcWalletError},
};

#[derive(Debug, Builder, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct RpcWalletConfig {
    #[builder(default = "Url::parse(\"http://127.0.0.1:8545\").unwrap()")]
    pub url: Url,
    /// Delay between two receipt queries while awaiting a confirmation
    #[builder(default = "4000")]
    pub poll_interval_ms: u64,
    /// Time allowed for opening the websocket connection
    #[builder(default = "30")]
    pub connection_timeout: u64,
}

impl RpcWalletConfigBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(url) = &self.url {
            match url.scheme() {
                "http" | "https" | "ws" | "wss" => {}
                scheme => {
                    return Err(format!(
                        "Url scheme invalid in RpcWalletConfig. Expected http/https/ws/wss, but got {}",
                        scheme,
                    ))
                }
            }
        }
        if let Some(0) = self.poll_interval_ms {
            return Err("poll_interval_ms must be positive".to_string());
        }
        Ok(())
    }
}

impl RpcWalletConfig {
    pub fn get_ws_url(&self) -> Url {
        let mut url = self.url.clone();
        let scheme = match url.scheme() {
            "https" | "wss" => "wss",
            _ => "ws",
        };
        // JUSTIFICATION: The builder only accepts http(s) and ws(s) urls,
        // and switching between these special schemes always succeeds.
        url.set_scheme(scheme).unwrap();
        url
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

/// Wallet reachable through an EIP-1193 JSON-RPC endpoint (a browser wallet bridge,
/// or a node holding unlocked accounts). The endpoint signs every transaction.
pub struct RpcWallet {
    config: RpcWalletConfig,
    client: WsClient,
}

impl RpcWallet {
    pub async fn connect(config: RpcWalletConfig) -> Result<Self> {
        let url = config.get_ws_url();
        debug!(%url, "Connecting to wallet endpoint.");
        let client = WsClientBuilder::default()
            .connection_timeout(Duration::from_secs(config.connection_timeout))
            .build(&url)
            .await
            .map_err(|err| RpcWalletError::Connection(anyhow!(err)))?;

        Ok(Self { config, client })
    }

    pub fn get_config(&self) -> &RpcWalletConfig {
        &self.config
    }

    async fn request<P, U>(&self, method: &str, params: P) -> Result<U>
    where
        U: DeserializeOwned,
        P: ToRpcParams + Send,
    {
        self.client.request(method, params).await.map_err(|err| {
            debug!(%err, method, "Wallet JSON RPC call error.");
            RpcWalletError::from_client_error(method, err)
        })
    }

    async fn get_transaction_receipt(&self, tx_hash: &TxHash) -> Result<Option<TransactionReceipt>> {
        self.request("eth_getTransactionReceipt", rpc_params![tx_hash])
            .await
    }
}

impl Wallet for RpcWallet {
    async fn request_accounts(&self) -> std::result::Result<Vec<Address>, WalletError> {
        debug!("Requesting wallet accounts.");
        Ok(self.request("eth_requestAccounts", rpc_params![]).await?)
    }

    async fn switch_chain(&self, chain_id: u64) -> std::result::Result<(), WalletError> {
        let params = SwitchChainParams::new(chain_id);
        debug!(chain_id = %params.chain_id, "Switching wallet chain.");
        let _: serde_json::Value = self
            .request("wallet_switchEthereumChain", rpc_params![params])
            .await?;
        Ok(())
    }

    async fn sign_and_send(
        &self,
        from: Address,
        call: &CallSpec,
    ) -> std::result::Result<TxHash, WalletError> {
        debug!(call = %call.kind, %from, "Sending transaction to wallet.");
        let params = TransactionRequest::new(from, call);
        Ok(self
            .request("eth_sendTransaction", rpc_params![params])
            .await?)
    }

    async fn await_tx_confirm(
        &self,
        tx_hash: &TxHash,
    ) -> std::result::Result<TxOutcome, WalletError> {
        info!(?tx_hash, "Awaiting transaction receipt.");
        loop {
            match self.get_transaction_receipt(tx_hash).await? {
                Some(receipt) if receipt.block_number.is_some() => {
                    return Ok(receipt_outcome(&receipt));
                }
                _ => {
                    debug!(?tx_hash, "No receipt yet.");
                    tokio::time::sleep(self.config.poll_interval()).await;
                }
            }
        }
    }
}

fn receipt_outcome(receipt: &TransactionReceipt) -> TxOutcome {
    if receipt.succeeded() {
        TxOutcome::Succeeded
    } else {
        TxOutcome::Reverted {
            reason: match receipt.block_number {
                Some(block_number) => format!("transaction reverted in block {}", block_number),
                None => "transaction reverted".to_string(),
            },
        }
    }
}
