//! EIP-1193 request parameters and responses

use alloy_primitives::{Address, BlockHash, Bytes, TxHash, U64};
use nfa_client::call::CallSpec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SwitchChainParams {
    /// Hex encoded chain id, e.g. `0xaa36a7`
    pub chain_id: String,
}

impl SwitchChainParams {
    pub fn new(chain_id: u64) -> Self {
        SwitchChainParams {
            chain_id: format!("{:#x}", chain_id),
        }
    }
}

/// `eth_sendTransaction` parameter. Gas and nonce are left to the wallet.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TransactionRequest {
    pub from: Address,
    pub to: Address,
    pub data: Bytes,
}

impl TransactionRequest {
    pub fn new(from: Address, call: &CallSpec) -> Self {
        TransactionRequest {
            from,
            to: call.to,
            data: call.input.clone(),
        }
    }
}

/// Subset of an `eth_getTransactionReceipt` response
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct TransactionReceipt {
    pub transaction_hash: TxHash,
    pub block_hash: Option<BlockHash>,
    pub block_number: Option<U64>,
    /// `0x1` on success, `0x0` when reverted (post-Byzantium receipts only)
    pub status: Option<U64>,
}

impl TransactionReceipt {
    pub fn succeeded(&self) -> bool {
        self.status.map_or(true, |status| status == U64::from(1))
    }
}
