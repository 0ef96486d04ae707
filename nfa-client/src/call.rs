//! Typed contract calls and the actions built from them

use std::fmt;

use alloy_primitives::{Address, Bytes};
use alloy_sol_types::SolCall;

use crate::config::DeploymentConfig;
use crate::contracts::{IMorToken, INfaProvider};
use crate::error::Result;
use crate::state::NfaDraft;
use crate::status::ActionKind;

/// Remote functions the client calls
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    CreateNfa,
    CreateNfaWithPayment,
    Faucet,
    Approve,
}

impl fmt::Display for CallKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallKind::CreateNfa => f.write_str("createNFA"),
            CallKind::CreateNfaWithPayment => f.write_str("createNFAWithPayment"),
            CallKind::Faucet => f.write_str("faucet"),
            CallKind::Approve => f.write_str("approve"),
        }
    }
}

/// A single call against a deployed contract, ready to be signed and sent
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallSpec {
    pub kind: CallKind,
    /// Target contract
    pub to: Address,
    /// ABI encoded call data
    pub input: Bytes,
}

impl CallSpec {
    fn new(kind: CallKind, to: Address, call: impl SolCall) -> Self {
        CallSpec {
            kind,
            to,
            input: call.abi_encode().into(),
        }
    }

    pub fn create_nfa(config: &DeploymentConfig, draft: &NfaDraft) -> Result<Self> {
        Ok(Self::new(
            CallKind::CreateNfa,
            config.nfa_factory,
            INfaProvider::createNFACall {
                name: draft.name.clone(),
                symbol: draft.symbol.clone(),
                offchainNFAData: config.nfa_data_tag()?,
            },
        ))
    }

    pub fn create_nfa_with_payment(
        config: &DeploymentConfig,
        payment_token: Address,
        draft: &NfaDraft,
    ) -> Result<Self> {
        Ok(Self::new(
            CallKind::CreateNfaWithPayment,
            config.nfa_factory,
            INfaProvider::createNFAWithPaymentCall {
                token: payment_token,
                name: draft.name.clone(),
                symbol: draft.symbol.clone(),
                offchainNFAData: config.nfa_data_tag()?,
            },
        ))
    }

    pub fn faucet(config: &DeploymentConfig) -> Self {
        Self::new(
            CallKind::Faucet,
            config.payment_token,
            IMorToken::faucetCall {},
        )
    }

    /// Allow the factory to move the configured amount of payment token
    pub fn approve_factory(config: &DeploymentConfig, payment_token: Address) -> Self {
        Self::new(
            CallKind::Approve,
            payment_token,
            IMorToken::approveCall {
                spender: config.nfa_factory,
                amount: config.approval_amount,
            },
        )
    }
}

/// A user action. Each one submits a fixed, ordered list of calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ActionRequest {
    CreateNfa(NfaDraft),
    RequestFaucet,
    CreateNfaWithPayment {
        payment_token: Address,
        draft: NfaDraft,
    },
}

impl ActionRequest {
    pub fn kind(&self) -> ActionKind {
        match self {
            ActionRequest::CreateNfa(_) => ActionKind::CreateNfa,
            ActionRequest::RequestFaucet => ActionKind::RequestFaucet,
            ActionRequest::CreateNfaWithPayment { .. } => ActionKind::CreateNfaWithPayment,
        }
    }

    pub fn draft(&self) -> Option<&NfaDraft> {
        match self {
            ActionRequest::CreateNfa(draft) => Some(draft),
            ActionRequest::RequestFaucet => None,
            ActionRequest::CreateNfaWithPayment { draft, .. } => Some(draft),
        }
    }

    /// Calls to submit, in order. A call is only sent once the previous one is confirmed.
    pub fn plan(&self, config: &DeploymentConfig) -> Result<Vec<CallSpec>> {
        Ok(match self {
            ActionRequest::CreateNfa(draft) => vec![CallSpec::create_nfa(config, draft)?],
            ActionRequest::RequestFaucet => vec![CallSpec::faucet(config)],
            ActionRequest::CreateNfaWithPayment {
                payment_token,
                draft,
            } => vec![
                CallSpec::approve_factory(config, *payment_token),
                CallSpec::create_nfa_with_payment(config, *payment_token, draft)?,
            ],
        })
    }
}
