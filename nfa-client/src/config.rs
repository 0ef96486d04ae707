//! Deployment configuration: target chain, contract addresses and fixed call parameters

use std::path::Path;
use std::time::Duration;

use alloy_primitives::{address, Address, B256, U256};
use derive_builder::Builder;
use serde::Deserialize;

use crate::error::{Error, Result};

/// Sepolia test network (0xaa36a7)
pub const SEPOLIA_CHAIN_ID: u64 = 11_155_111;

pub const DEFAULT_NFA_FACTORY: Address = address!("6136d466F878e6C6Dd8d050e7Ae2e57888Dcab22");

pub const DEFAULT_PAYMENT_TOKEN: Address = address!("155aD9f83F88c19C17E931f8a57d250984467561");

/// One whole token with 18 decimals
pub const DEFAULT_APPROVAL_AMOUNT: U256 = U256::from_limbs([1_000_000_000_000_000_000, 0, 0, 0]);

pub const DEFAULT_NFA_DATA_TAG: &str = "ExampleData";

#[derive(Debug, Builder, Clone, Deserialize, PartialEq, Eq)]
#[builder(build_fn(validate = "Self::validate"))]
#[serde(default, deny_unknown_fields)]
pub struct DeploymentConfig {
    #[builder(default = "SEPOLIA_CHAIN_ID")]
    pub chain_id: u64,
    #[builder(default = "DEFAULT_NFA_FACTORY")]
    pub nfa_factory: Address,
    #[builder(default = "DEFAULT_PAYMENT_TOKEN")]
    pub payment_token: Address,
    /// Amount of payment token the factory is allowed to move before a paid creation
    #[builder(default = "DEFAULT_APPROVAL_AMOUNT")]
    pub approval_amount: U256,
    /// Off-chain data tag attached to every created NFA, stored as bytes32
    #[builder(default = "DEFAULT_NFA_DATA_TAG.to_string()", setter(into))]
    pub nfa_data_tag: String,
    /// Upper bound on each confirmation wait. Waits indefinitely when unset.
    #[builder(default = "None")]
    pub confirmation_timeout_secs: Option<u64>,
}

impl Default for DeploymentConfig {
    fn default() -> Self {
        DeploymentConfig {
            chain_id: SEPOLIA_CHAIN_ID,
            nfa_factory: DEFAULT_NFA_FACTORY,
            payment_token: DEFAULT_PAYMENT_TOKEN,
            approval_amount: DEFAULT_APPROVAL_AMOUNT,
            nfa_data_tag: DEFAULT_NFA_DATA_TAG.to_string(),
            confirmation_timeout_secs: None,
        }
    }
}

impl DeploymentConfigBuilder {
    fn validate(&self) -> std::result::Result<(), String> {
        if let Some(tag) = &self.nfa_data_tag {
            encode_bytes32_string(tag).map_err(|err| err.to_string())?;
        }
        if let Some(Some(0)) = self.confirmation_timeout_secs {
            return Err("confirmation_timeout_secs must be positive".to_string());
        }
        if let Some(amount) = self.approval_amount {
            if amount.is_zero() {
                return Err("approval_amount must be positive".to_string());
            }
        }
        Ok(())
    }
}

impl DeploymentConfig {
    /// Read a JSON configuration file. Missing fields take their default values,
    /// unknown fields are rejected.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path).map_err(|err| {
            Error::InvalidConfiguration(format!("{} ({})", path.display(), err))
        })?;
        Self::from_json_str(&raw)
    }

    pub fn from_json_str(raw: &str) -> Result<Self> {
        let config: DeploymentConfig = serde_json::from_str(raw)
            .map_err(|err| Error::InvalidConfiguration(format!("deployment JSON: {}", err)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        self.nfa_data_tag()?;
        if self.confirmation_timeout_secs == Some(0) {
            return Err(Error::InvalidConfiguration(
                "confirmation_timeout_secs".to_string(),
            ));
        }
        if self.approval_amount.is_zero() {
            return Err(Error::InvalidConfiguration("approval_amount".to_string()));
        }
        Ok(())
    }

    /// The off-chain data tag as a bytes32 value
    pub fn nfa_data_tag(&self) -> Result<B256> {
        encode_bytes32_string(&self.nfa_data_tag)
    }

    pub fn confirmation_timeout(&self) -> Option<Duration> {
        self.confirmation_timeout_secs.map(Duration::from_secs)
    }
}

/// Encode a short string into a bytes32 value: UTF-8 bytes, right padded with zeros.
/// At most 31 bytes fit, so the value always keeps a terminating zero byte.
pub fn encode_bytes32_string(text: &str) -> Result<B256> {
    let bytes = text.as_bytes();
    if bytes.len() > 31 {
        return Err(Error::InvalidConfiguration(format!(
            "nfa_data_tag is {} bytes long, bytes32 strings hold at most 31",
            bytes.len()
        )));
    }
    let mut word = B256::ZERO;
    word[..bytes.len()].copy_from_slice(bytes);
    Ok(word)
}
