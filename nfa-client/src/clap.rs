use alloy_primitives::{
    utils::{ParseUnits, Unit},
    Address, U256,
};
use anyhow::anyhow;
use clap::Parser;

use crate::config::{DeploymentConfig, DeploymentConfigBuilder};

#[derive(Debug, Clone, Parser)]
pub struct DeploymentOpts {
    /// Chain the wallet is switched to after connecting (defaults to Sepolia)
    #[arg(long, value_name = "CHAIN_ID")]
    pub chain_id: Option<u64>,

    /// NFA factory contract address
    #[arg(long, value_name = "ADDRESS")]
    pub nfa_factory: Option<Address>,

    /// MOR payment token contract address
    #[arg(long, value_name = "ADDRESS")]
    pub payment_token: Option<Address>,

    /// Amount approved for a paid creation, in whole tokens (e.g. "1" or "0.5")
    #[arg(long, value_name = "TOKENS")]
    pub approval_amount: Option<String>,

    /// Off-chain data tag attached to created NFAs (at most 31 bytes)
    #[arg(long, value_name = "TAG")]
    pub nfa_data_tag: Option<String>,

    /// Give up waiting for a confirmation after this many seconds
    #[arg(long, value_name = "SECONDS")]
    pub confirmation_timeout_secs: Option<u64>,
}

impl TryFrom<DeploymentOpts> for DeploymentConfig {
    type Error = anyhow::Error;
    fn try_from(opts: DeploymentOpts) -> Result<DeploymentConfig, anyhow::Error> {
        let mut builder = DeploymentConfigBuilder::default();

        if let Some(chain_id) = opts.chain_id {
            builder.chain_id(chain_id);
        }
        if let Some(nfa_factory) = opts.nfa_factory {
            builder.nfa_factory(nfa_factory);
        }
        if let Some(payment_token) = opts.payment_token {
            builder.payment_token(payment_token);
        }
        if let Some(amount) = opts.approval_amount {
            // Negative amounts parse as I256, which must never become an allowance.
            match ParseUnits::parse_units(&amount, Unit::ETHER) {
                Ok(ParseUnits::U256(value)) if value > U256::ZERO => {
                    builder.approval_amount(value);
                }
                Ok(_) => return Err(anyhow!("Invalid approval amount {}: must be positive", amount)),
                Err(err) => return Err(anyhow!("Invalid approval amount {}: {}", amount, err)),
            }
        }
        if let Some(tag) = opts.nfa_data_tag {
            builder.nfa_data_tag(tag);
        }
        builder.confirmation_timeout_secs(opts.confirmation_timeout_secs);

        builder
            .build()
            .map_err(|err| anyhow!("Couldn't build DeploymentConfig: {}", err))
    }
}
