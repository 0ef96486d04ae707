use anyhow::anyhow;
use clap::Parser;
use url::Url;

use crate::client::{RpcWalletConfig, RpcWalletConfigBuilder};

#[derive(Debug, Clone, Parser)]
pub struct RpcWalletOpts {
    /// URL of the wallet JSON-RPC endpoint
    #[arg(long, value_name = "URL", default_value = "http://127.0.0.1:8545")]
    pub wallet_url: Url,

    /// Delay between two receipt queries while awaiting a confirmation
    #[arg(long, value_name = "MILLISECONDS", default_value = "4000")]
    pub poll_interval_ms: u64,
}

impl TryFrom<RpcWalletOpts> for RpcWalletConfig {
    type Error = anyhow::Error;
    fn try_from(opts: RpcWalletOpts) -> Result<RpcWalletConfig, anyhow::Error> {
        RpcWalletConfigBuilder::default()
            .url(opts.wallet_url)
            .poll_interval_ms(opts.poll_interval_ms)
            .build()
            .map_err(|err| anyhow!("Couldn't build RpcWalletConfig: {}", err))
    }
}
