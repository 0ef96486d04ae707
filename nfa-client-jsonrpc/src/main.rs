use std::path::PathBuf;

use clap::Parser;
use nfa_client::{
    clap::DeploymentOpts,
    config::DeploymentConfig,
    state::NfaDraft,
    status::Status,
    NfaClient,
};
use nfa_client_jsonrpc::{
    clap::RpcWalletOpts,
    client::{RpcWallet, RpcWalletConfig},
};
use tracing::{warn, Level};

#[derive(clap::Args, Debug)]
struct DraftArgs {
    /// NFA name
    #[arg(long)]
    name: String,
    /// NFA symbol
    #[arg(long)]
    symbol: String,
}

#[derive(clap::Subcommand, Debug)]
enum Command {
    /// Connect the wallet and switch it to the target network
    Connect,
    /// Create an NFA through the factory
    CreateNfa(DraftArgs),
    /// Request MOR tokens from the faucet
    Faucet,
    /// Approve the MOR fee, then create an NFA paying it
    CreateNfaWithPayment(DraftArgs),
}

/// Create NFAs on the Morpheus NFA factory
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    wallet: RpcWalletOpts,

    #[command(flatten)]
    deployment: DeploymentOpts,

    /// JSON deployment configuration, replacing the deployment options
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,

    #[arg(long, short)]
    debug: bool,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Set up tracing logger (logs to stderr, status lines go to stdout).
    let collector = tracing_subscriber::fmt()
        .with_max_level(if args.debug {
            Level::DEBUG
        } else {
            Level::INFO
        })
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(collector)?;

    let deployment = match &args.config {
        Some(path) => DeploymentConfig::from_json_file(path)?,
        None => DeploymentConfig::try_from(args.deployment)?,
    };
    let wallet_config = RpcWalletConfig::try_from(args.wallet)?;

    let wallet = match RpcWallet::connect(wallet_config).await {
        Ok(wallet) => Some(wallet),
        Err(err) => {
            warn!(%err, "No wallet endpoint available.");
            None
        }
    };

    let client = NfaClient::new(wallet, deployment, |status: Status| println!("{}", status));

    client.connect().await?;
    match args.command {
        Command::Connect => {}
        Command::CreateNfa(DraftArgs { name, symbol }) => {
            client.submit_create_nfa(&NfaDraft::new(name, symbol)).await?;
        }
        Command::Faucet => {
            client.submit_faucet_request().await?;
        }
        Command::CreateNfaWithPayment(DraftArgs { name, symbol }) => {
            client
                .submit_create_nfa_with_payment(&NfaDraft::new(name, symbol))
                .await?;
        }
    }

    Ok(())
}
