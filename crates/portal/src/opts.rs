use alloy_primitives::Address;
use clap::{Parser, Subcommand};
use waveportal_config::Config;

/// A local portal for the WavePortal contract: connect your browser wallet,
/// wave, and watch the wall.
#[derive(Debug, Parser)]
#[command(name = "waveportal", version, about)]
pub struct Waveportal {
    #[command(subcommand)]
    pub cmd: WaveportalSubcommand,

    #[command(flatten)]
    pub rpc: RpcOpts,
}

/// Connection options shared by every subcommand. Values given here override
/// `waveportal.toml` and the environment.
#[derive(Clone, Debug, Parser)]
pub struct RpcOpts {
    /// The RPC endpoint used for reads and confirmation tracking.
    #[arg(long, env = "ETH_RPC_URL", value_name = "URL", global = true)]
    pub rpc_url: Option<String>,

    /// The deployed WavePortal contract address.
    #[arg(long, env = "WAVEPORTAL_CONTRACT", value_name = "ADDRESS", global = true)]
    pub contract: Option<Address>,

    /// The chain the contract lives on.
    #[arg(long, value_name = "CHAIN_ID", global = true)]
    pub chain: Option<u64>,
}

impl RpcOpts {
    /// Folds the CLI overrides into a loaded config.
    pub fn apply(&self, config: &mut Config) {
        if let Some(rpc_url) = &self.rpc_url {
            config.rpc_url = rpc_url.clone();
        }
        if let Some(contract) = self.contract {
            config.contract = Some(contract);
        }
        if let Some(chain) = self.chain {
            config.chain_id = chain;
        }
    }
}

#[derive(Debug, Subcommand)]
pub enum WaveportalSubcommand {
    /// Serve the portal page and bridge the browser wallet.
    Open {
        /// Port for the local server. 0 picks an ephemeral port.
        #[arg(long, value_name = "PORT")]
        port: Option<u16>,

        /// Do not open the portal page in a browser.
        #[arg(long)]
        no_browser: bool,
    },

    /// Print the wave history, newest first.
    Waves {
        /// Print as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the total number of waves ever recorded.
    Total,
}
