//! # waveportal-config
//!
//! Configuration for the portal: where the contract lives, which RPC endpoint
//! to read through, and how the local server behaves.
//!
//! Values are merged from three layers, later layers winning: built-in
//! defaults, a `waveportal.toml` file in the working directory, and
//! `WAVEPORTAL_`-prefixed environment variables.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

use alloy_primitives::Address;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use waveportal_bindings::Deployment;

/// The default config file name.
pub const FILE_NAME: &str = "waveportal.toml";

/// Portal configuration.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// The RPC endpoint used for reads and confirmation tracking.
    ///
    /// State-changing calls never go through this endpoint; they are signed
    /// and sent by the browser wallet.
    pub rpc_url: String,
    /// The chain the contract is deployed on. The wallet is asked to switch
    /// here before a transaction is submitted.
    pub chain_id: u64,
    /// The deployed contract address.
    pub contract: Option<Address>,
    /// Port for the local portal server. 0 picks an ephemeral port.
    pub port: u16,
    /// Whether `waveportal open` should open the portal page in a browser.
    pub open_browser: bool,
    /// Event and bridge polling interval, in seconds.
    pub poll_interval: u64,
    /// How long to wait for one-block inclusion, in seconds.
    pub transaction_timeout: u64,
    /// Confirmations to wait for after a submitted transaction.
    pub confirmations: u64,
    /// Gas limit attached to wave transactions.
    pub gas_limit: u64,
    /// How long to wait on a browser wallet prompt, in seconds.
    pub wallet_timeout: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rpc_url: "http://localhost:8545".to_string(),
            chain_id: 11155111,
            contract: None,
            port: 9545,
            open_browser: true,
            poll_interval: 7,
            transaction_timeout: 120,
            confirmations: 1,
            gas_limit: 300_000,
            wallet_timeout: 300,
        }
    }
}

impl Config {
    /// Returns the populated [`Figment`]: defaults, then `waveportal.toml`,
    /// then `WAVEPORTAL_` environment variables.
    pub fn figment() -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(FILE_NAME))
            .merge(Env::prefixed("WAVEPORTAL_"))
    }

    /// Loads the configuration from the default figment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_provider(Self::figment())
    }

    /// Extracts the configuration from the given provider.
    pub fn from_provider<T: figment::Provider>(provider: T) -> Result<Self, ConfigError> {
        tracing::trace!(target: "waveportal::config", "load config");
        Figment::from(provider).extract().map_err(Into::into)
    }

    /// The contract deployment described by this config.
    ///
    /// The address has no workable default; a missing value is a
    /// configuration error surfaced here, at first use.
    pub fn deployment(&self) -> Result<Deployment, ConfigError> {
        let address = self.contract.ok_or(ConfigError::MissingContract)?;
        Ok(Deployment { address, chain_id: self.chain_id })
    }
}

/// Configuration loading errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to extract configuration: {0}")]
    Extract(#[from] figment::Error),
    #[error(
        "no contract address configured; set `contract` in waveportal.toml or WAVEPORTAL_CONTRACT"
    )]
    MissingContract,
}
