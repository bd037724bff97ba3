use std::time::Duration;

use alloy_provider::{Provider, RootProvider};
use eyre::{Result, WrapErr};
use tracing::warn;
use tracing_subscriber::prelude::*;
use url::Url;
use waveportal_config::Config;

/// The provider the portal reads through.
pub type PortalProvider = RootProvider;

/// Initializes the global tracing subscriber: fmt layer plus `RUST_LOG`.
pub fn subscriber() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();
}

/// Builds the portal's tokio runtime.
pub fn tokio_runtime() -> Result<tokio::runtime::Runtime> {
    tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
        .wrap_err("failed to build tokio runtime")
}

/// Connects a provider to the configured RPC endpoint.
///
/// The connection is lazy; an unreachable endpoint surfaces on first use.
pub fn get_provider(config: &Config) -> Result<PortalProvider> {
    let url: Url = config
        .rpc_url
        .parse()
        .wrap_err_with(|| format!("invalid rpc url: {}", config.rpc_url))?;
    let provider = RootProvider::new_http(url);
    provider.client().set_poll_interval(Duration::from_secs(config.poll_interval));
    Ok(provider)
}

/// Opens `url` in the system browser. Failures are logged, never fatal; the
/// printed URL always works as a fallback.
pub fn open_browser(url: &str) {
    use std::process::Command;

    let spawned = {
        #[cfg(target_os = "windows")]
        {
            Command::new("cmd").args(["/C", "start", url]).spawn()
        }
        #[cfg(target_os = "macos")]
        {
            Command::new("open").arg(url).spawn()
        }
        #[cfg(not(any(target_os = "windows", target_os = "macos")))]
        {
            Command::new("xdg-open").arg(url).spawn()
        }
    };
    if let Err(err) = spawned {
        warn!(target: "waveportal", %err, "could not open a browser");
    }
}
