use std::time::Duration;

use eyre::Result;
use tokio::net::TcpListener;
use tracing::{debug, warn};
use waveportal_client::{ClientOpts, WaveClient, WaveSubscription};
use waveportal_config::Config;
use waveportal_wallet::{WalletBridge, WalletSession};
use yansi::Paint;

use crate::{server, utils, utils::PortalProvider};

/// Serves the portal: the page, the wallet bridge and the portal API, until
/// interrupted.
pub async fn run(config: Config) -> Result<()> {
    let deployment = config.deployment()?;
    let provider = utils::get_provider(&config)?;

    let bridge = WalletBridge::new(Duration::from_secs(config.wallet_timeout));
    let session = WalletSession::new(bridge.clone());
    let client = WaveClient::new(
        provider,
        deployment,
        session,
        ClientOpts {
            confirmations: config.confirmations,
            transaction_timeout: Duration::from_secs(config.transaction_timeout),
            gas_limit: config.gas_limit,
        },
    );

    let app = server::router(client.clone(), &bridge);
    let listener = TcpListener::bind(("127.0.0.1", config.port)).await?;
    let addr = listener.local_addr()?;
    let url = format!("http://{addr}");

    println!("Wave portal on {} (contract {})", url.bold(), deployment.address);
    if config.open_browser {
        utils::open_browser(&url);
    }

    // Mirrors the wallet into the session state; fetches history and
    // subscribes to new waves once an account is authorized. Aborting it
    // drops the subscription, releasing the event listener with the server.
    let watcher = tokio::spawn(watch_wallet(client));

    let serve = axum::serve(listener, app).with_graceful_shutdown(async {
        let _ = tokio::signal::ctrl_c().await;
    });
    let result = serve.await;
    watcher.abort();
    result?;
    Ok(())
}

/// Polls the bridge for wallet changes.
///
/// On the first granted account: subscribe to new waves, then fetch the
/// history. Subscribing first means a wave landing exactly at the boundary
/// shows up at least once (maybe twice, which the portal tolerates) instead
/// of never.
async fn watch_wallet(client: WaveClient<PortalProvider>) {
    let mut subscription: Option<WaveSubscription> = None;
    let mut interval = tokio::time::interval(Duration::from_millis(500));
    loop {
        interval.tick().await;
        let connection = client.sync_wallet();

        if let Some(connection) = connection
            && subscription.is_none()
        {
            debug!(target: "waveportal", account = %connection.address, "wallet authorized");
            match client.subscribe_new_waves().await {
                Ok(sub) => subscription = Some(sub),
                Err(err) => {
                    warn!(target: "waveportal", %err, "could not subscribe to new waves");
                    continue;
                }
            }
            if let Err(err) = client.fetch_history().await {
                warn!(target: "waveportal", %err, "initial history fetch failed");
            }
        }
    }
}
