use std::{net::SocketAddr, sync::Arc, time::Duration};

use alloy_primitives::{ChainId, TxHash};
use alloy_rpc_types::TransactionRequest;
use parking_lot::Mutex;
use tokio::{net::TcpListener, sync::oneshot, task::JoinHandle, time};
use tracing::{debug, trace};
use uuid::Uuid;

use crate::{
    error::WalletError,
    router::build_router,
    state::WalletBridgeState,
    types::{BridgeTransaction, ChainSwitchRequest, Connection},
};

/// How often queued prompts are checked for an answer from the page.
const RESPONSE_POLL: Duration = Duration::from_millis(250);

#[derive(Debug, Default)]
struct ServerHandle {
    bound: Option<SocketAddr>,
    shutdown: Option<oneshot::Sender<()>>,
    task: Option<JoinHandle<()>>,
}

/// The Rust side of the browser wallet bridge.
///
/// Requests (transactions, chain switches) are queued here and polled by the
/// portal page; [`WalletBridge::request_transaction`] and friends block until
/// the page posts back the wallet's answer or the wait times out.
///
/// The bridge can serve its routes standalone via [`WalletBridge::start`],
/// or hand them to an embedding server via [`WalletBridge::router`].
#[derive(Clone, Debug)]
pub struct WalletBridge {
    state: WalletBridgeState,
    server: Arc<Mutex<ServerHandle>>,
    timeout: Duration,
}

impl WalletBridge {
    /// Creates a bridge whose prompts time out after `timeout`.
    pub fn new(timeout: Duration) -> Self {
        Self {
            state: WalletBridgeState::new(),
            server: Arc::new(Mutex::new(ServerHandle::default())),
            timeout,
        }
    }

    /// The token the page must echo in `X-Session-Token`.
    pub fn session_token(&self) -> Arc<String> {
        self.state.session_token()
    }

    /// The bridge API router, for embedding into another axum server.
    pub fn router(&self) -> axum::Router {
        build_router(Arc::new(self.state.clone()))
    }

    /// Starts a standalone bridge server on `127.0.0.1:port` with the routes
    /// nested under `/api/wallet`. Port 0 picks an ephemeral port.
    pub async fn start(&self, port: u16) -> Result<SocketAddr, WalletError> {
        let listener = TcpListener::bind(SocketAddr::from(([127, 0, 0, 1], port))).await?;
        let bound = listener.local_addr()?;

        let app = axum::Router::new().nest("/api/wallet", self.router());
        let (shutdown_tx, shutdown_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(async move {
            let serve = axum::serve(listener, app).with_graceful_shutdown(async {
                shutdown_rx.await.ok();
            });
            if let Err(err) = serve.await {
                debug!(target: "waveportal::wallet", %err, "bridge server exited");
            }
        });

        let mut server = self.server.lock();
        server.bound = Some(bound);
        server.shutdown = Some(shutdown_tx);
        server.task = Some(task);
        debug!(target: "waveportal::wallet", %bound, "bridge server started");
        Ok(bound)
    }

    /// Stops a standalone bridge server started with [`WalletBridge::start`].
    pub async fn stop(&self) -> Result<(), WalletError> {
        let (shutdown, task) = {
            let mut server = self.server.lock();
            server.bound = None;
            (server.shutdown.take(), server.task.take())
        };
        if let Some(shutdown) = shutdown {
            let _ = shutdown.send(());
        }
        if let Some(task) = task {
            let _ = task.await;
        }
        Ok(())
    }

    /// The bound address of a running standalone server.
    pub fn local_addr(&self) -> Option<SocketAddr> {
        self.server.lock().bound
    }

    /// Whether a page has reported an injected wallet, connected or not.
    pub fn has_provider(&self) -> bool {
        self.state.has_provider()
    }

    /// Whether the wallet has granted access to an account.
    pub fn is_connected(&self) -> bool {
        self.state.is_connected()
    }

    /// The connected account, if the wallet granted access.
    pub fn connection(&self) -> Option<Connection> {
        self.state.get_connection()
    }

    /// Waits for the page to report a granted account.
    ///
    /// Fails with [`WalletError::Rejected`] if the wallet reported an access
    /// error, and [`WalletError::NoProvider`] if no wallet shows up before
    /// the configured timeout.
    pub async fn wait_for_connection(&self) -> Result<Connection, WalletError> {
        let deadline = time::Instant::now() + self.timeout;
        loop {
            if let Some(connection) = self.state.get_connection() {
                return Ok(connection);
            }
            if let Some(reason) = self.state.connection_error() {
                return Err(WalletError::Rejected { operation: "account access", reason });
            }
            if time::Instant::now() >= deadline {
                // a wallet that reported in but never granted access is a
                // stalled prompt, not a missing provider
                return Err(if self.state.has_provider() {
                    WalletError::Timeout { operation: "account access" }
                } else {
                    WalletError::NoProvider
                });
            }
            time::sleep(RESPONSE_POLL).await;
        }
    }

    /// Queues `request` for the browser wallet to sign and send, and waits
    /// for the transaction hash.
    pub async fn request_transaction(
        &self,
        request: TransactionRequest,
    ) -> Result<TxHash, WalletError> {
        if !self.is_connected() {
            return Err(WalletError::NotConnected);
        }

        let id = Uuid::new_v4();
        trace!(target: "waveportal::wallet", %id, "queueing transaction");
        self.state.add_transaction_request(BridgeTransaction { id, request });

        let deadline = time::Instant::now() + self.timeout;
        loop {
            if let Some(response) = self.state.take_transaction_response(&id) {
                if let Some(reason) = response.error {
                    return Err(WalletError::Rejected { operation: "transaction", reason });
                }
                return match response.hash {
                    Some(hash) => Ok(hash),
                    None => Err(WalletError::Rejected {
                        operation: "transaction",
                        reason: "wallet returned no transaction hash".to_string(),
                    }),
                };
            }
            if time::Instant::now() >= deadline {
                self.state.remove_transaction_request(&id);
                return Err(WalletError::Timeout { operation: "transaction" });
            }
            time::sleep(RESPONSE_POLL).await;
        }
    }

    /// Asks the wallet to switch to `chain_id`. No-op if the connected
    /// account already reports that chain.
    pub async fn request_chain_switch(&self, chain_id: ChainId) -> Result<(), WalletError> {
        let connection = self.connection().ok_or(WalletError::NotConnected)?;
        if connection.chain_id == chain_id {
            return Ok(());
        }

        let id = Uuid::new_v4();
        trace!(target: "waveportal::wallet", %id, chain_id, "queueing chain switch");
        self.state.add_switch_request(ChainSwitchRequest { id, chain_id });

        let deadline = time::Instant::now() + self.timeout;
        loop {
            if let Some(response) = self.state.take_switch_response(&id) {
                return match response.error {
                    Some(reason) => Err(WalletError::SwitchRejected(reason)),
                    None => Ok(()),
                };
            }
            if time::Instant::now() >= deadline {
                self.state.remove_switch_request(&id);
                return Err(WalletError::Timeout { operation: "chain switch" });
            }
            time::sleep(RESPONSE_POLL).await;
        }
    }
}
