//! # waveportal-client
//!
//! The wave client composes the RPC provider, the contract bindings and the
//! browser wallet session into the three operations the portal needs:
//! submit a wave, fetch the history, and follow new waves as they land.
//!
//! It also owns the observable [`SessionState`]: the presentation layer
//! subscribes to a watch channel instead of holding business state of its
//! own.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
mod state;
mod subscription;

pub use error::WaveClientError;
pub use state::{SessionState, SubmitPhase};
pub use subscription::WaveSubscription;

use std::time::Duration;

use alloy_primitives::{TxHash, TxKind};
use alloy_provider::{PendingTransactionBuilder, Provider};
use alloy_rpc_types::{Filter, TransactionInput, TransactionRequest};
use alloy_sol_types::{SolCall, SolEvent};
use futures::{StreamExt, stream};
use tokio::sync::watch;
use tracing::{debug, warn};
use waveportal_bindings::{Deployment, IWavePortal, Wave};
use waveportal_wallet::{Connection, WalletSession};

/// Submission tunables.
#[derive(Clone, Copy, Debug)]
pub struct ClientOpts {
    /// Confirmations to wait for after the wallet broadcasts.
    pub confirmations: u64,
    /// How long to wait for inclusion before giving up.
    pub transaction_timeout: Duration,
    /// Gas limit stamped on wave transactions.
    pub gas_limit: u64,
}

impl Default for ClientOpts {
    fn default() -> Self {
        Self {
            confirmations: 1,
            transaction_timeout: Duration::from_secs(120),
            gas_limit: 300_000,
        }
    }
}

/// Client for the wave portal contract.
///
/// Reads go through the client's own provider; state-changing calls are
/// signed and broadcast by the browser wallet, and only their confirmation is
/// tracked here.
#[derive(Clone)]
pub struct WaveClient<P: Provider + Clone> {
    provider: P,
    deployment: Deployment,
    wallet: WalletSession,
    opts: ClientOpts,
    state: watch::Sender<SessionState>,
}

impl<P: Provider + Clone> WaveClient<P> {
    pub fn new(provider: P, deployment: Deployment, wallet: WalletSession, opts: ClientOpts) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self { provider, deployment, wallet, opts, state }
    }

    pub fn deployment(&self) -> Deployment {
        self.deployment
    }

    pub fn wallet(&self) -> &WalletSession {
        &self.wallet
    }

    /// A receiver that sees every state change.
    pub fn subscribe_state(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// The current state, by value.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Copies the wallet's reported connection into the session state.
    pub fn sync_wallet(&self) -> Option<Connection> {
        let connection = self.wallet.connection();
        self.update(|session| {
            session.account = connection.map(|c| c.address);
            session.chain_id = connection.map(|c| c.chain_id);
        });
        connection
    }

    /// Submits `text` as a wave.
    ///
    /// Validation runs before any wallet or contract interaction; an empty
    /// message never leaves the client. On success the draft is cleared and
    /// the history refreshed; on failure the draft is kept so the user can
    /// retry, and the loading flag is cleared either way.
    pub async fn submit(&self, text: &str) -> Result<TxHash, WaveClientError> {
        self.update(|session| {
            session.phase = SubmitPhase::Validating;
            session.error = None;
            session.draft = text.to_string();
        });

        if text.trim().is_empty() {
            let err = WaveClientError::EmptyMessage;
            self.update(|session| {
                session.phase = SubmitPhase::Idle;
                session.error = err.user_message();
            });
            return Err(err);
        }

        let result = self.send_wave(text.to_string()).await;
        self.record_outcome(&result);

        if result.is_ok()
            && let Err(err) = self.fetch_history().await
        {
            warn!(target: "waveportal::client", %err, "history refresh after submit failed");
        }
        result
    }

    async fn send_wave(&self, message: String) -> Result<TxHash, WaveClientError> {
        self.update(|session| session.phase = SubmitPhase::AwaitingSignature);

        self.wallet.switch_network(self.deployment.chain_id).await?;
        let signer = self.wallet.signer()?;

        let calldata = IWavePortal::waveCall { message }.abi_encode();
        let request = TransactionRequest {
            to: Some(TxKind::Call(self.deployment.address)),
            input: TransactionInput::new(calldata.into()),
            gas: Some(self.opts.gas_limit),
            ..Default::default()
        };
        let tx_hash = signer.send_transaction_via_wallet(request).await?;
        debug!(target: "waveportal::client", %tx_hash, "wave broadcast, awaiting confirmation");

        self.update(|session| session.phase = SubmitPhase::AwaitingConfirmation);
        let receipt = PendingTransactionBuilder::new(self.provider.root().clone(), tx_hash)
            .with_required_confirmations(self.opts.confirmations)
            .with_timeout(Some(self.opts.transaction_timeout))
            .get_receipt()
            .await?;
        if !receipt.status() {
            return Err(WaveClientError::Reverted { tx_hash });
        }
        debug!(target: "waveportal::client", block = ?receipt.block_number, "wave confirmed");
        Ok(tx_hash)
    }

    /// Reads the full wave list and the total count in one pass.
    ///
    /// Both reads go out back to back but are not atomic against concurrent
    /// writes on chain; the pair may be skewed by a wave landing in between,
    /// which the next refresh or event delivery reconciles.
    pub async fn fetch_history(&self) -> Result<(Vec<Wave>, u64), WaveClientError> {
        let portal = IWavePortal::new(self.deployment.address, self.provider.clone());
        let onchain = portal.getAllWaves().call().await?;
        let total = portal.getTotalWaves().call().await?;

        let (waves, total) = order_history(onchain, total.saturating_to());
        debug!(target: "waveportal::client", count = waves.len(), total, "fetched history");
        self.update(|session| {
            session.waves = waves.clone();
            session.total = total;
        });
        Ok((waves, total))
    }

    /// Follows the contract's `NewWave` events.
    ///
    /// Each delivered wave is pushed to the front of the session state's list
    /// and bumps the total; the returned handle must be held for as long as
    /// delivery is wanted and aborts the underlying task when dropped.
    pub async fn subscribe_new_waves(&self) -> Result<WaveSubscription, WaveClientError> {
        let filter = Filter::new()
            .address(self.deployment.address)
            .event_signature(IWavePortal::NewWave::SIGNATURE_HASH);
        let poller = self.provider.watch_logs(&filter).await?;

        let stream = poller.into_stream().flat_map(stream::iter).filter_map(|log| async move {
            match log.log_decode::<IWavePortal::NewWave>() {
                Ok(decoded) => Some(Wave::from(decoded.inner.data)),
                Err(err) => {
                    warn!(target: "waveportal::client", %err, "undecodable NewWave log");
                    None
                }
            }
        });
        Ok(subscription::spawn_forwarder(stream, self.state.clone()))
    }

    fn record_outcome(&self, result: &Result<TxHash, WaveClientError>) {
        self.update(|session| match result {
            Ok(_) => {
                session.phase = SubmitPhase::Idle;
                session.draft.clear();
                session.error = None;
            }
            Err(err) => {
                session.phase = SubmitPhase::Failed;
                session.error = err.user_message();
            }
        });
    }

    fn update(&self, f: impl FnOnce(&mut SessionState)) {
        self.state.send_modify(f);
    }
}

/// Maps the on-chain list (oldest first) to display order (newest first).
fn order_history(onchain: Vec<IWavePortal::Wave>, total: u64) -> (Vec<Wave>, u64) {
    let mut waves: Vec<Wave> = onchain.into_iter().map(Wave::from).collect();
    waves.reverse();
    (waves, total)
}

#[cfg(test)]
#[path = "tests.rs"]
mod tests;
