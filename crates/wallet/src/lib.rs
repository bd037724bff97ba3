//! # Browser wallet bridge
//!
//! The portal never holds a private key. All account access and transaction
//! signing is delegated to the wallet injected into the user's browser
//! ([EIP-1193](https://eips.ethereum.org/EIPS/eip-1193)), reached through a
//! local HTTP bridge:
//!
//! 1. The portal server exposes the bridge routes alongside the portal page.
//! 2. The page connects to the injected wallet via `window.ethereum` and
//!    reports the granted account to the bridge.
//! 3. Transactions and chain switches are queued by the Rust side and polled
//!    by the page, which forwards them to the wallet and posts back the
//!    outcome.
//!
//! Every bridge route requires the per-run session token, so only the page
//! served by this process can answer prompts.

#![cfg_attr(not(test), warn(unused_crate_dependencies))]

mod error;
mod handlers;
mod queue;
mod router;
mod server;
mod session;
mod signer;
mod state;
mod types;

pub use error::WalletError;
pub use server::WalletBridge;
pub use session::WalletSession;
pub use signer::PortalSigner;
pub use types::{
    ApiResponse, BridgeTransaction, ChainSwitchRequest, ChainSwitchResponse, Connection,
    ConnectionReport, TransactionResponse,
};
