use alloy_primitives::{Address, ChainId};

use crate::{error::WalletError, server::WalletBridge, signer::PortalSigner, types::Connection};

/// The wallet operations the portal relies on, over the browser bridge.
///
/// All account selection and signing happens in the user's wallet; this type
/// only sequences the prompts and reads back their outcome.
#[derive(Clone, Debug)]
pub struct WalletSession {
    bridge: WalletBridge,
}

impl WalletSession {
    pub fn new(bridge: WalletBridge) -> Self {
        Self { bridge }
    }

    pub fn bridge(&self) -> &WalletBridge {
        &self.bridge
    }

    /// Whether an injected wallet is present in the user's browser.
    ///
    /// No side effect; this only reads what the page last reported.
    pub fn has_provider(&self) -> bool {
        self.bridge.has_provider()
    }

    /// The account the wallet already granted access to, without prompting.
    pub fn authorized_account(&self) -> Option<Address> {
        self.bridge.connection().map(|connection| connection.address)
    }

    /// The full connection (account and chain), if granted.
    pub fn connection(&self) -> Option<Connection> {
        self.bridge.connection()
    }

    /// Waits for the wallet to grant access to an account.
    ///
    /// The page drives the actual `eth_requestAccounts` prompt; this fails
    /// with [`WalletError::NoProvider`] when no wallet ever reports in, and
    /// [`WalletError::Rejected`] when the user declined the prompt.
    pub async fn request_account(&self) -> Result<Address, WalletError> {
        self.bridge.wait_for_connection().await.map(|connection| connection.address)
    }

    /// A signing capability bound to the connected account.
    pub fn signer(&self) -> Result<PortalSigner, WalletError> {
        let connection = self.bridge.connection().ok_or(WalletError::NoProvider)?;
        Ok(PortalSigner::new(self.bridge.clone(), connection))
    }

    /// Asks the wallet to switch to `chain_id` before a transaction.
    pub async fn switch_network(&self, chain_id: ChainId) -> Result<(), WalletError> {
        self.bridge.request_chain_switch(chain_id).await
    }
}
