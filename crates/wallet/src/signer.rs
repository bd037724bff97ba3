use alloy_consensus::SignableTransaction;
use alloy_network::TxSigner;
use alloy_primitives::{Address, B256, ChainId, TxHash};
use alloy_rpc_types::TransactionRequest;
use alloy_signer::{Result, Signature, Signer, SignerSync};
use async_trait::async_trait;

use crate::{error::WalletError, server::WalletBridge, types::Connection};

/// A signing capability bound to the account connected in the browser.
///
/// Browser wallets do not expose raw key operations: they sign and send a
/// transaction in one step via `eth_sendTransaction`. The [`Signer`] surface
/// therefore refuses hash and message signing; state-changing calls go
/// through [`PortalSigner::send_transaction_via_wallet`].
#[derive(Clone, Debug)]
pub struct PortalSigner {
    bridge: WalletBridge,
    address: Address,
    chain_id: ChainId,
}

impl PortalSigner {
    pub(crate) fn new(bridge: WalletBridge, connection: Connection) -> Self {
        Self { bridge, address: connection.address, chain_id: connection.chain_id }
    }

    /// Queues `request` to the browser wallet, stamped with this signer's
    /// account, and resolves to the transaction hash once the wallet has
    /// signed and broadcast it.
    pub async fn send_transaction_via_wallet(
        &self,
        mut request: TransactionRequest,
    ) -> std::result::Result<TxHash, WalletError> {
        request.from = Some(self.address);
        self.bridge.request_transaction(request).await
    }
}

impl SignerSync for PortalSigner {
    fn sign_hash_sync(&self, _hash: &B256) -> Result<Signature> {
        Err(alloy_signer::Error::other(
            "browser wallets cannot sign raw hashes; use send_transaction_via_wallet instead",
        ))
    }

    fn sign_message_sync(&self, _message: &[u8]) -> Result<Signature> {
        Err(alloy_signer::Error::other(
            "browser wallets sign asynchronously in the page; message signing is not routed here",
        ))
    }

    fn chain_id_sync(&self) -> Option<ChainId> {
        Some(self.chain_id)
    }
}

#[async_trait]
impl Signer for PortalSigner {
    async fn sign_hash(&self, _hash: &B256) -> Result<Signature> {
        // Browser wallets sign and send in one step via eth_sendTransaction.
        Err(alloy_signer::Error::other(
            "browser wallets cannot sign raw hashes; use send_transaction_via_wallet instead",
        ))
    }

    fn address(&self) -> Address {
        self.address
    }

    fn chain_id(&self) -> Option<ChainId> {
        Some(self.chain_id)
    }

    fn set_chain_id(&mut self, chain_id: Option<ChainId>) {
        if let Some(id) = chain_id {
            self.chain_id = id;
        }
    }
}

#[async_trait]
impl TxSigner<Signature> for PortalSigner {
    fn address(&self) -> Address {
        self.address
    }

    async fn sign_transaction(
        &self,
        _tx: &mut dyn SignableTransaction<Signature>,
    ) -> Result<Signature> {
        Err(alloy_signer::Error::other("use send_transaction_via_wallet for browser wallets"))
    }
}
