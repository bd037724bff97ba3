use alloy_primitives::TxHash;
use alloy_provider::PendingTransactionError;
use waveportal_wallet::WalletError;

/// Everything that can go wrong between the compose box and a confirmed
/// transaction.
///
/// All of these are caught at the client boundary and folded into a single
/// user-facing string by [`WaveClientError::user_message`]; nothing here
/// propagates as an uncaught failure.
#[derive(Debug, thiserror::Error)]
pub enum WaveClientError {
    /// The message was empty after trimming. Resolved entirely client-side;
    /// the wallet and contract are never consulted.
    #[error("cannot wave an empty message")]
    EmptyMessage,

    /// A wallet prompt failed: no provider, user rejection, switch refusal
    /// or a prompt timeout.
    #[error(transparent)]
    Wallet(#[from] WalletError),

    /// The transaction was included but reverted. The revert reason is not
    /// decoded; the contract's per-address cooldown surfaces here too.
    #[error("transaction {tx_hash} reverted on chain")]
    Reverted { tx_hash: TxHash },

    /// A read or filter call against the contract failed. A binding mismatch
    /// with the deployed contract also lands here, at first use.
    #[error(transparent)]
    Contract(#[from] alloy_contract::Error),

    /// The provider itself is unreachable or misbehaving.
    #[error(transparent)]
    Network(#[from] alloy_transport::TransportError),

    /// Waiting for inclusion failed: provider unreachable, or the
    /// confirmation timeout elapsed.
    #[error(transparent)]
    Confirmation(#[from] PendingTransactionError),
}

impl WaveClientError {
    /// The string shown to the user, or `None` when the failure should abort
    /// silently (the user said no; there is nothing to report back to them).
    pub fn user_message(&self) -> Option<String> {
        match self {
            Self::EmptyMessage => Some("Please enter a valid message.".to_string()),
            Self::Wallet(err) if err.is_user_rejection() => None,
            Self::Wallet(WalletError::NoProvider | WalletError::NotConnected) => {
                Some("No browser wallet connected. Install one and connect to wave.".to_string())
            }
            _ => Some("Transaction failed! Come back again after 15 minutes.".to_string()),
        }
    }
}
