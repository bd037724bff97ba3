/// Errors surfaced by the browser wallet bridge.
#[derive(Debug, thiserror::Error)]
pub enum WalletError {
    /// No portal page with an injected wallet has reached the bridge.
    #[error("no browser wallet available; open the portal page in a browser with a wallet installed")]
    NoProvider,

    /// The user declined a wallet prompt.
    #[error("{operation} rejected: {reason}")]
    Rejected { operation: &'static str, reason: String },

    /// The wallet refused to switch to the requested network.
    #[error("network switch rejected: {0}")]
    SwitchRejected(String),

    /// The wallet did not answer a prompt within the configured wait.
    #[error("timed out waiting for the wallet to answer the {operation} prompt")]
    Timeout { operation: &'static str },

    /// An operation that needs a connected account ran without one.
    #[error("wallet is not connected")]
    NotConnected,

    /// The bridge server could not be started or stopped.
    #[error(transparent)]
    Server(#[from] std::io::Error),
}

impl WalletError {
    /// Whether this error is the user saying no, as opposed to a fault.
    pub fn is_user_rejection(&self) -> bool {
        matches!(self, Self::Rejected { .. } | Self::SwitchRejected(_))
    }
}
