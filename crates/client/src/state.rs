use alloy_primitives::{Address, ChainId};
use serde::{Deserialize, Serialize};
use waveportal_bindings::Wave;

/// Where a submission currently is.
///
/// `Idle -> Validating -> AwaitingSignature -> AwaitingConfirmation -> Idle`
/// on success; validation failures skip straight back to `Idle`; wallet and
/// chain errors land in `Failed` until the next interaction clears it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmitPhase {
    #[default]
    Idle,
    Validating,
    AwaitingSignature,
    AwaitingConfirmation,
    Failed,
}

/// Everything the presentation layer needs to render the portal.
///
/// Owned by the wave client and published through a watch channel; the UI
/// reads snapshots instead of keeping its own copy of business state.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// The connected account, absent until the wallet grants access.
    pub account: Option<Address>,
    /// The chain the wallet currently reports.
    pub chain_id: Option<ChainId>,
    /// Wave history, newest first.
    pub waves: Vec<Wave>,
    /// Total waves ever recorded.
    pub total: u64,
    /// Where the in-flight submission is, if any.
    pub phase: SubmitPhase,
    /// The composed message. Cleared on a successful submit, kept on failure
    /// so the user can retry.
    pub draft: String,
    /// User-facing error text; `None` while everything is fine.
    pub error: Option<String>,
}

impl SessionState {
    /// True while a submission is out with the wallet or the chain. Gates
    /// the submit control in the UI; advisory only, not a lock.
    pub fn loading(&self) -> bool {
        matches!(self.phase, SubmitPhase::AwaitingSignature | SubmitPhase::AwaitingConfirmation)
    }
}
