use std::sync::Arc;

use parking_lot::Mutex;
use uuid::Uuid;

use crate::{
    queue::RequestQueue,
    types::{
        BridgeTransaction, ChainSwitchRequest, ChainSwitchResponse, Connection, ConnectionReport,
        TransactionResponse,
    },
};

/// Shared state between the bridge server, its handlers and the session.
#[derive(Clone, Debug)]
pub(crate) struct WalletBridgeState {
    /// What the page last reported about `window.ethereum`. `None` until a
    /// page reaches the bridge at all.
    report: Arc<Mutex<Option<ConnectionReport>>>,
    /// Request/response queue for transactions.
    transactions: Arc<Mutex<RequestQueue<BridgeTransaction, TransactionResponse>>>,
    /// Request/response queue for chain switches.
    switches: Arc<Mutex<RequestQueue<ChainSwitchRequest, ChainSwitchResponse>>>,
    /// Per-run token every bridge request must echo.
    session_token: Arc<String>,
}

impl Default for WalletBridgeState {
    fn default() -> Self {
        Self::new()
    }
}

impl WalletBridgeState {
    pub fn new() -> Self {
        Self {
            report: Arc::new(Mutex::new(None)),
            transactions: Arc::new(Mutex::new(RequestQueue::new())),
            switches: Arc::new(Mutex::new(RequestQueue::new())),
            session_token: Arc::new(Uuid::new_v4().to_string()),
        }
    }

    pub fn session_token(&self) -> Arc<String> {
        self.session_token.clone()
    }

    /// Whether a page has reported an injected wallet.
    pub fn has_provider(&self) -> bool {
        self.report.lock().as_ref().is_some_and(|report| report.has_provider)
    }

    pub fn is_connected(&self) -> bool {
        self.get_connection().is_some()
    }

    pub fn get_connection(&self) -> Option<Connection> {
        self.report.lock().as_ref().and_then(|report| report.connection)
    }

    /// The wallet's error from the last access attempt, if any.
    pub fn connection_error(&self) -> Option<String> {
        self.report.lock().as_ref().and_then(|report| report.error.clone())
    }

    pub fn set_report(&self, report: ConnectionReport) {
        *self.report.lock() = Some(report);
    }

    pub fn add_transaction_request(&self, request: BridgeTransaction) {
        self.transactions.lock().add_request(request.id, request);
    }

    pub fn has_transaction_request(&self, id: &Uuid) -> bool {
        self.transactions.lock().has_request(id)
    }

    /// The next transaction the page should forward to the wallet.
    pub fn read_next_transaction_request(&self) -> Option<BridgeTransaction> {
        self.transactions.lock().read_request().map(|(_, request)| request.clone())
    }

    pub fn remove_transaction_request(&self, id: &Uuid) {
        self.transactions.lock().remove_request(id);
    }

    /// Records the page's answer and retires the matching request.
    pub fn add_transaction_response(&self, response: TransactionResponse) {
        let id = response.id;
        let mut transactions = self.transactions.lock();
        transactions.add_response(id, response);
        transactions.remove_request(&id);
    }

    pub fn take_transaction_response(&self, id: &Uuid) -> Option<TransactionResponse> {
        self.transactions.lock().take_response(id)
    }

    pub fn add_switch_request(&self, request: ChainSwitchRequest) {
        self.switches.lock().add_request(request.id, request);
    }

    pub fn has_switch_request(&self, id: &Uuid) -> bool {
        self.switches.lock().has_request(id)
    }

    pub fn read_next_switch_request(&self) -> Option<ChainSwitchRequest> {
        self.switches.lock().read_request().map(|(_, request)| *request)
    }

    pub fn remove_switch_request(&self, id: &Uuid) {
        self.switches.lock().remove_request(id);
    }

    pub fn add_switch_response(&self, response: ChainSwitchResponse) {
        let id = response.id;
        let mut switches = self.switches.lock();
        switches.add_response(id, response);
        switches.remove_request(&id);
    }

    pub fn take_switch_response(&self, id: &Uuid) -> Option<ChainSwitchResponse> {
        self.switches.lock().take_response(id)
    }
}
