use std::time::Duration;

use alloy_primitives::{Address, TxHash, TxKind, U256, address};
use alloy_provider::{Provider, ProviderBuilder};
use alloy_sol_types::SolCall;
use tokio::time;
use waveportal_bindings::{Deployment, IWavePortal};
use waveportal_wallet::{
    ApiResponse, BridgeTransaction, Connection, ConnectionReport, TransactionResponse,
    WalletBridge, WalletError, WalletSession,
};

use crate::{ClientOpts, SubmitPhase, WaveClient, WaveClientError, order_history};

const ALICE: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");
const CONTRACT: Address = address!("0x5FbDB2315678afecb367f032d93F642f64180aa3");
const CHAIN: u64 = 31337;

/// A provider pointing at nothing. Fine for everything that never issues an
/// RPC call, and fails fast for everything that does.
fn dead_provider() -> impl Provider + Clone {
    ProviderBuilder::new().connect_http("http://127.0.0.1:9".parse().unwrap())
}

fn test_client(bridge: &WalletBridge) -> WaveClient<impl Provider + Clone + use<>> {
    WaveClient::new(
        dead_provider(),
        Deployment { address: CONTRACT, chain_id: CHAIN },
        WalletSession::new(bridge.clone()),
        ClientOpts { transaction_timeout: Duration::from_secs(2), ..Default::default() },
    )
}

/// Drives the bridge the way the portal page would.
struct PageSim {
    client: reqwest::Client,
    base: String,
    token: String,
}

impl PageSim {
    async fn attach(bridge: &WalletBridge) -> Self {
        let addr = bridge.start(0).await.unwrap();
        Self {
            client: reqwest::Client::new(),
            base: format!("http://{addr}/api/wallet"),
            token: bridge.session_token().to_string(),
        }
    }

    async fn connect(&self, address: Address, chain_id: u64) {
        let report = ConnectionReport {
            has_provider: true,
            connection: Some(Connection::new(address, chain_id)),
            error: None,
        };
        let resp = self
            .client
            .post(format!("{}/connection", self.base))
            .header("X-Session-Token", &self.token)
            .json(&report)
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
    }

    async fn wait_for_transaction(&self) -> BridgeTransaction {
        let deadline = time::Instant::now() + Duration::from_secs(5);
        loop {
            let api: ApiResponse<BridgeTransaction> = self
                .client
                .get(format!("{}/transaction/request", self.base))
                .header("X-Session-Token", &self.token)
                .send()
                .await
                .unwrap()
                .json()
                .await
                .unwrap();
            if let ApiResponse::Ok(request) = api {
                return request;
            }
            assert!(time::Instant::now() < deadline, "no transaction request showed up");
            time::sleep(Duration::from_millis(50)).await;
        }
    }

    async fn respond(&self, response: TransactionResponse) {
        let resp = self
            .client
            .post(format!("{}/transaction/response", self.base))
            .header("X-Session-Token", &self.token)
            .json(&response)
            .send()
            .await
            .unwrap();
        assert!(resp.status().is_success());
    }
}

#[tokio::test]
async fn empty_message_never_reaches_the_wallet() {
    let bridge = WalletBridge::new(Duration::from_millis(200));
    let client = test_client(&bridge);

    for text in ["", "   ", "\n\t "] {
        // the wallet is not connected, so any wallet interaction would fail
        // with NotConnected; validation must fire first
        let err = client.submit(text).await.unwrap_err();
        assert!(matches!(err, WaveClientError::EmptyMessage), "for input {text:?}");
    }

    let state = client.snapshot();
    assert_eq!(state.phase, SubmitPhase::Idle);
    assert!(!state.loading());
    assert_eq!(state.error.as_deref(), Some("Please enter a valid message."));
}

#[tokio::test]
async fn submit_without_wallet_fails_cleanly() {
    let bridge = WalletBridge::new(Duration::from_millis(200));
    let client = test_client(&bridge);

    let err = client.submit("hello").await.unwrap_err();
    assert!(matches!(err, WaveClientError::Wallet(WalletError::NotConnected)));

    let state = client.snapshot();
    assert_eq!(state.phase, SubmitPhase::Failed);
    assert!(!state.loading());
    // the draft survives the failure
    assert_eq!(state.draft, "hello");
    assert!(state.error.unwrap().contains("wallet"));
}

#[tokio::test]
async fn wave_transaction_is_shaped_for_the_contract() {
    let bridge = WalletBridge::new(Duration::from_secs(5));
    let page = PageSim::attach(&bridge).await;
    page.connect(ALICE, CHAIN).await;

    let client = test_client(&bridge);
    let submitting = client.clone();
    let handle = tokio::spawn(async move { submitting.submit("hello").await });

    let pending = page.wait_for_transaction().await;
    assert_eq!(pending.request.from, Some(ALICE));
    assert_eq!(pending.request.to, Some(TxKind::Call(CONTRACT)));
    assert_eq!(pending.request.gas, Some(300_000));

    let calldata = pending.request.input.input().expect("calldata is set");
    assert_eq!(&calldata[..4], IWavePortal::waveCall::SELECTOR);
    let call = IWavePortal::waveCall::abi_decode(calldata).unwrap();
    assert_eq!(call.message, "hello");

    // no node behind the dead provider: answer with a rejection to unwind
    page.respond(TransactionResponse {
        id: pending.id,
        hash: None,
        error: Some("unwind".to_string()),
    })
    .await;
    let _ = handle.await.unwrap();
}

#[tokio::test]
async fn wallet_rejection_is_silent_and_keeps_the_draft() {
    let bridge = WalletBridge::new(Duration::from_secs(5));
    let page = PageSim::attach(&bridge).await;
    page.connect(ALICE, CHAIN).await;

    let client = test_client(&bridge);
    let submitting = client.clone();
    let handle = tokio::spawn(async move { submitting.submit("gm portal").await });

    let pending = page.wait_for_transaction().await;
    page.respond(TransactionResponse {
        id: pending.id,
        hash: None,
        error: Some("User denied transaction signature".to_string()),
    })
    .await;

    match handle.await.unwrap() {
        Err(WaveClientError::Wallet(WalletError::Rejected { operation, .. })) => {
            assert_eq!(operation, "transaction");
        }
        other => panic!("expected a wallet rejection, got {other:?}"),
    }

    let state = client.snapshot();
    assert_eq!(state.phase, SubmitPhase::Failed);
    assert!(!state.loading());
    assert_eq!(state.draft, "gm portal");
    // the user said no; nothing to report back to them
    assert_eq!(state.error, None);
}

#[tokio::test]
async fn confirmation_failure_surfaces_the_generic_error() {
    let bridge = WalletBridge::new(Duration::from_secs(5));
    let page = PageSim::attach(&bridge).await;
    page.connect(ALICE, CHAIN).await;

    let client = test_client(&bridge);
    let submitting = client.clone();
    let handle = tokio::spawn(async move { submitting.submit("hello").await });

    // the wallet accepts, but the dead provider can never confirm
    let pending = page.wait_for_transaction().await;
    page.respond(TransactionResponse {
        id: pending.id,
        hash: Some(TxHash::random()),
        error: None,
    })
    .await;

    let err = handle.await.unwrap().unwrap_err();
    assert!(matches!(
        err,
        WaveClientError::Confirmation(_) | WaveClientError::Network(_)
    ));

    let state = client.snapshot();
    assert_eq!(state.phase, SubmitPhase::Failed);
    assert!(!state.loading());
    assert_eq!(state.draft, "hello");
    assert!(state.error.unwrap().starts_with("Transaction failed"));
}

#[tokio::test]
async fn successful_outcome_clears_the_draft() {
    let bridge = WalletBridge::new(Duration::from_millis(200));
    let client = test_client(&bridge);

    client.update(|session| {
        session.draft = "hello".to_string();
        session.phase = SubmitPhase::AwaitingConfirmation;
    });
    client.record_outcome(&Ok(TxHash::ZERO));

    let state = client.snapshot();
    assert_eq!(state.draft, "");
    assert_eq!(state.phase, SubmitPhase::Idle);
    assert!(!state.loading());
    assert!(state.error.is_none());
}

#[tokio::test]
async fn sync_wallet_populates_the_account_without_prompting() {
    let bridge = WalletBridge::new(Duration::from_secs(5));
    let page = PageSim::attach(&bridge).await;

    let client = test_client(&bridge);
    assert_eq!(client.sync_wallet(), None);
    assert!(client.snapshot().account.is_none());

    page.connect(ALICE, CHAIN).await;
    let connection = client.sync_wallet().expect("wallet reported in");
    assert_eq!(connection.address, ALICE);

    let state = client.snapshot();
    assert_eq!(state.account, Some(ALICE));
    assert_eq!(state.chain_id, Some(CHAIN));
}

#[test]
fn history_is_displayed_newest_first() {
    let onchain = vec![
        IWavePortal::Wave {
            waver: ALICE,
            message: "oldest".to_string(),
            timestamp: U256::from(1u64),
        },
        IWavePortal::Wave {
            waver: ALICE,
            message: "newest".to_string(),
            timestamp: U256::from(2u64),
        },
    ];

    let (waves, total) = order_history(onchain, 2);
    assert_eq!(total, 2);
    assert_eq!(waves[0].message, "newest");
    assert_eq!(waves[1].message, "oldest");
}
