use futures::{Stream, StreamExt};
use tokio::{
    sync::{mpsc, watch},
    task::JoinHandle,
};
use tracing::trace;
use waveportal_bindings::Wave;

use crate::state::SessionState;

/// A live subscription to new waves.
///
/// The background task keeps the session state current (new wave at the front
/// of the list, total bumped) and forwards each wave to this handle. Dropping
/// the handle, or calling [`WaveSubscription::unsubscribe`], aborts the task;
/// holding it anywhere guarantees release on every exit path.
#[derive(Debug)]
pub struct WaveSubscription {
    task: JoinHandle<()>,
    rx: mpsc::UnboundedReceiver<Wave>,
}

impl WaveSubscription {
    /// The next delivered wave, in emission order. `None` once the
    /// subscription has ended.
    pub async fn recv(&mut self) -> Option<Wave> {
        self.rx.recv().await
    }

    /// Ends the subscription. Equivalent to dropping the handle.
    pub fn unsubscribe(self) {}
}

impl Drop for WaveSubscription {
    fn drop(&mut self) {
        self.task.abort();
    }
}

/// Forwards `stream` into the session state and a subscriber channel.
///
/// Waves may also arrive through a concurrent full refresh; a duplicate
/// showing up on both paths is tolerated and deliberately not de-duplicated.
pub(crate) fn spawn_forwarder<S>(
    stream: S,
    state: watch::Sender<SessionState>,
) -> WaveSubscription
where
    S: Stream<Item = Wave> + Send + 'static,
{
    let (tx, rx) = mpsc::unbounded_channel();
    let task = tokio::spawn(async move {
        futures::pin_mut!(stream);
        while let Some(wave) = stream.next().await {
            trace!(target: "waveportal::client", sender = %wave.sender, "new wave event");
            state.send_modify(|session| {
                session.waves.insert(0, wave.clone());
                session.total = session.total.saturating_add(1);
            });
            // Subscriber may have gone away while the state is still wanted.
            let _ = tx.send(wave);
        }
    });
    WaveSubscription { task, rx }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy_primitives::Address;
    use std::time::Duration;

    fn wave(message: &str, timestamp: u64) -> Wave {
        Wave { sender: Address::ZERO, timestamp, message: message.to_string() }
    }

    #[tokio::test]
    async fn forwards_waves_and_updates_state() {
        let (state_tx, state_rx) = watch::channel(SessionState::default());
        let (feed_tx, feed_rx) = futures::channel::mpsc::unbounded();
        let mut subscription = spawn_forwarder(feed_rx, state_tx);

        feed_tx.unbounded_send(wave("first", 1)).unwrap();
        feed_tx.unbounded_send(wave("second", 2)).unwrap();

        assert_eq!(subscription.recv().await.unwrap().message, "first");
        assert_eq!(subscription.recv().await.unwrap().message, "second");

        let state = state_rx.borrow().clone();
        // newest first
        assert_eq!(state.waves[0].message, "second");
        assert_eq!(state.waves[1].message, "first");
        // a real increment, once per delivered event
        assert_eq!(state.total, 2);
    }

    #[tokio::test]
    async fn duplicates_are_tolerated() {
        let (state_tx, state_rx) = watch::channel(SessionState {
            waves: vec![wave("dup", 7)],
            total: 1,
            ..Default::default()
        });
        let (feed_tx, feed_rx) = futures::channel::mpsc::unbounded();
        let mut subscription = spawn_forwarder(feed_rx, state_tx);

        // the same wave arrives again via the live stream
        feed_tx.unbounded_send(wave("dup", 7)).unwrap();
        assert_eq!(subscription.recv().await.unwrap().message, "dup");

        let state = state_rx.borrow().clone();
        assert_eq!(state.waves.len(), 2);
        assert_eq!(state.total, 2);
    }

    #[tokio::test]
    async fn unsubscribe_stops_delivery() {
        let (state_tx, state_rx) = watch::channel(SessionState::default());
        let (feed_tx, feed_rx) = futures::channel::mpsc::unbounded();
        let subscription = spawn_forwarder(feed_rx, state_tx);

        subscription.unsubscribe();
        tokio::time::sleep(Duration::from_millis(20)).await;

        // the stream keeps emitting, but nothing processes it anymore
        let _ = feed_tx.unbounded_send(wave("late", 9));
        tokio::time::sleep(Duration::from_millis(50)).await;

        let state = state_rx.borrow().clone();
        assert!(state.waves.is_empty());
        assert_eq!(state.total, 0);
    }

    #[tokio::test]
    async fn dropped_receiver_keeps_state_current() {
        let (state_tx, state_rx) = watch::channel(SessionState::default());
        let (feed_tx, feed_rx) = futures::channel::mpsc::unbounded();
        let mut subscription = spawn_forwarder(feed_rx, state_tx);

        // drain nothing; the channel side being unread must not stall state
        feed_tx.unbounded_send(wave("a", 1)).unwrap();
        assert_eq!(subscription.recv().await.unwrap().message, "a");

        feed_tx.unbounded_send(wave("b", 2)).unwrap();
        let deadline = tokio::time::Instant::now() + Duration::from_secs(1);
        loop {
            if state_rx.borrow().total == 2 {
                break;
            }
            assert!(tokio::time::Instant::now() < deadline, "state never caught up");
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
    }
}
