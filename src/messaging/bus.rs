//! Signal bus between the element and its host.

use super::{ActionCallback, ActionEvent, HostSignal};
use std::sync::Arc;
use tokio::sync::broadcast;

/// Sender half of the signal bus.
#[derive(Clone)]
pub struct SignalSender {
    tx: broadcast::Sender<HostSignal>,
}

impl SignalSender {
    /// Dispatch a signal to every current listener.
    ///
    /// Having no listener is not an error: the host may simply not care.
    pub fn dispatch(&self, signal: HostSignal) {
        if self.tx.send(signal).is_err() {
            tracing::trace!("signal dispatched with no listeners");
        }
    }

    /// Dispatch `mfe:ready`.
    pub fn ready(&self) {
        self.dispatch(HostSignal::Ready);
    }

    /// Dispatch an action event as `mfe:action`.
    pub fn action(&self, event: ActionEvent) {
        self.dispatch(HostSignal::Action(event));
    }

    /// An action callback that forwards each event as one `mfe:action` signal.
    pub fn action_callback(&self) -> ActionCallback {
        let sender = self.clone();
        Arc::new(move |event| sender.action(event))
    }
}

/// Receiver half of the signal bus.
pub struct SignalReceiver {
    rx: broadcast::Receiver<HostSignal>,
}

impl SignalReceiver {
    /// Receive the next signal.
    pub async fn recv(&mut self) -> Result<HostSignal, BusError> {
        self.rx.recv().await.map_err(|e| match e {
            broadcast::error::RecvError::Closed => BusError::Closed,
            broadcast::error::RecvError::Lagged(n) => BusError::Lagged(n),
        })
    }

    /// Try to receive a signal without waiting.
    pub fn try_recv(&mut self) -> Result<Option<HostSignal>, BusError> {
        match self.rx.try_recv() {
            Ok(signal) => Ok(Some(signal)),
            Err(broadcast::error::TryRecvError::Empty) => Ok(None),
            Err(broadcast::error::TryRecvError::Closed) => Err(BusError::Closed),
            Err(broadcast::error::TryRecvError::Lagged(n)) => Err(BusError::Lagged(n)),
        }
    }

    /// Drain everything currently queued.
    ///
    /// A receiver that fell behind loses the oldest signals; the rest are
    /// still returned.
    pub fn drain(&mut self) -> Vec<HostSignal> {
        let mut out = Vec::new();
        loop {
            match self.try_recv() {
                Ok(Some(signal)) => out.push(signal),
                Ok(None) | Err(BusError::Closed) => break,
                Err(BusError::Lagged(skipped)) => {
                    tracing::warn!(skipped, "signal receiver lagged, oldest signals dropped");
                }
            }
        }
        out
    }
}

/// Signals a receiver can fall behind by before the oldest are dropped.
pub const DEFAULT_BUS_CAPACITY: usize = 1024;

/// Bus the element dispatches its host signals on.
pub struct SignalBus {
    tx: broadcast::Sender<HostSignal>,
}

impl SignalBus {
    /// Create a new signal bus.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_BUS_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity);
        Self { tx }
    }

    /// Get a sender.
    pub fn sender(&self) -> SignalSender {
        SignalSender { tx: self.tx.clone() }
    }

    /// Subscribe to signals.
    pub fn subscribe(&self) -> SignalReceiver {
        SignalReceiver {
            rx: self.tx.subscribe(),
        }
    }
}

impl Default for SignalBus {
    fn default() -> Self {
        Self::new()
    }
}

/// Bus errors.
#[derive(Debug, thiserror::Error)]
pub enum BusError {
    #[error("Channel closed")]
    Closed,
    #[error("Lagged behind by {0} signals")]
    Lagged(u64),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dispatch_without_listeners_is_silent() {
        let bus = SignalBus::new();
        bus.sender().ready();
    }

    #[test]
    fn test_every_subscriber_sees_each_signal_once() {
        let bus = SignalBus::new();
        let mut a = bus.subscribe();
        let mut b = bus.subscribe();

        let callback = bus.sender().action_callback();
        callback(ActionEvent::api_retry(1));
        callback(ActionEvent::api_retry(2));

        for rx in [&mut a, &mut b] {
            let signals = rx.drain();
            assert_eq!(
                signals,
                vec![
                    HostSignal::Action(ActionEvent::api_retry(1)),
                    HostSignal::Action(ActionEvent::api_retry(2)),
                ]
            );
        }
    }

    #[test]
    fn test_drain_after_overflow_keeps_newest_signals() {
        let bus = SignalBus::with_capacity(4);
        let mut rx = bus.subscribe();
        let sender = bus.sender();
        for attempt in 1..=6 {
            sender.action(ActionEvent::api_retry(attempt));
        }

        let signals = rx.drain();

        let expected: Vec<_> = (3..=6)
            .map(|attempt| HostSignal::Action(ActionEvent::api_retry(attempt)))
            .collect();
        assert_eq!(signals, expected);
        assert!(rx.drain().is_empty());
    }

    #[test]
    fn test_drain_handles_host_session_volume() {
        let bus = SignalBus::new();
        let mut rx = bus.subscribe();
        let sender = bus.sender();
        for attempt in 1..=300 {
            sender.action(ActionEvent::api_retry(attempt));
        }

        let signals = rx.drain();

        assert_eq!(signals.len(), 300);
        assert_eq!(signals[0], HostSignal::Action(ActionEvent::api_retry(1)));
    }

    #[tokio::test]
    async fn test_recv_waits_for_signal() {
        let bus = SignalBus::new();
        let mut rx = bus.subscribe();
        let sender = bus.sender();
        tokio::spawn(async move { sender.ready() });
        assert_eq!(rx.recv().await.unwrap(), HostSignal::Ready);
    }
}
