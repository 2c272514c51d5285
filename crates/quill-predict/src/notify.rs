//! Notification primitives for the predictor contract.
//!
//! The contract distinguishes two delivery models, and the primitive chosen
//! here makes each explicit:
//!
//! - **Synchronous broadcasts** (mode changes): [`ModeNotifier`] invokes every
//!   subscriber directly on the calling thread, before the mutating call
//!   returns.
//! - **Deferred deliveries** (async prediction completions, advisory
//!   probability broadcasts): [`Fanout`] hands each subscriber an unbounded
//!   channel receiver; sends may originate from any worker the predictor
//!   chooses, and the host resynchronizes on the receiving side.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::mpsc;

use crate::mode::PredictionMode;

/// Callback invoked synchronously when a predictor's mode changes.
pub type ModeSubscriber = Arc<dyn Fn(PredictionMode) + Send + Sync>;

// =============================================================================
// ModeNotifier
// =============================================================================

/// Synchronous subscriber list for mode-change notifications.
///
/// `notify` calls every subscriber on the calling thread; there is no
/// de-duplication, so notifying the same mode twice fires twice.
#[derive(Default)]
pub struct ModeNotifier {
    subscribers: Mutex<Vec<ModeSubscriber>>,
}

impl ModeNotifier {
    /// Creates an empty notifier.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a subscriber.
    pub fn subscribe(&self, subscriber: ModeSubscriber) {
        self.subscribers.lock().push(subscriber);
    }

    /// Invokes all current subscribers with `mode`, on the calling thread.
    ///
    /// Subscribers are snapshotted and invoked outside the lock, so a
    /// callback may itself subscribe without deadlocking.
    pub fn notify(&self, mode: PredictionMode) {
        let snapshot: Vec<ModeSubscriber> = self.subscribers.lock().clone();
        for subscriber in snapshot {
            subscriber(mode);
        }
    }
}

// =============================================================================
// Fanout
// =============================================================================

/// Multi-subscriber channel fan-out for deferred deliveries.
///
/// Each `subscribe` call gets its own unbounded receiver; `send` clones the
/// value to every live subscriber and silently drops senders whose receiver
/// has gone away.
pub struct Fanout<T: Clone> {
    senders: Mutex<Vec<mpsc::UnboundedSender<T>>>,
}

impl<T: Clone> Fanout<T> {
    /// Creates a fan-out with no subscribers.
    pub fn new() -> Self {
        Self {
            senders: Mutex::new(Vec::new()),
        }
    }

    /// Registers a new subscriber and returns its receiving end.
    pub fn subscribe(&self) -> mpsc::UnboundedReceiver<T> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.senders.lock().push(tx);
        rx
    }

    /// Delivers `value` to every live subscriber.
    pub fn send(&self, value: T) {
        self.senders
            .lock()
            .retain(|sender| sender.send(value.clone()).is_ok());
    }

    /// Returns `true` when at least one subscriber is registered.
    pub fn has_subscribers(&self) -> bool {
        !self.senders.lock().is_empty()
    }
}

impl<T: Clone> Default for Fanout<T> {
    fn default() -> Self {
        Self::new()
    }
}

// =============================================================================
// Advisory probability broadcasts
// =============================================================================

/// Advisory next-letter probability distribution.
///
/// Optional: a predictor that never emits these is conformant, and
/// subscribers must not assume they occur.
#[derive(Debug, Clone, PartialEq)]
pub struct LetterProbabilities {
    /// `(letter, probability)` pairs, most probable first.
    pub entries: Vec<(char, f64)>,
}

/// Advisory next-word probability distribution. Same caveats as
/// [`LetterProbabilities`].
#[derive(Debug, Clone, PartialEq)]
pub struct WordProbabilities {
    /// `(word, probability)` pairs, most probable first.
    pub entries: Vec<(String, f64)>,
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    #[test]
    fn test_mode_notifier_fires_without_dedup() {
        let notifier = ModeNotifier::new();
        let count = Arc::new(AtomicUsize::new(0));
        let seen = Arc::clone(&count);
        notifier.subscribe(Arc::new(move |mode| {
            assert_eq!(mode, PredictionMode::Sentence);
            seen.fetch_add(1, Ordering::SeqCst);
        }));

        notifier.notify(PredictionMode::Sentence);
        notifier.notify(PredictionMode::Sentence);
        assert_eq!(count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_fanout_delivers_in_order_to_each_subscriber() {
        let fanout: Fanout<u32> = Fanout::new();
        let mut rx_a = fanout.subscribe();
        let mut rx_b = fanout.subscribe();

        fanout.send(1);
        fanout.send(2);

        assert_eq!(rx_a.try_recv().unwrap(), 1);
        assert_eq!(rx_a.try_recv().unwrap(), 2);
        assert_eq!(rx_b.try_recv().unwrap(), 1);
        assert_eq!(rx_b.try_recv().unwrap(), 2);
    }

    #[test]
    fn test_fanout_drops_closed_subscribers() {
        let fanout: Fanout<u32> = Fanout::new();
        let rx = fanout.subscribe();
        drop(rx);
        fanout.send(7);
        assert!(!fanout.has_subscribers());
    }
}
