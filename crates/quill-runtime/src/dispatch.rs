//! Completion routing for asynchronous predictions.
//!
//! Accepted async requests complete on a predictor-owned channel, from
//! whatever worker the predictor chose. Something has to move those
//! completions back onto the thread that owns the shared state. That is the
//! host's job, and [`CompletionSink`] plus [`spawn_completion_pump`] are the
//! mechanism: the pump forwards every completion, in arrival order, to the
//! sink the host supplies.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tracing::debug;

use quill_predict::PredictionResponse;

/// Receives asynchronous prediction completions on the host's terms.
///
/// Implementations decide how to resynchronize: post to a UI queue, hold a
/// lock, forward into another channel. The pump awaits each delivery before
/// taking the next completion, so per-sink delivery is serialized.
#[async_trait]
pub trait CompletionSink: Send + Sync {
    /// Handles one completed prediction.
    async fn deliver(&self, response: PredictionResponse);
}

/// Spawns a task that drains `completions` into `sink`.
///
/// The task ends when the channel closes (all sending predictors dropped).
/// Responses are forwarded in arrival order.
pub fn spawn_completion_pump(
    mut completions: mpsc::UnboundedReceiver<PredictionResponse>,
    sink: Arc<dyn CompletionSink>,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        while let Some(response) = completions.recv().await {
            sink.deliver(response).await;
        }
        debug!("Completion channel closed, pump finished");
    })
}

#[cfg(test)]
mod tests {
    use parking_lot::Mutex;
    use quill_predict::{Fanout, PredictionRequest, PredictionResponse};

    use super::*;

    struct Collector {
        seen: Mutex<Vec<String>>,
    }

    #[async_trait]
    impl CompletionSink for Collector {
        async fn deliver(&self, response: PredictionResponse) {
            self.seen.lock().push(response.request.last_word_fragment);
        }
    }

    #[tokio::test]
    async fn test_pump_forwards_in_order_until_close() {
        let fanout: Fanout<PredictionResponse> = Fanout::new();
        let rx = fanout.subscribe();
        let sink = Arc::new(Collector {
            seen: Mutex::new(Vec::new()),
        });
        let pump = spawn_completion_pump(rx, Arc::clone(&sink) as Arc<dyn CompletionSink>);

        for fragment in ["a", "b", "c"] {
            fanout.send(PredictionResponse::empty(PredictionRequest::new("", fragment)));
        }
        drop(fanout);

        pump.await.unwrap();
        assert_eq!(*sink.seen.lock(), vec!["a", "b", "c"]);
    }
}
