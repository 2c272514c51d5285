//! Compose demo
//!
//! Drives the whole Quill prediction stack once, end to end:
//!
//! 1. Loads configuration and initializes logging.
//! 2. Builds a [`PredictionHost`], lists the discovered predictors, and
//!    switches to the frequency predictor by id.
//! 3. Teaches the predictor a little text, loads a document context, and
//!    asks for synchronous predictions.
//! 4. Flips the mode through the invocation bridge, with no static reference to
//!    the predictor's concrete type.
//! 5. Fires an asynchronous prediction and waits for its completion to come
//!    back through the completion pump.
//!
//! # Usage
//!
//! ```bash
//! cargo run --package compose
//! ```

use std::sync::Arc;

use anyhow::Result;
use tokio::sync::mpsc;
use tracing::info;
use uuid::Uuid;

use quill::FrequencyPredictor;
use quill::prelude::*;
use quill::quill_runtime::config::ConfigLoader;
use quill::quill_runtime::logging;

/// Sink that prints completions and hands them to the main task.
struct PrintingSink {
    forward: mpsc::UnboundedSender<PredictionResponse>,
}

#[async_trait::async_trait]
impl CompletionSink for PrintingSink {
    async fn deliver(&self, response: PredictionResponse) {
        info!(
            fragment = %response.request.last_word_fragment,
            candidates = ?response.candidates,
            "Async prediction completed"
        );
        let _ = self.forward.send(response);
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let config = ConfigLoader::new().load()?;
    logging::init_from_config(&config.logging);

    let host = PredictionHost::from_config(&config)?;
    for descriptor in host.registry().descriptors() {
        info!(predictor = %descriptor, "Available");
    }

    host.switch_to(Uuid::try_parse(FrequencyPredictor::ID)?)?;
    let active = host.active();

    // Teach it something to predict from.
    active.predictor.learn(
        "the rain in spain stays mainly in the plain",
        LearnKind::Sentences,
    );
    let context = active.predictor.load_context("raindrops on roses");

    let request = PredictionRequest::new("the", "rai").with_context(context);
    let response = active.predictor.predict(request);
    println!("sync candidates for 'rai': {:?}", response.candidates);

    // Flip the mode by name through the bridge.
    active
        .invoker()
        .set_value("mode", serde_json::Value::from("sentence"))?;
    info!(mode = %active.predictor.mode(), "Mode set through the bridge");

    // Asynchronous prediction, routed back through the completion pump.
    let (forward, mut completed) = mpsc::unbounded_channel();
    let pump = spawn_completion_pump(
        active.predictor.subscribe_completions(),
        Arc::new(PrintingSink { forward }),
    );

    let request = PredictionRequest::new("stays mainly in the", "p");
    if active.predictor.predict_async(request) {
        if let Some(response) = completed.recv().await {
            println!("async candidates for 'p': {:?}", response.candidates);
        }
    } else {
        println!("async prediction not accepted");
    }

    active.predictor.unload_context(context);
    if !host.save() {
        println!("failed to save predictor settings");
    }
    pump.abort();

    Ok(())
}
