/// Background generation worker
///
/// One request runs on one background thread; token fragments are relayed
/// to the UI thread over a one-way event channel in the model's emission
/// order. Cancellation is cooperative: a shared flag checked at every token
/// boundary, never interrupting an in-progress decode step. The backend's
/// accelerator cache is released after every run, success or failure.

use super::{GenerationRequest, ModelHandle, SamplingParams, SYSTEM_PROMPT};
use crate::error::CaptionError;
use image::DynamicImage;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

/// Per-token wait bound; a decode step hanging longer than this is an error
pub const TOKEN_TIMEOUT: Duration = Duration::from_secs(20);

/// Events relayed from the worker thread to the UI
#[derive(Debug, Clone)]
pub enum WorkerEvent {
    /// One token fragment, in arrival order
    Token(String),
    /// Terminal: the full caption (partial text if cancelled mid-stream)
    Finished(String),
    /// Terminal: cancelled before any fragment was produced
    Cancelled,
    /// Terminal: setup or decode failure with the underlying message
    Error(String),
}

/// Cooperative stop flag shared between the UI and one worker run
#[derive(Debug, Clone, Default)]
pub struct CancelFlag(Arc<AtomicBool>);

impl CancelFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn cancel(&self) {
        self.0.store(true, Ordering::SeqCst);
    }

    pub fn is_cancelled(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }
}

/// Start a generation run on a background thread and return the event
/// receiver. Exactly one terminal event (`Finished`, `Cancelled` or
/// `Error`) follows zero or more `Token` events.
pub fn spawn_generation(
    model: ModelHandle,
    image: DynamicImage,
    prompt: String,
    params: SamplingParams,
    cancel: CancelFlag,
    log_prompt: bool,
) -> UnboundedReceiver<WorkerEvent> {
    let (tx, rx) = mpsc::unbounded_channel();

    std::thread::spawn(move || {
        let outcome = generate(&model, image, prompt, params, &cancel, log_prompt, &tx);

        // The empty_cache analog; must happen on every path
        model.get().release_cache();

        let terminal = match outcome {
            Ok(Some(caption)) => WorkerEvent::Finished(caption),
            Ok(None) => WorkerEvent::Cancelled,
            Err(e) => WorkerEvent::Error(e.to_string()),
        };
        let _ = tx.send(terminal);
    });

    rx
}

/// `Ok(Some(caption))` on normal or mid-stream-cancelled completion,
/// `Ok(None)` when cancelled with nothing emitted yet.
fn generate(
    model: &ModelHandle,
    image: DynamicImage,
    prompt: String,
    params: SamplingParams,
    cancel: &CancelFlag,
    log_prompt: bool,
    tx: &UnboundedSender<WorkerEvent>,
) -> Result<Option<String>, CaptionError> {
    params.validate()?;

    if cancel.is_cancelled() {
        return Ok(None);
    }

    if log_prompt {
        println!("PromptLog: {:?}", prompt);
    }

    let request = GenerationRequest {
        image,
        system_prompt: SYSTEM_PROMPT.to_string(),
        prompt: prompt.trim().to_string(),
        params,
    };

    let stream = model.get().start_generation(request)?;

    let mut caption = String::new();
    loop {
        if cancel.is_cancelled() {
            // Dropping the stream below tells the decode thread to stop
            break;
        }
        match stream.next_token(TOKEN_TIMEOUT)? {
            Some(fragment) => {
                let _ = tx.send(WorkerEvent::Token(fragment.clone()));
                caption.push_str(&fragment);
            }
            None => break,
        }
    }

    if cancel.is_cancelled() && caption.is_empty() {
        return Ok(None);
    }
    Ok(Some(caption))
}
