//! Conversion Worker - runs one batch off the UI thread
//!
//! The worker owns the [`ConversionRequest`] and talks back only through a
//! bounded channel: zero or more `Progress` messages followed by exactly one
//! `Finished`. The receiving side is polled from the UI main loop, so the
//! worker never touches UI objects.

use crate::converter::{ConversionRequest, ConversionResult};
use anyhow::{Context, Result};
use std::sync::mpsc::{self, Receiver, RecvError, TryRecvError};
use std::thread::{self, JoinHandle};

/// Name given to the worker thread
pub const WORKER_THREAD_NAME: &str = "tiffconv-worker";

/// Messages sent from the worker thread to the UI thread
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionMessage {
    /// Percentage after a file attempt
    Progress(u8),
    /// Terminal outcome; always the last message
    Finished(ConversionResult),
}

/// Receiving end of a running conversion
pub struct ConversionHandle {
    receiver: Receiver<ConversionMessage>,
    thread: Option<JoinHandle<()>>,
}

impl ConversionHandle {
    /// Non-blocking receive, for main-loop polling
    pub fn try_recv(&self) -> Result<ConversionMessage, TryRecvError> {
        self.receiver.try_recv()
    }

    /// Blocking receive
    pub fn recv(&self) -> Result<ConversionMessage, RecvError> {
        self.receiver.recv()
    }

    /// Block until the worker is done and return its result
    ///
    /// A worker that died without reporting is turned into a failure result.
    pub fn wait(mut self) -> ConversionResult {
        let mut outcome = None;
        while let Ok(msg) = self.receiver.recv() {
            if let ConversionMessage::Finished(result) = msg {
                outcome = Some(result);
            }
        }
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
        outcome.unwrap_or_else(worker_lost)
    }
}

/// Result reported when the channel closes without a `Finished` message
pub fn worker_lost() -> ConversionResult {
    ConversionResult::failure("the conversion worker stopped unexpectedly")
}

/// Start `request` on a dedicated worker thread
///
/// The channel holds `capacity` messages; once full the worker waits for the
/// UI to drain it. A dropped receiver makes every send a no-op.
pub fn spawn(request: ConversionRequest, capacity: usize) -> Result<ConversionHandle> {
    let (sender, receiver) = mpsc::sync_channel::<ConversionMessage>(capacity);

    let thread = thread::Builder::new()
        .name(WORKER_THREAD_NAME.to_string())
        .spawn(move || {
            let progress_sender = sender.clone();
            let result = request.run(move |percent: u8| {
                // Receiver gone means the window closed; keep converting.
                let _ = progress_sender.send(ConversionMessage::Progress(percent));
            });

            tracing::debug!("Worker finished: {:?}", result);
            let _ = sender.send(ConversionMessage::Finished(result));
        })
        .context("Failed to start the conversion worker thread")?;

    Ok(ConversionHandle {
        receiver,
        thread: Some(thread),
    })
}
