use std::sync::{Arc, Mutex};
use tokio::sync::oneshot;
use tracing::warn;

/// One-shot bridge from event-style completion signals to an awaited result.
///
/// Any clone may call [`Completion::settle`]; only the first call is delivered.
/// Later signals are logged and dropped.
pub struct Completion<T> {
    sender: Arc<Mutex<Option<oneshot::Sender<T>>>>,
}

impl<T> Clone for Completion<T> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<T> Completion<T> {
    pub fn new() -> (Self, oneshot::Receiver<T>) {
        let (tx, rx) = oneshot::channel();
        (
            Self {
                sender: Arc::new(Mutex::new(Some(tx))),
            },
            rx,
        )
    }

    /// Returns `true` if this call delivered the result.
    pub fn settle(&self, value: T) -> bool {
        let sender = self
            .sender
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .take();

        match sender {
            Some(tx) => {
                // The waiter may have gone away; the signal still counts as the first one.
                let _ = tx.send(value);
                true
            }
            None => {
                warn!("Ignoring completion signal: result was already reported");
                false
            }
        }
    }
}
