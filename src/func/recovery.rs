//! Panic-safe background tasks

use std::any::Any;
use std::future::Future;
use tokio::task::JoinHandle;
use tracing::{error, warn};

/// Spawn `future` on the tokio runtime, logging instead of propagating a panic
///
/// The returned handle always completes with `Ok(())` once the future has
/// finished or panicked.
pub fn go_safe<F>(future: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tokio::spawn(async move {
        match tokio::spawn(future).await {
            Ok(()) => {}
            Err(e) if e.is_panic() => {
                error!("Panic: {}", panic_message(e.into_panic().as_ref()));
            }
            Err(e) => {
                warn!("Background task did not complete: {}", e);
            }
        }
    })
}

/// Best-effort text of a panic payload
pub(crate) fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        message.to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
