//! Bounded-concurrency fan-out

use super::recovery::panic_message;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::{JoinError, JoinSet};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error};

/// Run `handler` for every input with at most `limit` handlers in flight
///
/// Every input is handed to the handler; a failing handler does not stop the
/// others. The returned vector holds every error in completion order. A
/// `limit` of zero is treated as one. Panicking handlers are logged and
/// contribute no error. The token is passed to each handler untouched so
/// callers can cancel long-running work.
pub async fn run_with_concurrency_limit<I, T, E, F, Fut>(
    token: CancellationToken,
    inputs: I,
    limit: usize,
    handler: F,
) -> Vec<E>
where
    I: IntoIterator<Item = T>,
    E: Send + 'static,
    F: Fn(CancellationToken, T) -> Fut,
    Fut: Future<Output = Result<(), E>> + Send + 'static,
{
    let limit = limit.max(1);
    let semaphore = Arc::new(Semaphore::new(limit));
    let mut tasks = JoinSet::new();
    let mut errors = Vec::new();

    for input in inputs {
        // The semaphore is never closed, so acquisition only fails if it were
        let Ok(permit) = Arc::clone(&semaphore).acquire_owned().await else {
            break;
        };

        let future = handler(token.clone(), input);
        tasks.spawn(async move {
            let _permit = permit;
            future.await
        });

        while let Some(finished) = tasks.try_join_next() {
            collect_outcome(finished, &mut errors);
        }
    }

    while let Some(finished) = tasks.join_next().await {
        collect_outcome(finished, &mut errors);
    }

    debug!("Concurrent run finished with {} error(s)", errors.len());
    errors
}

fn collect_outcome<E>(outcome: Result<Result<(), E>, JoinError>, errors: &mut Vec<E>) {
    match outcome {
        Ok(Ok(())) => {}
        Ok(Err(e)) => errors.push(e),
        Err(e) if e.is_panic() => {
            error!("Concurrent handler panicked: {}", panic_message(e.into_panic().as_ref()));
        }
        Err(e) => error!("Concurrent handler did not complete: {}", e),
    }
}
