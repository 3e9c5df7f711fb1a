//! Background click processing: queue handle and drain loop.
//!
//! The redirect path hands [`ClickEvent`]s to a [`ClickRecorder`], which
//! enqueues them without waiting. A single worker task drains the queue
//! and performs the counter increment and the event append as independent
//! best-effort writes. Nothing in this module ever reports a failure back
//! to the redirect caller: a full queue drops the event, a repository
//! error is logged, and the loop moves on.

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::domain::click_event::ClickEvent;
use crate::domain::entities::NewClick;
use crate::domain::repositories::ClickRepository;

/// Sending half of the click queue.
///
/// Cheap to clone; every redirect-serving task holds one.
#[derive(Clone)]
pub struct ClickRecorder {
    tx: mpsc::Sender<ClickEvent>,
}

impl ClickRecorder {
    /// Enqueues a click event without blocking.
    ///
    /// Not async: the redirect path never awaits analytics. When the
    /// queue is full or the worker is gone the event is dropped and the
    /// drop is logged.
    pub fn record(&self, event: ClickEvent) {
        if let Err(e) = self.tx.try_send(event) {
            tracing::warn!(error = %e, "Click event dropped");
        }
    }
}

/// Creates the click queue and spawns the worker draining it.
///
/// Returns the sending handle and the worker's join handle. The worker
/// exits once every [`ClickRecorder`] clone has been dropped and the
/// queue is drained; awaiting the join handle at shutdown flushes
/// whatever is still buffered. `queue_capacity` must be non-zero.
pub fn spawn_click_worker<C>(
    clicks: Arc<C>,
    queue_capacity: usize,
) -> (ClickRecorder, JoinHandle<()>)
where
    C: ClickRepository + ?Sized + 'static,
{
    let (tx, rx) = mpsc::channel(queue_capacity);
    let handle = tokio::spawn(run_click_worker(rx, clicks));

    (ClickRecorder { tx }, handle)
}

/// Drains the click queue until all senders are gone.
///
/// The counter increment and the event append are attempted independently
/// so one failing store path cannot starve the other.
pub async fn run_click_worker<C>(mut rx: mpsc::Receiver<ClickEvent>, clicks: Arc<C>)
where
    C: ClickRepository + ?Sized,
{
    tracing::info!("Click worker started");

    while let Some(event) = rx.recv().await {
        let code = event.code.clone();

        if let Err(e) = clicks.increment_count(&code).await {
            tracing::warn!(code = %code, error = %e, "Failed to increment click counter");
        }

        if let Err(e) = clicks.record_click(NewClick::from(event)).await {
            tracing::warn!(code = %code, error = %e, "Failed to record click event");
        }
    }

    tracing::info!("Click worker stopped");
}
