//! Deferred decode-then-paint jobs.
//!
//! Restoring a history entry means decoding a PNG before it can be painted.
//! Undo and redo only enqueue that work and hand back a [`PaintHandle`]; the
//! owner of the surface runs the queue on its own loop. Until it does, the
//! surface keeps showing the previous content.

use crate::draw::{EncodedSnapshot, SnapshotError};
use futures::channel::oneshot;
use std::collections::VecDeque;
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

type Outcome = Result<(), SnapshotError>;

/// Completion signal for one queued paint.
///
/// Poll it with [`PaintHandle::try_outcome`] from an event loop, or `.await`
/// it. A job that is dropped without running resolves to
/// [`SnapshotError::Dropped`].
#[derive(Debug)]
#[must_use = "a paint handle reports whether the restore succeeded"]
pub struct PaintHandle {
    receiver: oneshot::Receiver<Outcome>,
}

impl PaintHandle {
    /// Returns the outcome once the job has run, `None` while it is pending.
    ///
    /// The outcome is handed out only once.
    pub fn try_outcome(&mut self) -> Option<Outcome> {
        match self.receiver.try_recv() {
            Ok(outcome) => outcome,
            Err(oneshot::Canceled) => Some(Err(SnapshotError::Dropped)),
        }
    }
}

impl Future for PaintHandle {
    type Output = Outcome;

    fn poll(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        Pin::new(&mut self.receiver)
            .poll(cx)
            .map(|received| received.unwrap_or(Err(SnapshotError::Dropped)))
    }
}

/// One queued restore: the snapshot to paint and whom to notify.
#[derive(Debug)]
pub struct PaintJob {
    snapshot: EncodedSnapshot,
    sender: oneshot::Sender<Outcome>,
}

impl PaintJob {
    pub fn snapshot(&self) -> &EncodedSnapshot {
        &self.snapshot
    }

    /// Reports the outcome to the handle. A handle that was dropped is ignored.
    pub fn complete(self, outcome: Outcome) {
        let _ = self.sender.send(outcome);
    }
}

/// FIFO of paint jobs. Jobs complete in the order they were enqueued.
#[derive(Debug, Default)]
pub struct PaintQueue {
    jobs: VecDeque<PaintJob>,
}

impl PaintQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues `snapshot` for painting and returns its completion handle.
    pub fn enqueue(&mut self, snapshot: EncodedSnapshot) -> PaintHandle {
        let (sender, receiver) = oneshot::channel();
        self.jobs.push_back(PaintJob { snapshot, sender });
        PaintHandle { receiver }
    }

    /// Takes the oldest pending job.
    pub fn pop(&mut self) -> Option<PaintJob> {
        self.jobs.pop_front()
    }

    pub fn len(&self) -> usize {
        self.jobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }
}
