use crate::error::{CancelledSnafu, DeadlineExceededSnafu, RosterResult};
use std::time::Duration;
use tokio::{
    sync::watch::{Receiver, Sender, channel},
    time::Instant,
};

/// Per-call cancellation and deadline, threaded through every service and store operation.
#[derive(Clone, Debug, Default)]
pub struct CallContext {
    deadline: Option<Instant>,
    cancelled: Option<Receiver<bool>>,
}

/// Flips the cancel signal of every [`CallContext`] made from it.
#[derive(Debug)]
pub struct CancelHandle {
    sender: Sender<bool>,
}

impl CallContext {
    pub fn background() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_timeout(self, timeout: Duration) -> Self {
        self.with_deadline(Instant::now() + timeout)
    }

    #[must_use]
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        //a parent deadline always wins if it's sooner
        self.deadline = Some(self.deadline.map_or(deadline, |d| d.min(deadline)));
        self
    }

    pub fn with_cancel(mut self) -> (Self, CancelHandle) {
        let (sender, receiver) = channel(false);
        self.cancelled = Some(receiver);
        (self, CancelHandle { sender })
    }

    #[allow(dead_code)]
    pub const fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancelled.as_ref().is_some_and(|rx| *rx.borrow())
    }

    pub fn check(&self) -> RosterResult<()> {
        snafu::ensure!(!self.is_cancelled(), CancelledSnafu);
        if let Some(deadline) = self.deadline {
            snafu::ensure!(Instant::now() < deadline, DeadlineExceededSnafu);
        }
        Ok(())
    }
}

impl CancelHandle {
    pub fn cancel(&self) {
        self.sender.send_replace(true);
    }
}
