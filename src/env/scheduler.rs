use std::collections::VecDeque;

/// Ticket for one outstanding "run again before the next repaint" request.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameHandle(u64);

impl FrameHandle {
    /// Raw request number (monotonic per scheduler).
    pub fn id(self) -> u64 {
        self.0
    }
}

/// Frame-callback primitive of the host.
///
/// A request stays outstanding until the host fires it or it is cancelled. Cancelling a handle
/// that already fired or was never issued is a no-op.
pub trait FrameScheduler {
    /// Ask for one callback before the next repaint.
    fn request_frame(&mut self) -> FrameHandle;

    /// Withdraw an outstanding request.
    fn cancel_frame(&mut self, handle: FrameHandle);
}

/// Scheduler driven by hand: requests queue up until the host takes them.
///
/// Also a spy: it counts requests and cancellations so tests can assert that no frame is ever
/// requested (reduced motion) or left outstanding (unmount).
#[derive(Debug, Default)]
pub struct ManualScheduler {
    next_id: u64,
    pending: VecDeque<FrameHandle>,
    requested: usize,
    cancelled: usize,
}

impl ManualScheduler {
    /// Empty scheduler.
    pub fn new() -> Self {
        Self::default()
    }

    /// Pop the oldest outstanding request, marking it fired.
    pub fn take_next(&mut self) -> Option<FrameHandle> {
        self.pending.pop_front()
    }

    /// Pop every outstanding request in submission order.
    pub fn take_all(&mut self) -> Vec<FrameHandle> {
        self.pending.drain(..).collect()
    }

    /// Whether `handle` is still outstanding.
    pub fn is_pending(&self, handle: FrameHandle) -> bool {
        self.pending.contains(&handle)
    }

    /// Outstanding requests.
    pub fn pending_count(&self) -> usize {
        self.pending.len()
    }

    /// Total `request_frame` calls.
    pub fn requested_count(&self) -> usize {
        self.requested
    }

    /// Total `cancel_frame` calls that withdrew an outstanding request.
    pub fn cancelled_count(&self) -> usize {
        self.cancelled
    }
}

impl FrameScheduler for ManualScheduler {
    fn request_frame(&mut self) -> FrameHandle {
        self.next_id += 1;
        let handle = FrameHandle(self.next_id);
        self.pending.push_back(handle);
        self.requested += 1;
        handle
    }

    fn cancel_frame(&mut self, handle: FrameHandle) {
        let before = self.pending.len();
        self.pending.retain(|&h| h != handle);
        if self.pending.len() != before {
            self.cancelled += 1;
        }
    }
}

#[cfg(test)]
#[path = "../../tests/unit/env/scheduler.rs"]
mod tests;
