use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Host facility that runs the frame callback again on the next frame.
///
/// `request_frame` only records the request; the host invokes the callback
/// later, once per display refresh. Implementations must not call back
/// synchronously.
pub trait FrameScheduler {
    fn request_frame(&mut self);
}

impl<S: FrameScheduler + ?Sized> FrameScheduler for &mut S {
    fn request_frame(&mut self) {
        (**self).request_frame()
    }
}

/// Headless scheduler: counts outstanding frame requests.
///
/// Hosts without a display drain it with [`FrameQueue::take`] and run one
/// frame per request.
#[derive(Debug, Default)]
pub struct FrameQueue {
    pending: u64,
    requested: u64,
}

impl FrameQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Consume one pending request. Returns false when none is queued.
    pub fn take(&mut self) -> bool {
        if self.pending == 0 {
            return false;
        }
        self.pending -= 1;
        true
    }

    pub fn pending(&self) -> u64 {
        self.pending
    }

    /// Total requests received since creation.
    pub fn requested(&self) -> u64 {
        self.requested
    }
}

impl FrameScheduler for FrameQueue {
    fn request_frame(&mut self) {
        self.pending += 1;
        self.requested += 1;
    }
}

/// Shared stop switch for a demo's frame loop.
///
/// Clones share one flag. Safe to flip from any thread.
#[derive(Debug, Clone)]
pub struct LoopHandle {
    running: Arc<AtomicBool>,
}

impl LoopHandle {
    pub(crate) fn new() -> Self {
        Self {
            running: Arc::new(AtomicBool::new(true)),
        }
    }

    /// Stop the loop. Frames already requested will find it stopped and
    /// neither render nor reschedule.
    pub fn stop(&self) {
        self.running.store(false, Ordering::Release);
    }

    /// Re-arm the loop. The host must request the next frame itself, since a
    /// stopped loop left nothing scheduled.
    pub fn resume(&self) {
        self.running.store(true, Ordering::Release);
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn queue_counts_requests() {
        let mut q = FrameQueue::new();
        assert!(!q.take());
        q.request_frame();
        q.request_frame();
        assert_eq!(q.pending(), 2);
        assert!(q.take());
        assert!(q.take());
        assert!(!q.take());
        assert_eq!(q.requested(), 2);
    }

    #[test]
    fn lent_queue_records_on_owner() {
        fn request<S: FrameScheduler>(mut s: S) {
            s.request_frame();
        }
        let mut q = FrameQueue::new();
        request(&mut q);
        assert_eq!(q.pending(), 1);
    }

    #[test]
    fn handle_clones_share_state() {
        let a = LoopHandle::new();
        let b = a.clone();
        assert!(b.is_running());
        a.stop();
        assert!(!b.is_running());
        b.resume();
        assert!(a.is_running());
    }

    #[test]
    fn handle_stops_from_another_thread() {
        let handle = LoopHandle::new();
        let remote = handle.clone();
        std::thread::spawn(move || remote.stop()).join().unwrap();
        assert!(!handle.is_running());
    }
}
