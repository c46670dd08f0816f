//! Per-room schedule tokens.
//!
//! A scheduled transition is a spawned task; its `JoinHandle` is the
//! cancellation handle. Arming a slot aborts the predecessor, teardown
//! aborts everything. Timer callbacks re-validate room, phase and round
//! under the registry lock before mutating, so an aborted-too-late timer
//! is still harmless.

use tokio::task::JoinHandle;

/// The two room-owned timers: the round_end advance delay and the
/// time-bomb tick loop.
#[derive(Debug, Default)]
pub struct RoomTimers {
    advance: Option<JoinHandle<()>>,
    time_bomb: Option<JoinHandle<()>>,
}

impl RoomTimers {
    pub fn set_advance(&mut self, handle: JoinHandle<()>) {
        if let Some(old) = self.advance.replace(handle) {
            old.abort();
        }
    }

    pub fn set_time_bomb(&mut self, handle: JoinHandle<()>) {
        if let Some(old) = self.time_bomb.replace(handle) {
            old.abort();
        }
    }

    /// Detaches the time-bomb handle without aborting: the tick loop
    /// stops itself once it observes the room left `drawing`.
    pub fn release_time_bomb(&mut self) {
        self.time_bomb.take();
    }

    pub fn cancel_all(&mut self) {
        if let Some(h) = self.advance.take() {
            h.abort();
        }
        if let Some(h) = self.time_bomb.take() {
            h.abort();
        }
    }
}

impl Drop for RoomTimers {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    #[tokio::test(start_paused = true)]
    async fn test_rearming_advance_aborts_predecessor() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timers = RoomTimers::default();
        for _ in 0..2 {
            let f = fired.clone();
            timers.set_advance(tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(5)).await;
                f.fetch_add(1, Ordering::SeqCst);
            }));
        }
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_drop_cancels_everything() {
        let fired = Arc::new(AtomicUsize::new(0));
        {
            let mut timers = RoomTimers::default();
            let (f1, f2) = (fired.clone(), fired.clone());
            timers.set_advance(tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(5)).await;
                f1.fetch_add(1, Ordering::SeqCst);
            }));
            timers.set_time_bomb(tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(5)).await;
                f2.fetch_add(1, Ordering::SeqCst);
            }));
        }
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
