//! Per-room bookkeeping of bot timer tasks.
//!
//! Each outstanding bot action is a spawned task whose `JoinHandle` is the
//! cancellation token: aborting the handle is the cancellation. Arming a
//! new action for a bot aborts its predecessor in the same slot, so a bot
//! never runs two drawing bursts (or two guess timers) concurrently.

use std::collections::HashMap;

use sketchbluff_protocol::PlayerId;
use tokio::task::JoinHandle;

/// Handles for one room's outstanding bot tasks, keyed by bot id.
#[derive(Debug, Default)]
pub struct BotTimers {
    draw: HashMap<PlayerId, JoinHandle<()>>,
    guess: HashMap<PlayerId, JoinHandle<()>>,
    vote: HashMap<PlayerId, JoinHandle<()>>,
}

impl BotTimers {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores a drawing-burst task, aborting any previous one for the bot.
    pub fn set_draw(&mut self, bot: PlayerId, handle: JoinHandle<()>) {
        if let Some(old) = self.draw.insert(bot, handle) {
            old.abort();
        }
    }

    pub fn set_guess(&mut self, bot: PlayerId, handle: JoinHandle<()>) {
        if let Some(old) = self.guess.insert(bot, handle) {
            old.abort();
        }
    }

    pub fn set_vote(&mut self, bot: PlayerId, handle: JoinHandle<()>) {
        if let Some(old) = self.vote.insert(bot, handle) {
            old.abort();
        }
    }

    /// Aborts every outstanding task for one bot.
    pub fn cancel_bot(&mut self, bot: PlayerId) {
        for handle in [
            self.draw.remove(&bot),
            self.guess.remove(&bot),
            self.vote.remove(&bot),
        ]
        .into_iter()
        .flatten()
        {
            handle.abort();
        }
    }

    /// Aborts everything. Used at round start (stale bursts), bot removal
    /// and room teardown.
    pub fn cancel_all(&mut self) {
        for (_, handle) in self
            .draw
            .drain()
            .chain(self.guess.drain())
            .chain(self.vote.drain())
        {
            handle.abort();
        }
    }
}

impl Drop for BotTimers {
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
    async fn test_cancel_bot_aborts_in_flight_tasks() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timers = BotTimers::new();

        let f = fired.clone();
        timers.set_draw(
            PlayerId(1),
            tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(2)).await;
                f.fetch_add(1, Ordering::SeqCst);
            }),
        );
        timers.cancel_bot(PlayerId(1));

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_rearming_a_slot_aborts_the_predecessor() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timers = BotTimers::new();

        for _ in 0..3 {
            let f = fired.clone();
            timers.set_guess(
                PlayerId(7),
                tokio::spawn(async move {
                    tokio::time::sleep(Duration::from_secs(1)).await;
                    f.fetch_add(1, Ordering::SeqCst);
                }),
            );
        }

        tokio::time::sleep(Duration::from_secs(5)).await;
        // Only the last armed task survives.
        assert_eq!(fired.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_all_covers_every_slot() {
        let fired = Arc::new(AtomicUsize::new(0));
        let mut timers = BotTimers::new();
        for id in 1..=3u64 {
            let (f1, f2, f3) = (fired.clone(), fired.clone(), fired.clone());
            timers.set_draw(PlayerId(id), tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                f1.fetch_add(1, Ordering::SeqCst);
            }));
            timers.set_guess(PlayerId(id), tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                f2.fetch_add(1, Ordering::SeqCst);
            }));
            timers.set_vote(PlayerId(id), tokio::spawn(async move {
                tokio::time::sleep(Duration::from_secs(1)).await;
                f3.fetch_add(1, Ordering::SeqCst);
            }));
        }
        timers.cancel_all();

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(fired.load(Ordering::SeqCst), 0);
    }
}
