//! Frame ticker: advances the frame index on a fixed period.
//!
//! Bridges the synchronous host loop with a tokio interval task. The task
//! owns the [`FramePlayer`] and is the only writer of the current index, which
//! it publishes on a `watch` channel; the host loop only reads.
//!
//! Stopping the ticker (explicitly or on drop) cancels the task. Frame data
//! is never touched by the task, only the index.

use std::time::Duration;

use anyhow::{Context, Result};
use tokio::runtime::{Builder, Runtime};
use tokio::sync::{oneshot, watch};
use tokio::time::{interval_at, Instant, MissedTickBehavior};

use crate::core::FramePlayer;

/// Advance `player` once per `period` until `shutdown` fires.
///
/// The first advance happens one full period after start. Publishes every new
/// index on `tx` and returns the player in its final state. Also stops when
/// the shutdown sender is dropped or every receiver is gone.
pub async fn run_ticker(
    mut player: FramePlayer,
    period: Duration,
    tx: watch::Sender<usize>,
    mut shutdown: oneshot::Receiver<()>,
) -> FramePlayer {
    let mut interval = interval_at(Instant::now() + period, period);
    interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

    loop {
        tokio::select! {
            _ = &mut shutdown => break,
            _ = interval.tick() => {
                let index = player.advance();
                if tx.send(index).is_err() {
                    break;
                }
            }
        }
    }

    log::debug!("ticker stopped at frame {}", player.frame_number());
    player
}

/// Running ticker instance.
pub struct FrameTicker {
    rt: Option<Runtime>,
    index_rx: watch::Receiver<usize>,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl FrameTicker {
    /// Spawn the ticker on its own single-worker runtime.
    pub fn start(frame_count: usize, period: Duration) -> Result<Self> {
        let rt = Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("polygrid-ticker")
            .enable_time()
            .build()
            .context("failed to create tokio runtime")?;

        let (index_tx, index_rx) = watch::channel(0usize);
        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        rt.spawn(run_ticker(
            FramePlayer::new(frame_count),
            period,
            index_tx,
            shutdown_rx,
        ));
        log::info!(
            "ticker started: {} frames every {}ms",
            frame_count,
            period.as_millis()
        );

        Ok(Self {
            rt: Some(rt),
            index_rx,
            shutdown_tx: Some(shutdown_tx),
        })
    }

    /// Latest published frame index.
    pub fn current(&self) -> usize {
        *self.index_rx.borrow()
    }

    /// The new index if it changed since the last call.
    pub fn poll_changed(&mut self) -> Option<usize> {
        match self.index_rx.has_changed() {
            Ok(true) => Some(*self.index_rx.borrow_and_update()),
            _ => None,
        }
    }

    pub fn is_running(&self) -> bool {
        self.shutdown_tx.is_some()
    }

    /// Cancel the task and shut the runtime down. Idempotent.
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
        if let Some(rt) = self.rt.take() {
            rt.shutdown_timeout(Duration::from_millis(100));
        }
    }
}

impl Drop for FrameTicker {
    fn drop(&mut self) {
        self.stop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn test_first_advance_after_one_period() {
        let (tx, mut rx) = watch::channel(0usize);
        let (_stop_tx, stop_rx) = oneshot::channel();
        let started = Instant::now();
        tokio::spawn(run_ticker(
            FramePlayer::new(5),
            Duration::from_secs(1),
            tx,
            stop_rx,
        ));

        rx.changed().await.unwrap();
        assert_eq!(*rx.borrow_and_update(), 1);
        assert!(started.elapsed() >= Duration::from_secs(1));
        assert!(started.elapsed() < Duration::from_millis(1100));
    }

    #[tokio::test(start_paused = true)]
    async fn test_wraps_after_frame_count_ticks() {
        let (tx, mut rx) = watch::channel(0usize);
        let (stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(run_ticker(
            FramePlayer::new(3),
            Duration::from_secs(1),
            tx,
            stop_rx,
        ));

        let mut seen = Vec::new();
        for _ in 0..3 {
            rx.changed().await.unwrap();
            seen.push(*rx.borrow_and_update());
        }
        assert_eq!(seen, vec![1, 2, 0]);

        stop_tx.send(()).unwrap();
        let player = task.await.unwrap();
        assert_eq!(player.index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_dropping_shutdown_sender_stops_task() {
        let (tx, _rx) = watch::channel(0usize);
        let (stop_tx, stop_rx) = oneshot::channel::<()>();
        let task = tokio::spawn(run_ticker(
            FramePlayer::new(2),
            Duration::from_secs(1),
            tx,
            stop_rx,
        ));

        drop(stop_tx);
        let player = task.await.unwrap();
        assert_eq!(player.index(), 0);
    }

    #[tokio::test(start_paused = true)]
    async fn test_stops_when_receivers_are_gone() {
        let (tx, rx) = watch::channel(0usize);
        let (_stop_tx, stop_rx) = oneshot::channel();
        let task = tokio::spawn(run_ticker(
            FramePlayer::new(4),
            Duration::from_secs(1),
            tx,
            stop_rx,
        ));

        drop(rx);
        let player = task.await.unwrap();
        assert_eq!(player.index(), 1);
    }

    #[test]
    fn test_frame_ticker_start_and_stop() {
        let mut ticker = FrameTicker::start(3, Duration::from_millis(5)).unwrap();
        assert!(ticker.is_running());

        let deadline = std::time::Instant::now() + Duration::from_secs(5);
        let changed = loop {
            if let Some(index) = ticker.poll_changed() {
                break Some(index);
            }
            if std::time::Instant::now() >= deadline {
                break None;
            }
            std::thread::sleep(Duration::from_millis(5));
        };
        assert!(matches!(changed, Some(i) if i < 3));
        assert!(ticker.current() < 3);

        ticker.stop();
        assert!(!ticker.is_running());
        ticker.stop();
    }
}
