//! Focus timer service
//!
//! Drives a [`FocusTimer`] with a one-second tick task.
//! The tick task only exists while the timer is running.

use crate::config::TICK_INTERVAL;
use crate::timer::{FocusTimer, TimerPreset};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{interval_at, Instant};

struct Shared {
    timer: Mutex<FocusTimer>,
    snapshots: watch::Sender<FocusTimer>,
}

impl Shared {
    fn lock_timer(&self) -> MutexGuard<'_, FocusTimer> {
        self.timer.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Apply a change and publish the resulting state
    fn update<R>(&self, f: impl FnOnce(&mut FocusTimer) -> R) -> R {
        let mut timer = self.lock_timer();
        let result = f(&mut timer);
        self.snapshots.send_replace(timer.clone());
        result
    }

    fn tick(&self) {
        if let Some(phase) = self.update(FocusTimer::tick) {
            tracing::info!("Focus timer switched to {}", phase.label());
        }
    }
}

/// Focus timer with its tick source
pub struct FocusTimerService {
    shared: Arc<Shared>,
    ticker: Option<JoinHandle<()>>,
}

impl FocusTimerService {
    pub fn new(preset: TimerPreset) -> Self {
        let timer = FocusTimer::new(preset);
        let (snapshots, _) = watch::channel(timer.clone());
        Self {
            shared: Arc::new(Shared {
                timer: Mutex::new(timer),
                snapshots,
            }),
            ticker: None,
        }
    }

    /// Current timer state
    pub fn snapshot(&self) -> FocusTimer {
        self.shared.lock_timer().clone()
    }

    /// Watch every tick and transition
    pub fn subscribe(&self) -> watch::Receiver<FocusTimer> {
        self.shared.snapshots.subscribe()
    }

    /// Pause or resume. Returns whether the timer is now running.
    ///
    /// Must be called within a Tokio runtime.
    pub fn toggle(&mut self) -> bool {
        let running = self.shared.update(FocusTimer::toggle_running);
        if running {
            self.start_ticker();
        } else {
            self.stop_ticker();
        }
        tracing::debug!("Focus timer {}", if running { "started" } else { "paused" });
        running
    }

    pub fn start(&mut self) {
        if !self.snapshot().is_running() {
            self.toggle();
        }
    }

    pub fn pause(&mut self) {
        if self.snapshot().is_running() {
            self.toggle();
        }
    }

    /// Stop the timer and restart it from a fresh work phase
    pub fn select_preset(&mut self, preset: TimerPreset) {
        self.stop_ticker();
        self.shared.update(|timer| timer.select_preset(preset));
        tracing::info!(
            "Focus timer preset set to {}/{} seconds",
            preset.work_secs,
            preset.break_secs
        );
    }

    fn start_ticker(&mut self) {
        self.stop_ticker();

        // First tick one full interval after the call, not after the first poll
        let start = Instant::now() + TICK_INTERVAL;
        let shared = Arc::clone(&self.shared);
        self.ticker = Some(tokio::spawn(async move {
            let mut interval = interval_at(start, TICK_INTERVAL);
            loop {
                interval.tick().await;
                shared.tick();
            }
        }));
    }

    fn stop_ticker(&mut self) {
        if let Some(ticker) = self.ticker.take() {
            ticker.abort();
        }
    }
}

impl Drop for FocusTimerService {
    fn drop(&mut self) {
        self.stop_ticker();
    }
}
