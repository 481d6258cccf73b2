//! Session counters
//!
//! Tracks what the bot did over its lifetime and reports it on the
//! diagnostics channel at shutdown.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use crate::net::protocol::{Action, ActionKind};

/// Metrics registry for one bot process
#[derive(Debug)]
pub struct Metrics {
    // Tick counters
    pub tick_count: AtomicU64,
    pub malformed_records: AtomicU64,

    // Actions by kind
    pub turn_actions: AtomicU64,
    pub shoot_actions: AtomicU64,
    pub forward_actions: AtomicU64,
    pub idle_tanks: AtomicU64,

    // Decision timing (microseconds)
    pub decision_time_us: AtomicU64,
    pub decision_time_total_us: AtomicU64,
    pub decision_time_max_us: AtomicU64,

    start_time: Instant,
}

impl Metrics {
    pub fn new() -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            malformed_records: AtomicU64::new(0),
            turn_actions: AtomicU64::new(0),
            shoot_actions: AtomicU64::new(0),
            forward_actions: AtomicU64::new(0),
            idle_tanks: AtomicU64::new(0),
            decision_time_us: AtomicU64::new(0),
            decision_time_total_us: AtomicU64::new(0),
            decision_time_max_us: AtomicU64::new(0),
            start_time: Instant::now(),
        }
    }

    /// Record the decision time of one tick
    pub fn record_tick_time(&self, duration: Duration) {
        let us = duration.as_micros() as u64;
        self.decision_time_us.store(us, Ordering::Relaxed);
        self.decision_time_total_us.fetch_add(us, Ordering::Relaxed);
        self.decision_time_max_us.fetch_max(us, Ordering::Relaxed);
        self.tick_count.fetch_add(1, Ordering::Relaxed);
    }

    /// Count the actions emitted for one tick
    pub fn record_actions(&self, actions: &[Option<Action>]) {
        for action in actions {
            let counter = match action.map(|a| a.kind()) {
                Some(ActionKind::TurnTo) => &self.turn_actions,
                Some(ActionKind::Shoot) => &self.shoot_actions,
                Some(ActionKind::Forward) => &self.forward_actions,
                None => &self.idle_tanks,
            };
            counter.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn record_malformed(&self) {
        self.malformed_records.fetch_add(1, Ordering::Relaxed);
    }

    pub fn mean_decision_time_us(&self) -> u64 {
        let ticks = self.tick_count.load(Ordering::Relaxed);
        if ticks == 0 {
            return 0;
        }
        self.decision_time_total_us.load(Ordering::Relaxed) / ticks
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// One-line summary for the shutdown log
    pub fn summary(&self) -> String {
        format!(
            "ticks={} malformed={} turn={} shoot={} forward={} idle={} decision_last_us={} decision_mean_us={} decision_max_us={} uptime_s={}",
            self.tick_count.load(Ordering::Relaxed),
            self.malformed_records.load(Ordering::Relaxed),
            self.turn_actions.load(Ordering::Relaxed),
            self.shoot_actions.load(Ordering::Relaxed),
            self.forward_actions.load(Ordering::Relaxed),
            self.idle_tanks.load(Ordering::Relaxed),
            self.decision_time_us.load(Ordering::Relaxed),
            self.mean_decision_time_us(),
            self.decision_time_max_us.load(Ordering::Relaxed),
            self.uptime_seconds(),
        )
    }
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new()
    }
}
