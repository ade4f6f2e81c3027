//! Tick scheduling and the state shared between ticks and redraws
//!
//! The face normally ticks once a minute. A tap switches it to per-second
//! ticks for a fixed number of ticks, during which the second hand and its
//! echoes are drawn.

use chrono::{DateTime, Utc};
use log::debug;
use shared::{TimeSnapshot, SECONDS_PER_MINUTE};

use crate::geometry::NUM_POINTS;

/// Default number of per-second ticks after a tap
pub const DEFAULT_PRECISION_WINDOW_TICKS: u32 = 30;

/// Granularity of the tick source
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickUnit {
    Second,
    Minute,
}

impl TickUnit {
    /// Index of the `unit`-sized slot containing `instant`
    fn slot(self, instant: DateTime<Utc>) -> i64 {
        let secs = instant.timestamp();
        match self {
            TickUnit::Second => secs,
            TickUnit::Minute => secs.div_euclid(i64::from(SECONDS_PER_MINUTE)),
        }
    }
}

/// What a poll of the host clock asks for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickPoll {
    /// Still inside the current slot
    Idle,
    /// First poll after a granularity change: redraw, but count no tick
    Resync,
    /// A slot boundary was crossed
    Tick,
}

/// Whether the second hand is part of the chain
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PrecisionMode {
    /// Six pivots, second hand included
    Seconds,
    /// Five pivots, second hand hidden
    Minutes,
}

impl PrecisionMode {
    /// Number of active pivots
    pub fn point_count(self) -> usize {
        match self {
            PrecisionMode::Seconds => NUM_POINTS,
            PrecisionMode::Minutes => NUM_POINTS - 1,
        }
    }
}

/// Owns the minute/second granularity policy
#[derive(Debug, Clone)]
pub struct TickScheduler {
    unit: TickUnit,
    countdown: u32,
    window_ticks: u32,
    last_slot: Option<i64>,
}

impl TickScheduler {
    /// Start in second granularity for one full window, as after a tap
    pub fn new(window_ticks: u32) -> Self {
        let mut scheduler = Self {
            unit: TickUnit::Minute,
            countdown: 0,
            window_ticks,
            last_slot: None,
        };
        scheduler.schedule(true);
        scheduler
    }

    fn schedule(&mut self, use_seconds: bool) {
        if use_seconds {
            self.unit = TickUnit::Second;
            self.countdown = self.window_ticks;
        } else {
            self.unit = TickUnit::Minute;
        }
        self.last_slot = None;
        debug!("Ticking every {:?}", self.unit);
    }

    pub fn unit(&self) -> TickUnit {
        self.unit
    }

    /// Per-second ticks left before reverting to minutes
    pub fn remaining_ticks(&self) -> u32 {
        match self.unit {
            TickUnit::Second => self.countdown,
            TickUnit::Minute => 0,
        }
    }

    pub fn precision(&self) -> PrecisionMode {
        match self.unit {
            TickUnit::Second => PrecisionMode::Seconds,
            TickUnit::Minute => PrecisionMode::Minutes,
        }
    }

    /// Motion trigger: restart the per-second window
    pub fn trigger(&mut self) {
        self.schedule(true);
    }

    /// Account for one delivered tick
    pub fn on_tick(&mut self) {
        if self.unit == TickUnit::Second {
            self.countdown = self.countdown.saturating_sub(1);
            if self.countdown == 0 {
                self.schedule(false);
            }
        }
    }

    /// Whether `now` starts a new tick at the current granularity
    ///
    /// The first poll after startup or a granularity change resyncs the
    /// display without counting a tick, so a fresh window lasts
    /// `window_ticks` whole seconds.
    pub fn poll(&mut self, now: DateTime<Utc>) -> TickPoll {
        let slot = self.unit.slot(now);
        let outcome = match self.last_slot {
            None => TickPoll::Resync,
            Some(last) if last != slot => TickPoll::Tick,
            Some(_) => TickPoll::Idle,
        };
        self.last_slot = Some(slot);
        outcome
    }
}

/// Time snapshot plus tick policy, read by every redraw
#[derive(Debug, Clone)]
pub struct ClockState {
    snapshot: TimeSnapshot,
    scheduler: TickScheduler,
}

impl ClockState {
    pub fn new(snapshot: TimeSnapshot, window_ticks: u32) -> Self {
        Self {
            snapshot,
            scheduler: TickScheduler::new(window_ticks),
        }
    }

    pub fn snapshot(&self) -> &TimeSnapshot {
        &self.snapshot
    }

    pub fn scheduler(&self) -> &TickScheduler {
        &self.scheduler
    }

    /// Run the countdown, then store the fresh snapshot
    pub fn handle_tick(&mut self, snapshot: TimeSnapshot) {
        self.scheduler.on_tick();
        self.snapshot = snapshot;
    }

    /// Replace the snapshot without counting a tick (e.g. after a zone change)
    pub fn resync(&mut self, snapshot: TimeSnapshot) {
        self.snapshot = snapshot;
    }

    /// Tap or shake from the motion source
    pub fn handle_trigger(&mut self) {
        self.scheduler.trigger();
    }

    /// Poll the host clock and tick if a boundary was crossed
    ///
    /// Returns true when a redraw is due.
    pub fn poll(&mut self, now: DateTime<Utc>, snapshot: impl FnOnce() -> TimeSnapshot) -> bool {
        match self.scheduler.poll(now) {
            TickPoll::Idle => false,
            TickPoll::Resync => {
                self.resync(snapshot());
                true
            }
            TickPoll::Tick => {
                self.handle_tick(snapshot());
                true
            }
        }
    }

    pub fn point_count(&self) -> usize {
        self.scheduler.precision().point_count()
    }
}
