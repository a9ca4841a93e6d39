//! Rolling majority-vote aggregator for live classification streams.
//!
//! Process-lifetime state owned by one object: frequency counts over the
//! current interval, the interval start, and the label reported for the
//! last completed interval. All mutation goes through [`TimeWindowAggregator::record_frame`];
//! {increment, flush-check, reset} run inside a single critical section so
//! concurrent callers can never reset the same interval twice.

use crate::classify::detection::Detection;
use crate::classify::filter::AllowListFilter;
use crate::defaults;
use crate::stream::clock::{Clock, SystemClock};
use std::sync::{Mutex, MutexGuard, RwLock};
use std::time::{Duration, Instant};

/// Configuration for the streaming aggregator.
#[derive(Debug, Clone)]
pub struct AggregatorConfig {
    /// Minimum confidence for a detection to be counted.
    pub confidence_threshold: f64,
    /// Length of one aggregation interval.
    pub flush_interval: Duration,
    /// Labels that are countable; anything else is ignored.
    pub recognized_labels: Vec<String>,
}

impl Default for AggregatorConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: defaults::STREAM_CONFIDENCE_THRESHOLD,
            flush_interval: defaults::FLUSH_INTERVAL,
            recognized_labels: defaults::recognized_labels(),
        }
    }
}

/// Counter state for the in-progress interval.
///
/// Counts keep first-occurrence order so flush tie-breaks are deterministic.
struct WindowState {
    counts: Vec<(String, u32)>,
    window_start: Instant,
}

/// Streaming majority-vote aggregator.
///
/// `record_frame` both mutates the interval state and returns the label of
/// the last completed interval; `current_label` reads the reported label
/// without contending with the counting lock.
pub struct TimeWindowAggregator<C: Clock = SystemClock> {
    filter: AllowListFilter,
    flush_interval: Duration,
    state: Mutex<WindowState>,
    last_reported: RwLock<String>,
    clock: C,
}

impl TimeWindowAggregator<SystemClock> {
    /// Creates an aggregator with the given configuration using the system clock.
    pub fn new(config: AggregatorConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> TimeWindowAggregator<C> {
    /// Creates an aggregator with a custom clock (for deterministic testing).
    pub fn with_clock(config: AggregatorConfig, clock: C) -> Self {
        let window_start = clock.now();
        Self {
            filter: AllowListFilter::new(
                config.recognized_labels,
                config.confidence_threshold,
            ),
            flush_interval: config.flush_interval,
            state: Mutex::new(WindowState {
                counts: Vec::new(),
                window_start,
            }),
            last_reported: RwLock::new(defaults::WAITING_LABEL.to_string()),
            clock,
        }
    }

    /// Records one frame's detections and returns the currently reported label.
    ///
    /// Every admitted detection increments its label's count; a frame with
    /// several admitted detections contributes several counts. After
    /// counting, the elapsed interval is checked and flushed at most once.
    /// The returned label always describes the last completed interval, not
    /// the one in progress.
    pub fn record_frame(&self, detections: &[Detection]) -> String {
        // Admission happens before the critical section; only count updates
        // and the flush decision hold the lock.
        let admitted: Vec<&str> = self.filter.admitted(detections).collect();

        let mut state = lock_state(&self.state);
        for label in admitted {
            match state.counts.iter_mut().find(|(l, _)| l == label) {
                Some((_, count)) => *count += 1,
                None => state.counts.push((label.to_string(), 1)),
            }
        }

        let now = self.clock.now();
        if now.duration_since(state.window_start) >= self.flush_interval {
            self.flush(&mut state, now);
        }
        drop(state);

        self.current_label()
    }

    /// Returns the label reported for the last completed interval.
    pub fn current_label(&self) -> String {
        match self.last_reported.read() {
            Ok(label) => label.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    /// Number of detections counted so far in the in-progress interval.
    pub fn pending_detections(&self) -> u64 {
        let state = lock_state(&self.state);
        state.counts.iter().map(|(_, c)| u64::from(*c)).sum()
    }

    /// Completes the current interval: report the winner, clear counts,
    /// advance the window start.
    fn flush(&self, state: &mut WindowState, now: Instant) {
        let winner = state
            .counts
            .iter()
            .fold(None::<(&str, u32)>, |best, (label, count)| match best {
                // Strict comparison keeps the first-recorded label on ties.
                Some((_, best_count)) if *count > best_count => Some((label.as_str(), *count)),
                None => Some((label.as_str(), *count)),
                _ => best,
            });

        let reported = match winner {
            Some((label, _)) => label.to_string(),
            None => defaults::NO_DETECTION_LABEL.to_string(),
        };

        match self.last_reported.write() {
            Ok(mut guard) => *guard = reported,
            Err(poisoned) => *poisoned.into_inner() = reported,
        }

        state.counts.clear();
        state.window_start = now;
    }
}

fn lock_state(state: &Mutex<WindowState>) -> MutexGuard<'_, WindowState> {
    match state.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    }
}
