use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

pub const DEFAULT_PLAYOUTS: u64 = 1000;
pub const DEFAULT_MILLIS: u64 = 1000;

/// Shared search budget. Workers call `should_stop` before every playout.
pub trait StopCondition: Send + Sync {
    /// Start a new budget. Called once per search, before workers start.
    fn reset(&self);

    fn should_stop(&self) -> bool;

    /// Number of `should_stop` calls answered since the last reset.
    fn evaluations(&self) -> u64;
}

/// Stop once `max` playouts have been requested across all threads.
#[derive(Debug)]
pub struct StopByCount {
    max: u64,
    count: AtomicU64,
}

impl StopByCount {
    pub fn new(max: u64) -> Self {
        StopByCount {
            max,
            count: AtomicU64::new(0),
        }
    }

    pub fn max(&self) -> u64 {
        self.max
    }
}

impl Default for StopByCount {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYOUTS)
    }
}

impl StopCondition for StopByCount {
    fn reset(&self) {
        self.count.store(0, Ordering::Relaxed);
    }

    #[inline]
    fn should_stop(&self) -> bool {
        self.count.fetch_add(1, Ordering::Relaxed) + 1 >= self.max
    }

    fn evaluations(&self) -> u64 {
        self.count.load(Ordering::Relaxed)
    }
}

/// Stop once a wall-clock budget has elapsed since `reset`.
#[derive(Debug)]
pub struct StopByDuration {
    budget: Duration,
    origin: Instant,
    // Nanoseconds from `origin` to the last reset.
    started: AtomicU64,
    checks: AtomicU64,
}

impl StopByDuration {
    pub fn new(budget: Duration) -> Self {
        StopByDuration {
            budget,
            origin: Instant::now(),
            started: AtomicU64::new(0),
            checks: AtomicU64::new(0),
        }
    }

    pub fn from_millis(millis: u64) -> Self {
        Self::new(Duration::from_millis(millis))
    }

    pub fn budget(&self) -> Duration {
        self.budget
    }

    fn nanos_since_origin(&self) -> u64 {
        u64::try_from(self.origin.elapsed().as_nanos()).unwrap_or(u64::MAX)
    }
}

impl Default for StopByDuration {
    fn default() -> Self {
        Self::from_millis(DEFAULT_MILLIS)
    }
}

impl StopCondition for StopByDuration {
    fn reset(&self) {
        self.checks.store(0, Ordering::Relaxed);
        self.started
            .store(self.nanos_since_origin(), Ordering::Release);
    }

    #[inline]
    fn should_stop(&self) -> bool {
        self.checks.fetch_add(1, Ordering::Relaxed);
        let started = self.started.load(Ordering::Acquire);
        let elapsed = self.nanos_since_origin().saturating_sub(started);
        elapsed >= u64::try_from(self.budget.as_nanos()).unwrap_or(u64::MAX)
    }

    fn evaluations(&self) -> u64 {
        self.checks.load(Ordering::Relaxed)
    }
}
