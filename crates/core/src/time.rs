use std::sync::{Arc, Mutex, PoisonError};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};

/// Point in time captured by a [`Clock`], measured from the clock's origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Mark(Duration);

/// A clock abstraction for deterministic time in services and tests.
///
/// `Default` reads the system clock. `Manual` starts at a fixed timestamp and only
/// moves when [`Clock::advance`] is called; clones share the same offset, so a test can
/// hold one handle while the code under test reads another.
#[derive(Debug, Clone)]
pub enum Clock {
    Default { origin: Instant },
    Manual { base: DateTime<Utc>, offset: Arc<Mutex<Duration>> },
}

impl Default for Clock {
    fn default() -> Self {
        Self::default_clock()
    }
}

impl Clock {
    /// Returns a clock that uses the current system time.
    #[must_use]
    pub fn default_clock() -> Self {
        Self::Default {
            origin: Instant::now(),
        }
    }

    /// Returns a manual clock fixed at the given timestamp.
    #[must_use]
    pub fn fixed(at: DateTime<Utc>) -> Self {
        Self::Manual {
            base: at,
            offset: Arc::new(Mutex::new(Duration::ZERO)),
        }
    }

    /// Returns the current wall-clock time according to the clock.
    #[must_use]
    pub fn now(&self) -> DateTime<Utc> {
        match self {
            Clock::Default { .. } => Utc::now(),
            Clock::Manual { base, offset } => {
                let offset = *offset.lock().unwrap_or_else(PoisonError::into_inner);
                chrono::Duration::from_std(offset)
                    .ok()
                    .and_then(|delta| base.checked_add_signed(delta))
                    .unwrap_or(*base)
            }
        }
    }

    /// Captures a monotonic mark.
    #[must_use]
    pub fn mark(&self) -> Mark {
        match self {
            Clock::Default { origin } => Mark(origin.elapsed()),
            Clock::Manual { offset, .. } => {
                Mark(*offset.lock().unwrap_or_else(PoisonError::into_inner))
            }
        }
    }

    /// Time elapsed between `start` and now. Never negative.
    #[must_use]
    pub fn elapsed_since(&self, start: Mark) -> Duration {
        self.mark().0.saturating_sub(start.0)
    }

    /// If this is a manual clock, advance it by the given duration.
    ///
    /// Has no effect on `Clock::Default`.
    pub fn advance(&self, delta: Duration) {
        if let Clock::Manual { offset, .. } = self {
            let mut guard = offset.lock().unwrap_or_else(PoisonError::into_inner);
            *guard = guard.saturating_add(delta);
        }
    }
}

/// Deterministic timestamp for tests and examples (2023-11-14T22:13:20Z).
pub const FIXED_TEST_TIMESTAMP: i64 = 1_700_000_000;

/// Returns a deterministic `DateTime<Utc>` for tests and doc examples.
///
/// # Panics
///
/// Panics if the fixed timestamp cannot be represented.
#[must_use]
pub fn fixed_now() -> DateTime<Utc> {
    DateTime::<Utc>::from_timestamp(FIXED_TEST_TIMESTAMP, 0)
        .expect("fixed timestamp should be valid")
}

/// Returns a manual `Clock` fixed at the deterministic test timestamp.
#[must_use]
pub fn fixed_clock() -> Clock {
    Clock::fixed(fixed_now())
}
