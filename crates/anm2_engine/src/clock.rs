//! Monotonic time sources for frame pacing.

use std::{
	cell::Cell,
	rc::Rc,
	time::{Duration, Instant},
};

/// A monotonic clock.
///
/// `now` is measured from an arbitrary origin fixed when the clock is created;
/// only differences between readings are meaningful.
pub trait Clock {
	/// Current reading.
	fn now(&self) -> Duration;
}

/// Wall clock backed by [`Instant`].
#[derive(Debug, Clone, Copy)]
pub struct SystemClock {
	origin: Instant,
}

impl Default for SystemClock {
	fn default() -> Self {
		Self {
			origin: Instant::now(),
		}
	}
}

impl Clock for SystemClock {
	fn now(&self) -> Duration {
		self.origin.elapsed()
	}
}

/// A clock that only moves when told to.
///
/// Clones share the same reading, so a test can keep one handle while the
/// engine owns another.
///
/// # Examples
///
/// ```
/// use std::time::Duration;
/// use anm2_engine::clock::{Clock, ManualClock};
///
/// let clock = ManualClock::default();
/// let handle = clock.clone();
/// handle.advance(Duration::from_millis(40));
/// assert_eq!(clock.now(), Duration::from_millis(40));
/// ```
#[derive(Debug, Clone, Default)]
pub struct ManualClock {
	now: Rc<Cell<Duration>>,
}

impl ManualClock {
	/// Moves the clock forward.
	pub fn advance(&self, by: Duration) {
		self.now.set(self.now.get().saturating_add(by));
	}

	/// Moves the clock forward by `frames` frames at `fps`, rounding up to the next nanosecond.
	pub fn advance_frames(&self, frames: u32, fps: u32) {
		let nanos = (u64::from(frames) * 1_000_000_000).div_ceil(u64::from(fps.max(1)));
		self.advance(Duration::from_nanos(nanos));
	}

	/// Sets the reading.
	pub fn set(&self, now: Duration) {
		self.now.set(now);
	}
}

impl Clock for ManualClock {
	fn now(&self) -> Duration {
		self.now.get()
	}
}
