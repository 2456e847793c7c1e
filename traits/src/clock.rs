use primitives::TimeStamp;
use std::{
	sync::atomic::{AtomicU64, Ordering},
	time::{SystemTime, UNIX_EPOCH},
};

pub trait Clock: Send + Sync {
	/// Current time in seconds since the UNIX epoch
	fn now(&self) -> TimeStamp;
}

#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
	fn now(&self) -> TimeStamp {
		SystemTime::now().duration_since(UNIX_EPOCH).map(|d| d.as_secs()).unwrap_or(0)
	}
}

/// Clock that only moves when told to
#[derive(Debug, Default)]
pub struct ManualClock {
	now: AtomicU64,
}

impl ManualClock {
	pub fn new(start: TimeStamp) -> ManualClock {
		ManualClock { now: AtomicU64::new(start) }
	}

	pub fn set(&self, now: TimeStamp) {
		self.now.store(now, Ordering::SeqCst);
	}

	/// Moves the clock forward and returns the new time
	pub fn advance(&self, seconds: TimeStamp) -> TimeStamp {
		let mut current = self.now.load(Ordering::SeqCst);
		loop {
			let next = current.saturating_add(seconds);
			match self.now.compare_exchange(current, next, Ordering::SeqCst, Ordering::SeqCst) {
				Ok(_) => return next,
				Err(actual) => current = actual,
			}
		}
	}
}

impl Clock for ManualClock {
	fn now(&self) -> TimeStamp {
		self.now.load(Ordering::SeqCst)
	}
}
