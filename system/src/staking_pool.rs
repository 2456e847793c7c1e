use std::fmt;

use primitives::*;
use serde::{Deserialize, Serialize};

use crate::errors::StakingError;

#[derive(Clone, Copy, Ord, PartialOrd, Eq, PartialEq, Hash, Serialize, Deserialize, Debug)]
pub enum PoolKind {
	TwoWeek,
	OneMonth,
}

impl PoolKind {
	pub const ALL: [PoolKind; 2] = [PoolKind::TwoWeek, PoolKind::OneMonth];

	pub fn as_str(&self) -> &'static str {
		match *self {
			PoolKind::TwoWeek => "Two week",
			PoolKind::OneMonth => "One month",
		}
	}

	pub fn default_lock_period(&self) -> TimeStamp {
		match *self {
			PoolKind::TwoWeek => 14 * SECONDS_PER_DAY,
			PoolKind::OneMonth => 30 * SECONDS_PER_DAY,
		}
	}
}

impl fmt::Display for PoolKind {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// A fixed-duration pool. `total_staked` only counts deposits that have not been withdrawn.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub struct StakingPool {
	pub kind: PoolKind,
	pub lock_period: TimeStamp,
	pub capacity: Balance,
	pub total_staked: Balance,
}

impl StakingPool {
	pub fn new(kind: PoolKind, lock_period: TimeStamp, capacity: Balance) -> StakingPool {
		StakingPool { kind, lock_period, capacity, total_staked: 0 }
	}

	pub fn remaining_capacity(&self) -> Balance {
		self.capacity.saturating_sub(self.total_staked)
	}

	pub fn release_time(&self, deposit_time: TimeStamp) -> TimeStamp {
		deposit_time.saturating_add(self.lock_period)
	}

	/// Checks that `amount` still fits under the capacity without touching the total
	pub fn ensure_capacity(&self, amount: Balance) -> Result<Balance, StakingError> {
		match self.total_staked.checked_add(amount) {
			Some(total) if total <= self.capacity => Ok(total),
			_ => Err(StakingError::PoolLimitExceeded {
				pool: self.kind,
				total_staked: self.total_staked,
				amount,
				capacity: self.capacity,
			}),
		}
	}

	pub fn try_reserve(&mut self, amount: Balance) -> Result<(), StakingError> {
		self.total_staked = self.ensure_capacity(amount)?;
		Ok(())
	}

	/// Returns principal of a withdrawn deposit. The amount always comes from an earlier
	/// reserve, so the subtraction cannot underflow for a consistent pool.
	pub fn release(&mut self, amount: Balance) {
		self.total_staked = self.total_staked.saturating_sub(amount);
	}
}

impl fmt::Display for StakingPool {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"StakingPool {{ kind: {}, lock_period: {}s, capacity: {}, total_staked: {} }}",
			self.kind, self.lock_period, self.capacity, self.total_staked,
		)
	}
}
