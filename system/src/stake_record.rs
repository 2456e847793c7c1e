use std::fmt;

use primitives::*;
use serde::{Deserialize, Serialize};

use crate::staking_pool::PoolKind;

/// One deposit. Only `withdrawn` changes after creation, and only from `false` to `true`.
#[derive(Clone, Eq, PartialEq, Serialize, Deserialize, Debug)]
pub struct StakeRecord {
	pub owner: Address,
	pub pool: PoolKind,
	pub principal: Balance,
	pub deposit_time: TimeStamp,
	pub release_time: TimeStamp,
	pub withdrawn: bool,
}

impl StakeRecord {
	pub fn new(
		owner: Address,
		pool: PoolKind,
		principal: Balance,
		deposit_time: TimeStamp,
		release_time: TimeStamp,
	) -> StakeRecord {
		StakeRecord { owner, pool, principal, deposit_time, release_time, withdrawn: false }
	}

	pub fn is_matured(&self, now: TimeStamp) -> bool {
		now >= self.release_time
	}

	pub fn is_active(&self) -> bool {
		!self.withdrawn
	}
}

impl fmt::Display for StakeRecord {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(
			f,
			"StakeRecord {{ owner: 0x{}, pool: {}, principal: {}, deposit_time: {}, release_time: {}, withdrawn: {} }}",
			hex::encode(self.owner),
			self.pool,
			self.principal,
			self.deposit_time,
			self.release_time,
			self.withdrawn,
		)
	}
}
