use anyhow::{anyhow, Error};
use primitives::*;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeSet, HashMap};
use system::{
	errors::StakingError,
	stake_record::StakeRecord,
	staking_pool::{PoolKind, StakingPool},
};

/// Pool table and per-staker deposit sequences.
///
/// Deposits are never removed: a staker addresses a deposit by its position in their own
/// sequence, so the sequence only ever grows.
#[derive(Debug, Clone, PartialEq)]
pub struct StakingState {
	two_week: StakingPool,
	one_month: StakingPool,
	stakes: HashMap<Address, Vec<StakeRecord>>,
}

#[derive(Serialize, Deserialize)]
struct StakingSnapshot {
	pools: Vec<StakingPool>,
	stakes: Vec<(Address, Vec<StakeRecord>)>,
}

impl StakingState {
	/// Creates an empty ledger. Exactly one pool of each kind is required.
	pub fn new(pools: Vec<StakingPool>) -> Result<Self, Error> {
		let mut two_week = None;
		let mut one_month = None;
		for pool in pools {
			let slot = match pool.kind {
				PoolKind::TwoWeek => &mut two_week,
				PoolKind::OneMonth => &mut one_month,
			};
			if slot.is_some() {
				return Err(anyhow!("Duplicate {} pool", pool.kind))
			}
			*slot = Some(pool);
		}
		let two_week = two_week.ok_or(anyhow!("Missing {} pool", PoolKind::TwoWeek))?;
		let one_month = one_month.ok_or(anyhow!("Missing {} pool", PoolKind::OneMonth))?;
		Ok(StakingState { two_week, one_month, stakes: HashMap::new() })
	}

	/// Returns an existing Staking Pool
	pub fn get_staking_pool(&self, kind: PoolKind) -> &StakingPool {
		match kind {
			PoolKind::TwoWeek => &self.two_week,
			PoolKind::OneMonth => &self.one_month,
		}
	}

	fn get_staking_pool_mut(&mut self, kind: PoolKind) -> &mut StakingPool {
		match kind {
			PoolKind::TwoWeek => &mut self.two_week,
			PoolKind::OneMonth => &mut self.one_month,
		}
	}

	pub fn ensure_capacity(&self, kind: PoolKind, amount: Balance) -> Result<(), StakingError> {
		self.get_staking_pool(kind).ensure_capacity(amount).map(|_| ())
	}

	pub fn try_reserve(&mut self, kind: PoolKind, amount: Balance) -> Result<(), StakingError> {
		self.get_staking_pool_mut(kind).try_reserve(amount)
	}

	pub fn release(&mut self, kind: PoolKind, amount: Balance) {
		self.get_staking_pool_mut(kind).release(amount)
	}

	/// Reserves the record's principal in its pool and appends it to the owner's sequence.
	/// Nothing is stored when the pool is full.
	pub fn insert_stake(&mut self, record: StakeRecord) -> Result<StakeIndex, StakingError> {
		self.try_reserve(record.pool, record.principal)?;
		let stakes = self.stakes.entry(record.owner).or_default();
		stakes.push(record);
		Ok(stakes.len() - 1)
	}

	pub fn get_stake(&self, staker: &Address, index: StakeIndex) -> Result<&StakeRecord, StakingError> {
		let stakes = self.get_stakes(staker);
		stakes
			.get(index)
			.ok_or(StakingError::IndexOutOfBound { index, count: stakes.len() })
	}

	/// Checks, in order, that the index exists, the deposit is unsettled and it has matured
	pub fn ensure_withdrawable(
		&self,
		staker: &Address,
		index: StakeIndex,
		now: TimeStamp,
	) -> Result<&StakeRecord, StakingError> {
		let record = self.get_stake(staker, index)?;
		if record.withdrawn {
			return Err(StakingError::AlreadyWithdrawn { index })
		}
		if !record.is_matured(now) {
			return Err(StakingError::NotMatured { index, release_time: record.release_time, now })
		}
		Ok(record)
	}

	/// Settles a deposit and gives its principal back to the pool's capacity
	pub fn mark_withdrawn(
		&mut self,
		staker: &Address,
		index: StakeIndex,
	) -> Result<StakeRecord, StakingError> {
		let count = self.get_stake_count(staker);
		let record = self
			.stakes
			.get_mut(staker)
			.and_then(|stakes| stakes.get_mut(index))
			.ok_or(StakingError::IndexOutOfBound { index, count })?;
		if record.withdrawn {
			return Err(StakingError::AlreadyWithdrawn { index })
		}
		record.withdrawn = true;
		let record = record.clone();
		self.release(record.pool, record.principal);
		Ok(record)
	}

	pub fn get_stakes(&self, staker: &Address) -> &[StakeRecord] {
		self.stakes.get(staker).map(|stakes| stakes.as_slice()).unwrap_or(&[])
	}

	pub fn get_stake_count(&self, staker: &Address) -> usize {
		self.get_stakes(staker).len()
	}

	/// Sum of principal over the staker's deposits that have not been withdrawn
	pub fn total_stake_by_address(&self, staker: &Address) -> Balance {
		self.get_stakes(staker)
			.iter()
			.filter(|record| record.is_active())
			.fold(0, |total: Balance, record| total.saturating_add(record.principal))
	}

	/// Returns every staker holding at least one active deposit in the pool, sorted.
	pub fn get_all_pool_stakers(&self, kind: PoolKind) -> Vec<Address> {
		self.stakes
			.iter()
			.filter(|(_, stakes)| {
				stakes.iter().any(|record| record.pool == kind && record.is_active())
			})
			.map(|(staker, _)| *staker)
			.collect::<BTreeSet<_>>()
			.into_iter()
			.collect()
	}

	pub fn snapshot(&self) -> Result<Vec<u8>, Error> {
		let mut stakes: Vec<(Address, Vec<StakeRecord>)> =
			self.stakes.iter().map(|(staker, records)| (*staker, records.clone())).collect();
		stakes.sort_by(|a, b| a.0.cmp(&b.0));
		let snapshot = StakingSnapshot {
			pools: vec![self.two_week.clone(), self.one_month.clone()],
			stakes,
		};
		bincode::serialize(&snapshot).map_err(|e| anyhow!("Failed to serialize staking state {:?}", e))
	}

	/// Rebuilds a ledger from `snapshot`. Pool totals are recomputed from the active
	/// deposits rather than trusted.
	pub fn restore(snapshot: &[u8]) -> Result<Self, Error> {
		let snapshot: StakingSnapshot = bincode::deserialize(snapshot)
			.map_err(|e| anyhow!("Failed to deserialize staking state {:?}", e))?;
		let pools = snapshot
			.pools
			.into_iter()
			.map(|pool| StakingPool { total_staked: 0, ..pool })
			.collect();
		let mut state = StakingState::new(pools)?;

		for (staker, records) in snapshot.stakes {
			for record in records.iter() {
				if record.owner != staker {
					return Err(anyhow!(
						"Stake owned by {} filed under {}",
						hex::encode(record.owner),
						hex::encode(staker)
					))
				}
				if record.is_active() {
					state
						.try_reserve(record.pool, record.principal)
						.map_err(|e| anyhow!("Inconsistent staking snapshot - {}", e))?;
				}
			}
			if state.stakes.insert(staker, records).is_some() {
				return Err(anyhow!("Duplicate stakes for {}", hex::encode(staker)))
			}
		}
		log::info!(
			"Restored staking state: {} stakers, {} / {}",
			state.stakes.len(),
			state.two_week,
			state.one_month
		);
		Ok(state)
	}
}
