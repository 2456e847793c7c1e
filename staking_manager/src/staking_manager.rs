use anyhow::Error;
use primitives::*;
use staking::staking_state::StakingState;
use std::sync::Arc;
use system::{
	config::StakingConfig,
	errors::StakingError,
	stake_record::StakeRecord,
	staking_pool::{PoolKind, StakingPool},
};
use tokio::sync::Mutex;
use traits::{AssetTransfer, Clock};

/// Time-locked staking ledger.
///
/// All state sits behind one mutex that is held from validation through the asset transfer
/// to the commit, so every `stake` / `un_stake` call is a single indivisible transition.
pub struct StakingManager {
	custody_address: Address,
	min_stake: Balance,
	asset: Arc<dyn AssetTransfer>,
	clock: Arc<dyn Clock>,
	state: Mutex<StakingState>,
}

impl StakingManager {
	/// Creates a ledger with empty pools
	pub fn new(
		config: &StakingConfig,
		asset: Arc<dyn AssetTransfer>,
		clock: Arc<dyn Clock>,
	) -> Result<StakingManager, Error> {
		config.validate()?;
		let state = StakingState::new(config.pools()?)?;
		StakingManager::with_state(config, state, asset, clock)
	}

	/// Resumes a ledger from existing state, e.g. one returned by `StakingState::restore`.
	/// Pool capacities and lock periods come from `state`, not from `config`.
	pub fn with_state(
		config: &StakingConfig,
		state: StakingState,
		asset: Arc<dyn AssetTransfer>,
		clock: Arc<dyn Clock>,
	) -> Result<StakingManager, Error> {
		config.validate()?;
		let manager = StakingManager {
			custody_address: config.custody_address()?,
			min_stake: config.min_stake_units()?,
			asset,
			clock,
			state: Mutex::new(state),
		};
		log::info!(
			"Staking ledger ready: custody 0x{}, min stake {}",
			hex::encode(manager.custody_address),
			manager.min_stake
		);
		Ok(manager)
	}

	/// Calls when an account stakes into a pool
	/// `staker` is the address of the account which is staking
	/// `pool` is the pool the deposit is locked in
	/// `amount` is the amount of tokens to be staked, in base units
	///
	/// Returns the index of the new deposit in the staker's sequence.
	pub async fn stake(
		&self,
		staker: &Address,
		pool: PoolKind,
		amount: Balance,
	) -> Result<StakeIndex, StakingError> {
		if amount == 0 || amount < self.min_stake {
			let err = StakingError::InvalidAmount { amount, min_stake: self.min_stake };
			log::warn!("Stake rejected for 0x{}: {}", hex::encode(staker), err);
			return Err(err)
		}

		let mut state = self.state.lock().await;
		if let Err(err) = state.ensure_capacity(pool, amount) {
			log::warn!("Stake rejected for 0x{}: {}", hex::encode(staker), err);
			return Err(err)
		}

		let available = self.asset.balance_of(staker).await.map_err(|e| {
			log::error!("Stake: Error fetching balance of 0x{} - {}", hex::encode(staker), e);
			e
		})?;
		if available < amount {
			let err =
				StakingError::InsufficientBalance { address: *staker, available, required: amount };
			log::warn!("Stake rejected for 0x{}: {}", hex::encode(staker), err);
			return Err(err)
		}

		// The database updates need to happen only if the transfer is successful
		self.asset
			.transfer_from(&self.custody_address, staker, &self.custody_address, amount)
			.await
			.map_err(|e| {
				log::error!(
					"Stake: Error transferring {} from 0x{} to custody - {}",
					amount,
					hex::encode(staker),
					e
				);
				e
			})?;

		let now = self.clock.now();
		let release_time = state.get_staking_pool(pool).release_time(now);
		// capacity was checked under the same lock, so the reserve cannot fail here
		let index = state.insert_stake(StakeRecord::new(*staker, pool, amount, now, release_time))?;

		log::info!(
			"Staked {} into {} pool for 0x{} at index {}, releases at {}",
			amount,
			pool,
			hex::encode(staker),
			index,
			release_time
		);
		Ok(index)
	}

	pub async fn two_week_stake(
		&self,
		staker: &Address,
		amount: Balance,
	) -> Result<StakeIndex, StakingError> {
		self.stake(staker, PoolKind::TwoWeek, amount).await
	}

	pub async fn one_month_stake(
		&self,
		staker: &Address,
		amount: Balance,
	) -> Result<StakeIndex, StakingError> {
		self.stake(staker, PoolKind::OneMonth, amount).await
	}

	/// Calls when an account withdraws a matured deposit.
	///
	/// Checks run in order: index bounds, settlement, maturity. The principal is paid out
	/// before the deposit is marked withdrawn; a failed payout leaves the deposit untouched.
	pub async fn un_stake(
		&self,
		staker: &Address,
		index: StakeIndex,
	) -> Result<Balance, StakingError> {
		let mut state = self.state.lock().await;
		let now = self.clock.now();
		let principal = match state.ensure_withdrawable(staker, index, now) {
			Ok(record) => record.principal,
			Err(err) => {
				log::warn!("Un-stake rejected for 0x{}: {}", hex::encode(staker), err);
				return Err(err)
			},
		};

		self.asset.transfer(&self.custody_address, staker, principal).await.map_err(|e| {
			log::error!(
				"Un-stake: Error transferring {} from custody to 0x{} - {}",
				principal,
				hex::encode(staker),
				e
			);
			e
		})?;

		let record = state.mark_withdrawn(staker, index)?;
		log::info!(
			"Un-staked {} from {} pool for 0x{} at index {}",
			record.principal,
			record.pool,
			hex::encode(staker),
			index
		);
		Ok(record.principal)
	}

	/// Number of deposits ever made by `staker`, withdrawn ones included
	pub async fn get_stake_count(&self, staker: &Address) -> usize {
		self.state.lock().await.get_stake_count(staker)
	}

	/// Principal still held for `staker`: locked deposits plus matured ones not yet claimed
	pub async fn total_stake_by_address(&self, staker: &Address) -> Balance {
		self.state.lock().await.total_stake_by_address(staker)
	}

	pub async fn get_stake(
		&self,
		staker: &Address,
		index: StakeIndex,
	) -> Result<StakeRecord, StakingError> {
		self.state.lock().await.get_stake(staker, index).cloned()
	}

	pub async fn get_stakes(&self, staker: &Address) -> Vec<StakeRecord> {
		self.state.lock().await.get_stakes(staker).to_vec()
	}

	pub async fn get_staking_pool(&self, pool: PoolKind) -> StakingPool {
		self.state.lock().await.get_staking_pool(pool).clone()
	}

	pub async fn total_staked(&self, pool: PoolKind) -> Balance {
		self.state.lock().await.get_staking_pool(pool).total_staked
	}

	pub async fn get_all_pool_stakers(&self, pool: PoolKind) -> Vec<Address> {
		self.state.lock().await.get_all_pool_stakers(pool)
	}

	pub fn custody_address(&self) -> Address {
		self.custody_address
	}

	pub fn min_stake(&self) -> Balance {
		self.min_stake
	}

	/// Balance of the custody account as reported by the asset
	pub async fn custody_balance(&self) -> Result<Balance, StakingError> {
		Ok(self.asset.balance_of(&self.custody_address).await?)
	}

	pub async fn snapshot(&self) -> Result<Vec<u8>, Error> {
		self.state.lock().await.snapshot()
	}
}
