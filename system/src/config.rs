use anyhow::{anyhow, Error};
use primitives::*;
use serde::{Deserialize, Serialize};
use std::{fmt, fs::read_to_string, path::Path};

use crate::staking_pool::{PoolKind, StakingPool};

const DEFAULT_CUSTODY_ADDRESS: &str = "0x00000000000000000000000000000000000057a1";
const DEFAULT_MIN_STAKE: u64 = 1_000;
const DEFAULT_POOL_CAPACITY: u64 = 20_000_000;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct PoolConfig {
	/// Seconds a deposit stays locked
	pub lock_period: TimeStamp,
	/// Whole tokens
	pub capacity: u64,
}

impl PoolConfig {
	fn default_for(kind: PoolKind) -> Self {
		PoolConfig { lock_period: kind.default_lock_period(), capacity: DEFAULT_POOL_CAPACITY }
	}
}

/// Ledger configuration. Token amounts are whole tokens and get scaled by `10^decimals`.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct StakingConfig {
	#[serde(default = "default_decimals")]
	pub decimals: u8,
	#[serde(default = "default_min_stake")]
	pub min_stake: u64,
	#[serde(default = "default_custody_address")]
	pub custody_address: String,
	#[serde(default = "default_two_week")]
	pub two_week: PoolConfig,
	#[serde(default = "default_one_month")]
	pub one_month: PoolConfig,
}

fn default_decimals() -> u8 {
	DEFAULT_DECIMALS
}

fn default_min_stake() -> u64 {
	DEFAULT_MIN_STAKE
}

fn default_custody_address() -> String {
	DEFAULT_CUSTODY_ADDRESS.to_string()
}

fn default_two_week() -> PoolConfig {
	PoolConfig::default_for(PoolKind::TwoWeek)
}

fn default_one_month() -> PoolConfig {
	PoolConfig::default_for(PoolKind::OneMonth)
}

impl Default for StakingConfig {
	fn default() -> Self {
		StakingConfig {
			decimals: default_decimals(),
			min_stake: default_min_stake(),
			custody_address: default_custody_address(),
			two_week: default_two_week(),
			one_month: default_one_month(),
		}
	}
}

/// Scales whole tokens to base units. `None` on overflow.
pub fn to_base_units(tokens: u64, decimals: u8) -> Option<Balance> {
	10u128.checked_pow(decimals as u32)?.checked_mul(tokens as Balance)
}

pub fn parse_address(value: &str) -> Result<Address, Error> {
	let value = value.strip_prefix("0x").unwrap_or(value);
	let bytes = hex::decode(value)
		.map_err(|e| anyhow!("Can't create address from string {}: {}", value, e))?;
	<Address>::try_from(bytes)
		.map_err(|v| anyhow!("Address must be 20 bytes, got {}", v.len()))
}

impl StakingConfig {
	pub fn load(config_path: &Path) -> Result<StakingConfig, Error> {
		let config = match read_to_string(config_path) {
			Ok(contents) => Self::from_toml_str(&contents).map_err(|e| {
				anyhow!("Could not parse '{}': {:?}", config_path.to_string_lossy(), e)
			})?,
			Err(e) =>
				return Err(anyhow!("Could not read '{}': {:?}", config_path.to_string_lossy(), e)),
		};
		log::info!("Loaded staking config from {}", config_path.to_string_lossy());
		Ok(config)
	}

	pub fn from_toml_str(contents: &str) -> Result<StakingConfig, Error> {
		let config = toml::from_str::<StakingConfig>(contents)?;
		config.validate()?;
		Ok(config)
	}

	pub fn pool_config(&self, kind: PoolKind) -> &PoolConfig {
		match kind {
			PoolKind::TwoWeek => &self.two_week,
			PoolKind::OneMonth => &self.one_month,
		}
	}

	pub fn min_stake_units(&self) -> Result<Balance, Error> {
		to_base_units(self.min_stake, self.decimals)
			.ok_or(anyhow!("Minimum stake overflows with {} decimals", self.decimals))
	}

	pub fn custody_address(&self) -> Result<Address, Error> {
		parse_address(&self.custody_address)
	}

	/// Builds empty pools from the configured lock periods and capacities
	pub fn pools(&self) -> Result<Vec<StakingPool>, Error> {
		PoolKind::ALL
			.iter()
			.map(|kind| -> Result<StakingPool, Error> {
				let pool_config = self.pool_config(*kind);
				let capacity = to_base_units(pool_config.capacity, self.decimals).ok_or(anyhow!(
					"{} pool capacity overflows with {} decimals",
					kind,
					self.decimals
				))?;
				Ok(StakingPool::new(*kind, pool_config.lock_period, capacity))
			})
			.collect()
	}

	pub fn validate(&self) -> Result<(), Error> {
		if self.min_stake == 0 {
			return Err(anyhow!("Minimum stake must be greater than zero"))
		}
		self.min_stake_units()?;
		self.custody_address()?;
		for kind in PoolKind::ALL {
			let pool_config = self.pool_config(kind);
			if pool_config.lock_period == 0 {
				return Err(anyhow!("{} pool lock period must be greater than zero", kind))
			}
			if pool_config.capacity == 0 {
				return Err(anyhow!("{} pool capacity must be greater than zero", kind))
			}
			if pool_config.capacity < self.min_stake {
				return Err(anyhow!(
					"{} pool capacity {} is below the minimum stake {}",
					kind,
					pool_config.capacity,
					self.min_stake
				))
			}
		}
		self.pools()?;
		Ok(())
	}
}

impl fmt::Display for StakingConfig {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "{:?}", self)
	}
}
