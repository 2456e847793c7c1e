use primitives::{Address, Balance, StakeIndex, TimeStamp};
use serde::Serialize;

use crate::staking_pool::PoolKind;

/// Failures reported by the asset transfer service. The ledger passes these through untouched.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum TransferError {
	#[error("Insufficient balance, address {}: available {available}, required {required}", hex::encode(.address))]
	InsufficientBalance { address: Address, available: Balance, required: Balance },
	#[error(
		"Insufficient allowance, owner {} spender {}: allowance {allowance}, required {required}",
		hex::encode(.owner),
		hex::encode(.spender)
	)]
	InsufficientAllowance {
		owner: Address,
		spender: Address,
		allowance: Balance,
		required: Balance,
	},
	#[error("balance overflow, address {}", hex::encode(.address))]
	Overflow { address: Address },
	#[error("transfer service unavailable: {0}")]
	Unavailable(String),
}

#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq, Serialize)]
pub enum StakingError {
	// request errors
	#[error("Stake amount invalid: {amount} is below the minimum stake of {min_stake}")]
	InvalidAmount { amount: Balance, min_stake: Balance },
	#[error("{pool} pool limit reached: staked {total_staked} + {amount} exceeds capacity {capacity}")]
	PoolLimitExceeded { pool: PoolKind, total_staked: Balance, amount: Balance, capacity: Balance },
	#[error("Insufficient balance, address {}: available {available}, required {required}", hex::encode(.address))]
	InsufficientBalance { address: Address, available: Balance, required: Balance },
	// withdrawal errors
	#[error("Index out of bound: {index} (stake count {count})")]
	IndexOutOfBound { index: StakeIndex, count: usize },
	#[error("You can not unstake before release date: stake {index} releases at {release_time}, now {now}")]
	NotMatured { index: StakeIndex, release_time: TimeStamp, now: TimeStamp },
	#[error("Stake {index} has already been withdrawn")]
	AlreadyWithdrawn { index: StakeIndex },
	// collaborator errors
	#[error(transparent)]
	Transfer(#[from] TransferError),
}
