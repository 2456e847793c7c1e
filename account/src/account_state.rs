use primitives::{Address, Balance};
use std::collections::HashMap;
use system::errors::TransferError;

/// Balances and allowances of the in-memory asset.
///
/// Every mutation either applies fully or returns an error without touching any entry.
#[derive(Debug, Default, Clone)]
pub struct AccountState {
	balances: HashMap<Address, Balance>,
	allowances: HashMap<(Address, Address), Balance>,
	total_supply: Balance,
}

impl AccountState {
	pub fn new() -> AccountState {
		AccountState::default()
	}

	pub fn get_balance(&self, address: &Address) -> Balance {
		self.balances.get(address).copied().unwrap_or(0)
	}

	pub fn get_allowance(&self, owner: &Address, spender: &Address) -> Balance {
		self.allowances.get(&(*owner, *spender)).copied().unwrap_or(0)
	}

	pub fn total_supply(&self) -> Balance {
		self.total_supply
	}

	pub fn set_allowance(&mut self, owner: &Address, spender: &Address, amount: Balance) {
		if amount == 0 {
			self.allowances.remove(&(*owner, *spender));
		} else {
			self.allowances.insert((*owner, *spender), amount);
		}
	}

	pub fn mint(&mut self, to: &Address, amount: Balance) -> Result<(), TransferError> {
		let total_supply = self
			.total_supply
			.checked_add(amount)
			.ok_or(TransferError::Overflow { address: *to })?;
		let balance = self
			.get_balance(to)
			.checked_add(amount)
			.ok_or(TransferError::Overflow { address: *to })?;
		self.total_supply = total_supply;
		self.balances.insert(*to, balance);
		Ok(())
	}

	/// Moves `amount` from `from` to `to`
	pub fn move_balance(
		&mut self,
		from: &Address,
		to: &Address,
		amount: Balance,
	) -> Result<(), TransferError> {
		let from_balance = self.get_balance(from);
		let remaining = from_balance.checked_sub(amount).ok_or(
			TransferError::InsufficientBalance {
				address: *from,
				available: from_balance,
				required: amount,
			},
		)?;
		if from == to {
			return Ok(())
		}
		let to_balance = self
			.get_balance(to)
			.checked_add(amount)
			.ok_or(TransferError::Overflow { address: *to })?;

		self.balances.insert(*from, remaining);
		self.balances.insert(*to, to_balance);
		Ok(())
	}
}
