use crate::account_state::AccountState;
use async_trait::async_trait;
use primitives::{Address, Balance};
use system::errors::TransferError;
use tokio::sync::RwLock;
use traits::AssetTransfer;

/// In-memory fungible asset with ERC-20 style allowances.
#[derive(Debug, Default)]
pub struct AccountManager {
	state: RwLock<AccountState>,
}

impl AccountManager {
	/// Creates an empty asset with no supply.
	pub fn new() -> AccountManager {
		AccountManager::default()
	}

	/// Mints (increases) the balance of `to` by the specified amount.
	///
	/// # Arguments
	///
	/// * `to` - The account receiving the new units.
	/// * `amount` - The amount to mint.
	///
	/// # Returns
	///
	/// Returns `Ok(())` if the minting operation is successful, or `TransferError::Overflow` if
	/// either the balance or the total supply would overflow.
	pub async fn mint(&self, to: &Address, amount: Balance) -> Result<(), TransferError> {
		let mut state = self.state.write().await;
		state.mint(to, amount)?;
		log::debug!("Minted {} to {}", amount, hex::encode(to));
		Ok(())
	}

	/// Authorizes `spender` to move up to `amount` out of `owner`. Replaces any previous
	/// allowance.
	pub async fn approve(&self, owner: &Address, spender: &Address, amount: Balance) {
		let mut state = self.state.write().await;
		state.set_allowance(owner, spender, amount);
	}

	pub async fn allowance(&self, owner: &Address, spender: &Address) -> Balance {
		self.state.read().await.get_allowance(owner, spender)
	}

	pub async fn get_balance(&self, address: &Address) -> Balance {
		self.state.read().await.get_balance(address)
	}

	pub async fn total_supply(&self) -> Balance {
		self.state.read().await.total_supply()
	}
}

#[async_trait]
impl AssetTransfer for AccountManager {
	async fn balance_of(&self, account: &Address) -> Result<Balance, TransferError> {
		Ok(self.get_balance(account).await)
	}

	/// Transfers funds from `from` to `to`.
	///
	/// # Arguments
	///
	/// * `from` - The account being debited.
	/// * `to` - The address of the recipient account.
	/// * `amount` - The amount of funds to transfer.
	///
	/// # Returns
	///
	/// * `Result<(), TransferError>` - `InsufficientBalance` when `from` cannot cover `amount`.
	async fn transfer(
		&self,
		from: &Address,
		to: &Address,
		amount: Balance,
	) -> Result<(), TransferError> {
		let mut state = self.state.write().await;
		state.move_balance(from, to, amount)
	}

	/// Transfers funds out of `owner` using the allowance granted to `spender`. The allowance
	/// is checked before the balance and only consumed once the balance has moved.
	async fn transfer_from(
		&self,
		spender: &Address,
		owner: &Address,
		to: &Address,
		amount: Balance,
	) -> Result<(), TransferError> {
		let mut state = self.state.write().await;
		let allowance = state.get_allowance(owner, spender);
		if allowance < amount {
			return Err(TransferError::InsufficientAllowance {
				owner: *owner,
				spender: *spender,
				allowance,
				required: amount,
			})
		}
		state.move_balance(owner, to, amount)?;
		state.set_allowance(owner, spender, allowance - amount);
		Ok(())
	}
}
