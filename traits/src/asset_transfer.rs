use async_trait::async_trait;
use primitives::*;
use system::errors::TransferError;

/// Moves units of the staked asset between accounts.
///
/// The staking ledger only ever calls `transfer` from its custody account and
/// `transfer_from` into it; any failure is reported back to the ledger's caller unchanged.
#[async_trait]
pub trait AssetTransfer: Send + Sync {
	async fn balance_of(&self, account: &Address) -> Result<Balance, TransferError>;

	async fn transfer(
		&self,
		from: &Address,
		to: &Address,
		amount: Balance,
	) -> Result<(), TransferError>;

	/// Moves `amount` out of `owner` on behalf of `spender`. Requires a prior approval
	/// of at least `amount` by `owner` for `spender`.
	async fn transfer_from(
		&self,
		spender: &Address,
		owner: &Address,
		to: &Address,
		amount: Balance,
	) -> Result<(), TransferError>;
}
