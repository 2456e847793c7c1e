/// 20-byte account identity, same width as an EVM address
pub type Address = [u8; 20];

/// Token amount in base units
pub type Balance = u128;

/// Seconds since the UNIX epoch
pub type TimeStamp = u64;

/// Position of a deposit inside a staker's deposit sequence
pub type StakeIndex = usize;

pub const SECONDS_PER_DAY: TimeStamp = 24 * 60 * 60;

pub const DEFAULT_DECIMALS: u8 = 18;
