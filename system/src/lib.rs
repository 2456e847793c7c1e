pub mod config;
pub mod errors;
pub mod stake_record;
pub mod staking_pool;
