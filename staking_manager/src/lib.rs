pub mod staking_manager;

pub use staking_manager::StakingManager;
