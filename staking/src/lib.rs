pub mod staking_state;
