pub mod account_manager;
pub mod account_state;
