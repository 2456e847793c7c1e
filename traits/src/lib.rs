pub mod asset_transfer;
pub mod clock;

pub use asset_transfer::AssetTransfer;
pub use clock::{Clock, ManualClock, SystemClock};
