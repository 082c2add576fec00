pub mod clock;
pub mod duration;
pub mod manager;
pub mod responder;
pub mod table;

pub use clock::{Clock, ManualClock, SystemClock};
pub use duration::parse_duration;
pub use manager::{FeatureGates, MuteManager, MuteOutcome, MuteStatus, UnmuteOutcome};
pub use table::MuteTable;
