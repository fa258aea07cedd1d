mod error;
pub mod opening;
pub mod personify;
pub mod reader;
pub mod standardize;
pub mod timecontrol;
mod types;
mod visitor;

pub use error::{GameError, GameRef};
pub use personify::personify;
pub use reader::{CompressionMode, ReadError, read_headers, read_pgn_files};
pub use standardize::standardize;
pub use timecontrol::{SpeedThresholds, ThresholdError, TimeControl, TimeControlType};
pub use types::{Color, PersonifiedGameHeader, RawGameHeader, StandardizedGameHeader};
pub use visitor::HeaderVisitor;
