mod client;
mod error;
mod params;

pub use client::{DEFAULT_BASE_URL, LichessClient};
pub use error::ApiError;
pub use params::{DateRange, ExportParams, PerfType};
