//! Decision core for a battery-backed demand-response participant.
//!
//! Given a live battery state and short-horizon price/demand signals, this crate decides
//! whether it is profitable to discharge now (Fast DR Dispatch), allocates 24 hourly bids into
//! a day-ahead Capacity Bidding Program, and tracks physical battery wear via a rainflow cycle
//! accumulator feeding a non-linear degradation-cost model. It is synchronous and does no I/O:
//! telemetry, market-data fetch, bid submission, and wall-clock timing all live in the host.
//!
//! Start at [`bidding::DrStrategy`].

pub mod battery;
pub mod bidding;
pub mod config;
pub mod cost;
pub mod degradation;
pub mod error;
pub mod forecast;
pub mod market;
mod prelude;
pub mod units;

pub use bidding::DrStrategy;
pub use error::{AllocationError, ConfigurationError, InputError};
