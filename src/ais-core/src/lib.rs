#![deny(warnings)]
#![deny(rust_2018_idioms)]

//! Vessel state aggregation for AIS streams: merging of position and static reports into
//! per-vessel records, derived classifications, staleness eviction and the persisted snapshot.

mod classifier;
mod domain;
mod error;
mod eviction;
mod snapshot;
mod store;

pub use classifier::*;
pub use domain::*;
pub use error::*;
pub use eviction::*;
pub use snapshot::*;
pub use store::*;
