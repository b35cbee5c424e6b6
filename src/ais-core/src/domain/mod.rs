mod ais;
mod vessel;

pub use ais::*;
pub use vessel::*;
