//! Concrete aggregation functions

mod signed_difference;
mod std_dev;

pub use signed_difference::SignedDifference;
pub use std_dev::StdDev;
