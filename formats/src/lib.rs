//! Definition of the mission file format.
//!
//! A mission is an ordered list of waypoints, each one carrying a geographic position and some
//! optional flight parameters (target speed, loiter time, etc.).  This crate only describes the
//! data and checks that what we read is sane; everything path-related lives in `waypath-engine`.
//!

pub use error::*;
pub use kind::*;
pub use mission::*;
pub use point::*;

mod error;
mod kind;
mod mission;
mod point;

pub fn version() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}
