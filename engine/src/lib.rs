//! Library implementing the path animation engine.
//!
//! Given an ordered list of waypoints, we build a [`Path`] made of great-circle segments, then a
//! [`Playback`] clock tells us how far along the path we are and [`sample()`] turns that into a
//! position and heading for the vehicle.  [`Replay`] ties both together for a single session.
//!
//! Nothing here keeps derived state around: the path is rebuilt whenever the waypoints change
//! and the pose is recomputed from the clock every time it is asked for.
//!

pub use clock::*;
pub use error::*;
pub use geodesy::*;
pub use replay::*;
pub use sampler::*;
pub use segment::*;
pub use stats::*;

// Re-export for convenience
//
pub use waypath_formats::{GeoPoint, Mission, Waypoint};

mod clock;
mod error;
mod geodesy;
mod replay;
mod sampler;
mod segment;
mod stats;

const NAME: &str = env!("CARGO_PKG_NAME");
const EVERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> String {
    format!("{}/{}", NAME, EVERSION)
}
