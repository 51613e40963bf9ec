//! Library part of the `pathctl` utility.
//!
//! Commands are thin wrappers around `waypath-engine`: load and check the mission, build the
//! path and the playback clock, then format whatever comes out.
//!

pub use cli::*;
pub use cmds::*;
pub use config::*;
pub use error::*;

mod cli;
mod cmds;
mod config;
mod error;
