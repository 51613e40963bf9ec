//! This library is there to share some common code amongst all waypath modules.
//!

mod config;
mod logging;
mod macros;

pub use config::*;
pub use logging::*;

const NAME: &str = env!("CARGO_PKG_NAME");
const VERSION: &str = env!("CARGO_PKG_VERSION");

pub fn version() -> String {
    format!("{}/{}", NAME, VERSION)
}

/// Anything loaded from a versioned file.
///
pub trait Versioned {
    /// Version this code understands
    const CURRENT: usize;

    /// Version found in the file
    fn version(&self) -> usize;
}
