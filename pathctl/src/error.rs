//! Error module
//!

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Status {
    #[error("Bad file version {0}")]
    BadFileVersion(usize),
    #[error("Missing configuration file {0}")]
    MissingConfig(String),
    #[error("Error reading configuration({0})")]
    BadConfig(String),
    #[error("Frame rate must be at least 1")]
    BadFps,
}
