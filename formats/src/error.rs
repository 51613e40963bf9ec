//! Error module
//!

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Status {
    #[error("Can not read mission file {0}: {1}")]
    Unreadable(String, String),
    #[error("Bad mission data: {0}")]
    BadMission(String),
    #[error("Waypoint {0}: latitude {1} out of [-90, 90]")]
    BadLatitude(String, f64),
    #[error("Waypoint {0}: longitude {1} out of [-180, 180]")]
    BadLongitude(String, f64),
    #[error("Waypoint {0}: {1} must be positive or zero, got {2}")]
    Negative(String, &'static str, f64),
    #[error("Duplicate waypoint id {0}")]
    DuplicateId(String),
}
