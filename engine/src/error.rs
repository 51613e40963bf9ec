use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum EngineError {
    #[error("Bad replay step {0}, must be finite and > 0")]
    BadStep(f64),
    #[error("Bad cruise speed {0} m/s, must be finite and > 0")]
    BadCruiseSpeed(f64),
}
